//! Post model

use chrono::{DateTime, Local};

/// A blog post as loaded from disk
#[derive(Debug, Clone)]
pub struct Post {
    /// Stable identifier (the source path relative to the source directory)
    pub id: String,

    /// Post title
    pub title: String,

    /// Publication date. Undated posts are rendered but never listed.
    pub date: Option<DateTime<Local>>,

    /// Rendered HTML content
    pub html: String,

    /// Thumbnail image path, relative to the site root
    pub thumbnail: Option<String>,

    /// URL path, always starting with '/'
    pub path: String,

    pub meta_description: Option<String>,

    pub meta_keywords: Option<String>,

    /// Source file path (relative)
    pub source: String,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, path: &str, source: String) -> Self {
        Self {
            id: source.clone(),
            title,
            date: None,
            html: String::new(),
            thumbnail: None,
            path: normalize_path(path),
            meta_description: None,
            meta_keywords: None,
            source,
        }
    }

    /// Thumbnail, treating an empty string as absent
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Where this post lands in the public directory, see [`output_key`]
    pub fn output_key(&self) -> String {
        output_key(&self.path)
    }
}

/// Directory under the public root that a URL path is written to
///
/// Empty segments are dropped, so `/a`, `/a/` and `//a//` share the key `a`.
/// The site root maps to the empty key.
pub fn output_key(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether an output key would overwrite a page the generator writes itself
pub fn is_reserved_output(key: &str) -> bool {
    let first = key.split('/').next().unwrap_or_default();
    first.is_empty() || first == "index.html" || first == "404.html"
}

/// Ensure a URL path starts with exactly one '/'
pub fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim().trim_start_matches('/'))
}
