//! Content loader - loads posts from the source directory

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{is_reserved_output, ContentError, FrontMatter, MarkdownRenderer, Post};
use crate::Folio;

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self {
            folio,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Directory holding post sources
    pub fn posts_dir(&self) -> std::path::PathBuf {
        self.folio.source_dir.join("_posts")
    }

    /// Load all posts from source/_posts, in directory walk order
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.posts_dir();
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts: Vec<Post> = Vec::new();
        let mut by_path: HashMap<String, String> = HashMap::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let post = match self.load_post(path) {
                Ok(post) => post,
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                    continue;
                }
            };

            // Paths that differ only in slashes still share an output file
            let key = post.output_key();
            if let Some(first) = by_path.get(&key) {
                return Err(ContentError::DuplicatePath {
                    path: format!("/{}", key),
                    first: first.clone(),
                    second: post.source.clone(),
                }
                .into());
            }
            by_path.insert(key, post.source.clone());
            posts.push(post);
        }

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let url_path = fm
            .path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ContentError::MissingPath(path.to_path_buf()))?;

        // Get title from front-matter or filename
        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        // Calculate source path relative to source dir
        let source = path
            .strip_prefix(&self.folio.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut post = Post::new(title, url_path, source);
        if is_reserved_output(&post.output_key()) {
            return Err(ContentError::ReservedPath {
                path: post.path,
                file: path.to_path_buf(),
            }
            .into());
        }

        post.date = fm.parse_date();
        if fm.date.as_deref().is_some_and(|d| !d.trim().is_empty()) && post.date.is_none() {
            tracing::warn!("Unrecognized date {:?} in {:?}", fm.date, path);
        }
        post.html = self.renderer.render(body);
        post.thumbnail = fm.thumbnail;
        post.meta_description = fm.meta_description;
        post.meta_keywords = fm.meta_keywords;

        tracing::debug!("Loaded post {} -> {}", post.source, post.path);
        Ok(post)
    }
}

/// Check if a file is a markdown file
pub(crate) fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_with_posts(posts: &[(&str, &str)]) -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("source/_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for (name, content) in posts {
            fs::write(posts_dir.join(name), content).unwrap();
        }
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_load_posts() {
        let (_dir, folio) = site_with_posts(&[
            (
                "a.md",
                "---\npath: /a\ntitle: A\ndate: 2021-01-01\nthumbnail: /img/a.png\n---\n# Hi\n",
            ),
            ("b.md", "---\npath: b\ntitle: B\n---\nNo date here\n"),
        ]);

        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert_eq!(posts.len(), 2);

        assert_eq!(posts[0].path, "/a");
        assert_eq!(posts[0].id, "_posts/a.md");
        assert!(posts[0].date.is_some());
        assert_eq!(posts[0].thumbnail(), Some("/img/a.png"));
        assert!(posts[0].html.contains("<h1>Hi</h1>"));

        assert_eq!(posts[1].path, "/b");
        assert!(posts[1].date.is_none());
    }

    #[test]
    fn test_missing_path_is_skipped() {
        let (_dir, folio) = site_with_posts(&[
            ("ok.md", "---\npath: /ok\ntitle: Ok\n---\nbody\n"),
            ("nopath.md", "---\ntitle: Lost\n---\nbody\n"),
        ]);

        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Ok");
    }

    #[test]
    fn test_duplicate_path_is_an_error() {
        let (_dir, folio) = site_with_posts(&[
            ("one.md", "---\npath: /same\ntitle: One\n---\n"),
            ("two.md", "---\npath: same\ntitle: Two\n---\n"),
        ]);

        let err = ContentLoader::new(&folio).load_posts().unwrap_err();
        let err = err.downcast::<ContentError>().unwrap();
        assert!(matches!(err, ContentError::DuplicatePath { ref path, .. } if path == "/same"));
    }

    #[test]
    fn test_trailing_slash_is_the_same_output() {
        let (_dir, folio) = site_with_posts(&[
            ("one.md", "---\npath: /same\ntitle: One\n---\n"),
            ("two.md", "---\npath: /same/\ntitle: Two\n---\n"),
        ]);

        let err = ContentLoader::new(&folio).load_posts().unwrap_err();
        match err.downcast::<ContentError>().unwrap() {
            ContentError::DuplicatePath {
                path,
                first,
                second,
            } => {
                assert_eq!(path, "/same");
                assert_eq!(first, "_posts/one.md");
                assert_eq!(second, "_posts/two.md");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_reserved_paths_are_skipped() {
        let (_dir, folio) = site_with_posts(&[
            ("listed.md", "---\npath: /listed\ntitle: Listed\n---\n"),
            ("root.md", "---\npath: /\ntitle: Root\n---\n"),
            ("missing.md", "---\npath: /404.html\ntitle: Missing\n---\n"),
        ]);

        let loader = ContentLoader::new(&folio);
        let posts = loader.load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].path, "/listed");

        let err = loader
            .load_post(&loader.posts_dir().join("root.md"))
            .unwrap_err();
        assert!(matches!(
            err.downcast::<ContentError>().unwrap(),
            ContentError::ReservedPath { ref path, .. } if path == "/"
        ));
    }

    #[test]
    fn test_no_posts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        let (_dir, folio) = site_with_posts(&[("untitled-post.md", "---\npath: /u\n---\nx\n")]);
        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert_eq!(posts[0].title, "untitled-post");
    }
}
