//! Content query layer
//!
//! The render layer never touches the filesystem. It asks a [`ContentSource`]
//! for the site metadata, the post listing, and individual posts by path, in
//! the shapes below.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{format_date, prune_excerpt};

/// Site-wide metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
}

/// A post as returned by the listing query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostNode {
    pub id: String,
    pub excerpt: String,
    /// Formatted publish date; `None` or empty means unlisted
    pub date: Option<String>,
    pub path: String,
    pub title: String,
    pub thumbnail: Option<String>,
}

/// A post as returned by the detail query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub html: String,
    pub date: Option<String>,
    pub path: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
}

/// Resolves the data each page needs
pub trait ContentSource {
    /// Site title and description
    fn site_metadata(&self) -> SiteMetadata;

    /// Every post, newest first
    fn all_posts(&self) -> Vec<PostNode>;

    /// The post whose path equals `path` exactly
    fn post_by_path(&self, path: &str) -> Option<PostDetail>;
}

/// In-memory content source over loaded posts
pub struct SiteContent {
    metadata: SiteMetadata,
    posts: Vec<Post>,
    date_format: String,
    excerpt_length: usize,
}

impl SiteContent {
    /// Build from the site config and loaded posts
    pub fn new(config: &SiteConfig, mut posts: Vec<Post>) -> Self {
        // Newest first; undated posts sort after every dated one. The sort is
        // stable so undated posts keep their load order.
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            metadata: SiteMetadata {
                title: config.title.clone(),
                description: config.description.clone(),
            },
            posts,
            date_format: config.date_format.clone(),
            excerpt_length: config.excerpt_length,
        }
    }

    /// Loaded posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    fn format_post_date(&self, post: &Post) -> Option<String> {
        post.date.map(|d| format_date(&d, &self.date_format))
    }
}

impl ContentSource for SiteContent {
    fn site_metadata(&self) -> SiteMetadata {
        self.metadata.clone()
    }

    fn all_posts(&self) -> Vec<PostNode> {
        self.posts
            .iter()
            .map(|post| PostNode {
                id: post.id.clone(),
                excerpt: prune_excerpt(&post.html, self.excerpt_length),
                date: self.format_post_date(post),
                path: post.path.clone(),
                title: post.title.clone(),
                thumbnail: post.thumbnail().map(str::to_string),
            })
            .collect()
    }

    fn post_by_path(&self, path: &str) -> Option<PostDetail> {
        let post = self.posts.iter().find(|p| p.path == path)?;
        Some(PostDetail {
            html: post.html.clone(),
            date: self.format_post_date(post),
            path: post.path.clone(),
            title: post.title.clone(),
            thumbnail: post.thumbnail().map(str::to_string),
            meta_description: post.meta_description.clone(),
            meta_keywords: post.meta_keywords.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn post(title: &str, path: &str, date: Option<(i32, u32, u32)>) -> Post {
        let mut post = Post::new(
            title.to_string(),
            path,
            format!("_posts/{}.md", title.to_lowercase()),
        );
        post.date = date.map(|(y, m, d)| Local.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap());
        post.html = format!("<p>{} body text</p>", title);
        post
    }

    fn content() -> SiteContent {
        let config = SiteConfig {
            title: "My Blog".to_string(),
            description: "Notes".to_string(),
            ..Default::default()
        };
        SiteContent::new(
            &config,
            vec![
                post("Old", "/old", Some((2020, 3, 1))),
                post("Draft", "/draft", None),
                post("New", "/new", Some((2021, 1, 2))),
            ],
        )
    }

    #[test]
    fn test_site_metadata() {
        let meta = content().site_metadata();
        assert_eq!(meta.title, "My Blog");
        assert_eq!(meta.description, "Notes");
    }

    #[test]
    fn test_all_posts_newest_first() {
        let nodes = content().all_posts();
        let titles: Vec<_> = nodes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old", "Draft"]);

        assert_eq!(nodes[0].date.as_deref(), Some("January 02, 2021"));
        assert_eq!(nodes[0].excerpt, "New body text");
        assert_eq!(nodes[0].id, "_posts/new.md");
        assert_eq!(nodes[2].date, None);
    }

    #[test]
    fn test_post_by_exact_path() {
        let content = content();
        let detail = content.post_by_path("/old").unwrap();
        assert_eq!(detail.title, "Old");
        assert_eq!(detail.date.as_deref(), Some("March 01, 2020"));
        assert!(detail.html.contains("Old body text"));

        assert!(content.post_by_path("/old/").is_none());
        assert!(content.post_by_path("old").is_none());
    }

    #[test]
    fn test_empty_thumbnail_is_dropped() {
        let config = SiteConfig::default();
        let mut p = post("Pic", "/pic", Some((2021, 1, 1)));
        p.thumbnail = Some(String::new());
        let content = SiteContent::new(&config, vec![p]);

        assert_eq!(content.all_posts()[0].thumbnail, None);
        assert_eq!(content.post_by_path("/pic").unwrap().thumbnail, None);
    }
}
