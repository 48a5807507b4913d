//! Banner selection for a post page

use serde::Serialize;

use crate::query::PostDetail;

/// Top region of a post page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Banner {
    /// Image banner; title and date are left to the page metadata
    WithThumbnail { thumbnail: String },
    /// Text banner with the title and formatted date
    WithoutThumbnail { title: String, date: String },
}

impl Banner {
    pub fn for_post(post: &PostDetail) -> Self {
        match post.thumbnail.as_deref().filter(|t| !t.is_empty()) {
            Some(thumbnail) => Banner::WithThumbnail {
                thumbnail: thumbnail.to_string(),
            },
            None => Banner::WithoutThumbnail {
                title: post.title.clone(),
                date: post.date.clone().unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(thumbnail: Option<&str>) -> PostDetail {
        PostDetail {
            html: "<p>body</p>".to_string(),
            date: Some("January 02, 2021".to_string()),
            path: "/hello".to_string(),
            title: "Hello".to_string(),
            thumbnail: thumbnail.map(str::to_string),
            meta_description: None,
            meta_keywords: None,
        }
    }

    #[test]
    fn test_no_thumbnail_gives_text_banner() {
        assert_eq!(
            Banner::for_post(&detail(None)),
            Banner::WithoutThumbnail {
                title: "Hello".to_string(),
                date: "January 02, 2021".to_string(),
            }
        );
        assert!(matches!(
            Banner::for_post(&detail(Some(""))),
            Banner::WithoutThumbnail { .. }
        ));
    }

    #[test]
    fn test_thumbnail_gives_image_banner() {
        assert_eq!(
            Banner::for_post(&detail(Some("/img/x.png"))),
            Banner::WithThumbnail {
                thumbnail: "/img/x.png".to_string()
            }
        );
    }

    #[test]
    fn test_serialized_tag() {
        let value = serde_json::to_value(Banner::for_post(&detail(Some("/t.jpg")))).unwrap();
        assert_eq!(value["kind"], "with_thumbnail");
        assert_eq!(value["thumbnail"], "/t.jpg");
    }
}
