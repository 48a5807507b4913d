//! SEO and social metadata for page heads

use serde::Serialize;

use crate::config::SiteConfig;
use crate::helpers::absolute_url;
use crate::query::{PostDetail, SiteMetadata};

/// Values for the `<title>`, description, keyword, Open Graph, Twitter Card,
/// itemprop and canonical tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeoTags {
    /// Document title
    pub title: String,
    /// Title used by itemprop, Open Graph and Twitter Card tags
    pub social_title: String,
    pub description: String,
    pub keywords: String,
    /// Absolute image URL
    pub image: String,
    pub canonical: String,
    pub og_type: String,
    pub twitter_card: String,
}

const OG_TYPE: &str = "website";
const TWITTER_CARD: &str = "summary_large_image";

impl SeoTags {
    /// Tags for a post page
    pub fn for_post(post: &PostDetail, site: &SiteMetadata, base_url: &str) -> Self {
        Self {
            title: format!("{} | {}", post.title, site.title),
            social_title: post.title.clone(),
            description: post.meta_description.clone().unwrap_or_default(),
            keywords: post.meta_keywords.clone().unwrap_or_default(),
            image: absolute_url(base_url, post.thumbnail.as_deref().unwrap_or_default()),
            canonical: absolute_url(base_url, &post.path),
            og_type: OG_TYPE.to_string(),
            twitter_card: TWITTER_CARD.to_string(),
        }
    }

    /// Tags for the index page
    pub fn for_index(site: &SiteMetadata, config: &SiteConfig) -> Self {
        Self {
            title: site.title.clone(),
            social_title: site.title.clone(),
            description: site.description.clone(),
            keywords: config.keywords.clone(),
            image: absolute_url(config.base_url(), &config.og_image),
            canonical: config.base_url().to_string(),
            og_type: OG_TYPE.to_string(),
            twitter_card: TWITTER_CARD.to_string(),
        }
    }

    /// Tags for the not-found page
    pub fn for_not_found(site: &SiteMetadata, config: &SiteConfig) -> Self {
        Self {
            title: format!("Page not found | {}", site.title),
            social_title: site.title.clone(),
            canonical: absolute_url(config.base_url(), "/404.html"),
            ..Self::for_index(site, config)
        }
    }
}
