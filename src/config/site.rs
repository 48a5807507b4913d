//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    /// Base URL prepended to post paths and thumbnails in canonical and
    /// social tags. No trailing slash.
    pub url: String,

    // Index page metadata
    pub keywords: String,
    pub og_image: String,

    // Navigation
    pub profile_url: String,
    pub profile_label: String,

    // Footer
    #[serde(default)]
    pub attribution: AttributionConfig,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    /// Moment-style format used for post dates (e.g. "MMMM DD, YYYY")
    pub date_format: String,
    /// Maximum excerpt length in characters
    pub excerpt_length: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),

            url: "http://example.com".to_string(),

            keywords: String::new(),
            og_image: String::new(),

            profile_url: String::new(),
            profile_label: "Profile".to_string(),

            attribution: AttributionConfig::default(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            date_format: "MMMM DD, YYYY".to_string(),
            excerpt_length: 250,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        config.url = config.url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Footer attribution link
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionConfig {
    pub text: String,
    pub url: String,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            text: "W3Layouts".to_string(),
            url: "https://w3layouts.com".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Folio");
        assert_eq!(config.date_format, "MMMM DD, YYYY");
        assert_eq!(config.excerpt_length, 250);
        assert_eq!(config.attribution.text, "W3Layouts");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Shreyas Patil's Blog
author: Shreyas Patil
url: https://blog.shreyaspatil.dev
profile_url: https://shreyaspatil.dev
excerpt_length: 120
attribution:
  text: Someone
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Shreyas Patil's Blog");
        assert_eq!(config.author, "Shreyas Patil");
        assert_eq!(config.profile_url, "https://shreyaspatil.dev");
        assert_eq!(config.excerpt_length, 120);
        assert_eq!(config.attribution.text, "Someone");
        assert_eq!(config.attribution.url, "https://w3layouts.com");
        assert_eq!(config.source_dir, "source");
    }

    #[test]
    fn test_load_trims_trailing_slash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "url: https://blog.example.dev/\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.url, "https://blog.example.dev");
        assert_eq!(config.base_url(), "https://blog.example.dev");
    }
}
