//! Page shell: header, navigation and footer around page content

use anyhow::Result;
use chrono::{DateTime, Datelike, TimeZone};
use serde::Serialize;
use tera::Context;

use super::SeoTags;
use crate::config::SiteConfig;
use crate::helpers::is_external;
use crate::templates::TemplateRenderer;

/// One navigation link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub external: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub year: i32,
    pub holder: String,
    pub attribution_text: String,
    pub attribution_url: String,
}

/// Everything the layout needs besides the page itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shell {
    pub site_title: String,
    pub home_href: String,
    pub nav: Vec<NavLink>,
    pub footer: Footer,
}

impl Shell {
    /// Build the shell; the copyright year comes from `now`
    pub fn new<Tz: TimeZone>(config: &SiteConfig, now: &DateTime<Tz>) -> Self {
        let nav = if config.profile_url.is_empty() {
            Vec::new()
        } else {
            vec![NavLink {
                label: config.profile_label.clone(),
                href: config.profile_url.clone(),
                external: is_external(&config.profile_url),
            }]
        };

        Self {
            site_title: config.title.clone(),
            home_href: "/".to_string(),
            nav,
            footer: Footer {
                year: now.year(),
                holder: config.author.clone(),
                attribution_text: config.attribution.text.clone(),
                attribution_url: config.attribution.url.clone(),
            },
        }
    }

    /// Wrap rendered page content in the layout
    pub fn wrap(&self, renderer: &TemplateRenderer, seo: &SeoTags, content: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("shell", self);
        context.insert("seo", seo);
        context.insert("content", content);
        renderer.render("layout.html", &context)
    }
}
