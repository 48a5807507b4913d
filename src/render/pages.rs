//! Whole pages: the index listing, post pages and the not-found page

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use tera::Context;

use super::{post_summaries, Banner, SeoTags, Shell};
use crate::config::SiteConfig;
use crate::query::{ContentSource, PostDetail};
use crate::templates::TemplateRenderer;

/// Renders complete HTML documents from a content source
pub struct PageRenderer {
    templates: TemplateRenderer,
    config: SiteConfig,
    shell: Shell,
}

impl PageRenderer {
    /// Create a renderer; `now` fixes the footer's copyright year
    pub fn new<Tz: TimeZone>(config: &SiteConfig, now: &DateTime<Tz>) -> Result<Self> {
        Ok(Self {
            templates: TemplateRenderer::new()?,
            config: config.clone(),
            shell: Shell::new(config, now),
        })
    }

    /// Index page listing every dated post
    pub fn index(&self, source: &impl ContentSource) -> Result<String> {
        let site = source.site_metadata();
        let nodes = source.all_posts();
        let cards = post_summaries(&nodes)
            .map(|summary| summary.render(&self.templates))
            .collect::<Result<Vec<_>>>()?;

        let mut context = Context::new();
        context.insert("site", &site);
        context.insert("cards", &cards);
        let body = self.templates.render("index.html", &context)?;

        let seo = SeoTags::for_index(&site, &self.config);
        self.shell.wrap(&self.templates, &seo, &body)
    }

    /// Page for the post at `path`, or `None` when no post has that path
    pub fn post(&self, source: &impl ContentSource, path: &str) -> Result<Option<String>> {
        match source.post_by_path(path) {
            Some(post) => self.post_detail(source, &post).map(Some),
            None => Ok(None),
        }
    }

    /// Page for an already resolved post
    pub fn post_detail(&self, source: &impl ContentSource, post: &PostDetail) -> Result<String> {
        let site = source.site_metadata();
        let banner = Banner::for_post(post);

        let mut context = Context::new();
        context.insert("banner", &banner);
        context.insert("html", &post.html);
        let body = self.templates.render("post.html", &context)?;

        let seo = SeoTags::for_post(post, &site, self.config.base_url());
        self.shell.wrap(&self.templates, &seo, &body)
    }

    /// Not-found page
    pub fn not_found(&self, source: &impl ContentSource) -> Result<String> {
        let site = source.site_metadata();

        let mut context = Context::new();
        context.insert("shell", &self.shell);
        let body = self.templates.render("404.html", &context)?;

        let seo = SeoTags::for_not_found(&site, &self.config);
        self.shell.wrap(&self.templates, &seo, &body)
    }
}
