//! Post summary cards for the index listing

use anyhow::Result;
use serde::Serialize;
use tera::Context;

use crate::query::PostNode;
use crate::templates::TemplateRenderer;

/// Display unit for one listed post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    /// Unique key, the post id
    pub key: String,
    pub title: String,
    /// Link target, the post path
    pub href: String,
    pub excerpt: String,
    pub date: String,
    pub thumbnail: Option<String>,
}

impl PostSummary {
    pub fn from_node(node: &PostNode) -> Self {
        Self {
            key: node.id.clone(),
            title: node.title.clone(),
            href: node.path.clone(),
            excerpt: node.excerpt.clone(),
            date: node.date.clone().unwrap_or_default(),
            thumbnail: node.thumbnail.clone().filter(|t| !t.is_empty()),
        }
    }

    /// Render this summary as a standalone card
    pub fn render(&self, renderer: &TemplateRenderer) -> Result<String> {
        let mut context = Context::new();
        context.insert("post", self);
        renderer.render("partials/post_link.html", &context)
    }
}
