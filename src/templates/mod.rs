//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::escape_html;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Tera's own escaping also rewrites '/', which would mangle paths in
        // attributes. Text is escaped explicitly with `html_text` instead.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            ("404.html", include_str!("site/404.html")),
            // Partials
            ("partials/head.html", include_str!("site/partials/head.html")),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/post_link.html",
                include_str!("site/partials/post_link.html"),
            ),
            ("partials/banner.html", include_str!("site/partials/banner.html")),
        ])?;

        tera.register_filter("html_text", html_text_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape text for element content and quoted attributes
fn html_text_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = match value {
        tera::Value::Null => String::new(),
        tera::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Ok(tera::Value::String(escape_html(&s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_html_text_filter() {
        let out = html_text_filter(
            &tera::Value::String("<A & B> /x".to_string()),
            &HashMap::new(),
        )
        .unwrap();
        assert_eq!(out, tera::Value::String("&lt;A &amp; B&gt; /x".to_string()));

        let out = html_text_filter(&tera::Value::Null, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String(String::new()));
    }
}
