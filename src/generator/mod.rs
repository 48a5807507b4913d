//! Generator module - writes the rendered site to the public directory

use anyhow::{bail, Result};
use chrono::{DateTime, TimeZone};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::content::loader::is_markdown_file;
use crate::content::{is_reserved_output, output_key};
use crate::query::{ContentSource, SiteContent};
use crate::render::PageRenderer;
use crate::Folio;

/// Static site generator
pub struct Generator {
    folio: Folio,
    pages: PageRenderer,
}

impl Generator {
    /// Create a new generator; `now` is the build time shown in the footer
    pub fn new<Tz: TimeZone>(folio: &Folio, now: &DateTime<Tz>) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            pages: PageRenderer::new(&folio.config, now)?,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, content: &SiteContent) -> Result<()> {
        fs::create_dir_all(&self.folio.public_dir)?;

        // Copy source assets (thumbnails, images, etc.)
        let copied = self.copy_source_assets()?;
        tracing::debug!("Copied {} asset files", copied);

        self.generate_index(content)?;
        self.generate_post_pages(content)?;
        self.generate_not_found(content)?;

        Ok(())
    }

    /// Generate the index page
    fn generate_index(&self, content: &SiteContent) -> Result<()> {
        let html = self.pages.index(content)?;
        let output_path = self.folio.public_dir.join("index.html");
        write_file(&output_path, &html)?;
        tracing::info!("Generated index page");
        Ok(())
    }

    /// Generate one page per post, dated or not
    fn generate_post_pages(&self, content: &SiteContent) -> Result<()> {
        let mut count = 0;
        let mut written = HashSet::new();

        for post in content.posts() {
            if !written.insert(post.output_key()) {
                bail!("Two posts would be written to {}", post.path);
            }

            let Some(html) = self.pages.post(content, &post.path)? else {
                continue;
            };

            let output_path = self.output_path_for(&post.path)?;
            write_file(&output_path, &html)?;
            tracing::debug!("Generated post: {:?}", output_path);
            count += 1;
        }

        tracing::info!("Generated {} post pages", count);
        Ok(())
    }

    /// Generate 404.html
    fn generate_not_found(&self, content: &SiteContent) -> Result<()> {
        let html = self.pages.not_found(content)?;
        write_file(&self.folio.public_dir.join("404.html"), &html)
    }

    /// Map a URL path to `public/<path>/index.html`
    fn output_path_for(&self, url_path: &str) -> Result<PathBuf> {
        let key = output_key(url_path);
        if is_reserved_output(&key) {
            bail!("Post path {} would overwrite a generated page", url_path);
        }

        let relative = Path::new(&key);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            bail!("Refusing to write post outside the public directory: {}", url_path);
        }
        Ok(self.folio.public_dir.join(relative).join("index.html"))
    }

    /// Copy source assets (images, etc.) to public directory
    fn copy_source_assets(&self) -> Result<usize> {
        let source_dir = &self.folio.source_dir;
        if !source_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_markdown_file(path) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;

            // Underscore directories hold sources, not assets
            if relative.components().any(|c| {
                c.as_os_str()
                    .to_str()
                    .is_some_and(|s| s.starts_with('_'))
            }) {
                continue;
            }

            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
    }
    fs::write(path, contents).map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", path, e))
}
