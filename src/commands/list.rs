//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::loader::ContentLoader;
use crate::query::{ContentSource, SiteContent};
use crate::render::listing::is_listed;
use crate::Folio;

/// Print posts in listing order, flagging the unlisted ones
pub fn run(folio: &Folio) -> Result<()> {
    let posts = ContentLoader::new(folio).load_posts()?;
    let content = SiteContent::new(&folio.config, posts);
    write_listing(&content, &mut std::io::stdout().lock())
}

fn write_listing(content: &impl ContentSource, out: &mut impl Write) -> Result<()> {
    let nodes = content.all_posts();
    let listed = nodes.iter().filter(|n| is_listed(n)).count();

    writeln!(out, "Posts ({} listed, {} total):", listed, nodes.len())?;
    for node in &nodes {
        if is_listed(node) {
            writeln!(
                out,
                "  {} - {} [{}]",
                node.date.as_deref().unwrap_or_default(),
                node.title,
                node.path
            )?;
        } else {
            writeln!(out, "  (undated) - {} [{}] unlisted", node.title, node.path)?;
        }
    }

    Ok(())
}
