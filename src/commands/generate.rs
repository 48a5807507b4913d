//! Generate static files

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::Path;
use std::time::Duration;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::query::SiteContent;
use crate::Folio;

const DEBOUNCE_MS: u64 = 500;

/// Load content and generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = ContentLoader::new(folio).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    let content = SiteContent::new(&folio.config, posts);

    let now = chrono::Local::now();
    Generator::new(folio, &now)?.generate(&content)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(folio: &Folio) -> Result<()> {
    let folio = folio.clone();
    tokio::task::spawn_blocking(move || watch_with(&folio, || {})).await?
}

/// Regenerate the site whenever the sources or `_config.yml` change
///
/// Blocks the calling thread. Changes are debounced, and a change that lands
/// while a build is running is picked up by the next build. `on_rebuilt` is
/// called after every successful build.
pub fn watch_with(folio: &Folio, mut on_rebuilt: impl FnMut()) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(DEBOUNCE_MS), tx)?;

    if folio.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&folio.source_dir, RecursiveMode::Recursive)?;
    }

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<&Path> = events
            .iter()
            .map(|event| event.path.as_path())
            .filter(|path| is_relevant_change(path))
            .collect();
        if changed.is_empty() {
            continue;
        }
        for path in &changed {
            tracing::info!("Changed: {}", path.display());
        }

        match run(folio) {
            Ok(()) => on_rebuilt(),
            Err(e) => tracing::error!("Generation failed: {:#}", e),
        }
    }

    Ok(())
}

/// Editor swap files, dotfiles and VCS internals never trigger a rebuild
fn is_relevant_change(path: &Path) -> bool {
    if path.components().any(|c| c.as_os_str() == ".git") {
        return false;
    }
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => !(name.starts_with('.') || name.ends_with('~') || name.ends_with(".swp")),
        None => false,
    }
}
