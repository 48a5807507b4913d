//! Local preview server
//!
//! Serves the public directory the way a static host would: a post path
//! resolves to `<path>/index.html` with or without a trailing slash, and any
//! path that matches nothing gets `404.html` with a 404 status. With live
//! reload on, HTML responses carry a script that reloads the page after each
//! successful rebuild.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate::watch_with;
use crate::Folio;

const RELOAD_ROUTE: &str = "/__livereload";

const RELOAD_SCRIPT: &str = r#"<script>
(() => {
  const socket = new WebSocket(`ws://${location.host}/__livereload`);
  socket.addEventListener('message', (event) => {
    if (event.data === 'reload') location.reload();
  });
  socket.addEventListener('close', () => setTimeout(() => location.reload(), 1000));
})();
</script>
"#;

/// How the preview server is bound and what it does besides serving
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub ip: String,
    pub port: u16,
    /// Rebuild on source changes and push reloads to open pages
    pub live_reload: bool,
    /// Open the site in the default browser once bound
    pub open: bool,
}

struct Preview {
    public_dir: PathBuf,
    reloads: broadcast::Sender<()>,
    live_reload: bool,
}

/// Serve the generated site until the process is stopped
pub async fn start(folio: &Folio, options: &ServerOptions) -> Result<()> {
    let (reloads, _) = broadcast::channel(16);
    let preview = Arc::new(Preview {
        public_dir: folio.public_dir.clone(),
        reloads: reloads.clone(),
        live_reload: options.live_reload,
    });

    let listener = tokio::net::TcpListener::bind((options.ip.as_str(), options.port)).await?;
    let url = format!("http://{}:{}", options.ip, options.port);
    tracing::info!("Serving {:?} at {}", folio.public_dir, url);

    if options.live_reload {
        let folio = folio.clone();
        tokio::task::spawn_blocking(move || {
            let rebuilt = watch_with(&folio, move || {
                // No open pages is not an error
                let _ = reloads.send(());
            });
            if let Err(e) = rebuilt {
                tracing::error!("File watcher stopped: {:#}", e);
            }
        });
    }

    if options.open {
        if let Err(e) = open_in_browser(&url) {
            tracing::warn!("Could not open a browser: {}", e);
        }
    }

    axum::serve(listener, router(preview)).await?;
    Ok(())
}

fn router(preview: Arc<Preview>) -> Router {
    Router::new()
        .route(RELOAD_ROUTE, get(reload_socket))
        .fallback(serve)
        .layer(TraceLayer::new_for_http())
        .with_state(preview)
}

async fn serve(State(preview): State<Arc<Preview>>, request: Request<Body>) -> Response {
    if let Some(page) = resolve_page(&preview.public_dir, request.uri().path()) {
        return preview.page(StatusCode::OK, &page).await;
    }

    let mut files = ServeDir::new(&preview.public_dir);
    let response = match files.try_call(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Failed to serve file: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if response.status() == StatusCode::NOT_FOUND {
        let not_found = preview.public_dir.join("404.html");
        return preview.page(StatusCode::NOT_FOUND, &not_found).await;
    }
    response.into_response()
}

impl Preview {
    async fn page(&self, status: StatusCode, file: &Path) -> Response {
        match tokio::fs::read_to_string(file).await {
            Ok(html) if self.live_reload => (status, Html(with_reload_script(&html))).into_response(),
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    }
}

/// The generated HTML page a request path refers to, if there is one
///
/// `/` and `/<path>[/]` map to their `index.html`; a path naming an `.html`
/// file maps to that file. Paths leaving the public directory never resolve.
fn resolve_page(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let target = public_dir.join(relative);
    let page = if target.extension().is_some_and(|ext| ext == "html") {
        target
    } else {
        target.join("index.html")
    };
    page.is_file().then_some(page)
}

/// Insert the reload script before the closing body tag, or append it
fn with_reload_script(html: &str) -> String {
    match html.rfind("</body>") {
        Some(at) => format!("{}{}{}", &html[..at], RELOAD_SCRIPT, &html[at..]),
        None => format!("{}{}", html, RELOAD_SCRIPT),
    }
}

async fn reload_socket(
    ws: WebSocketUpgrade,
    State(preview): State<Arc<Preview>>,
) -> impl IntoResponse {
    let reloads = preview.reloads.subscribe();
    ws.on_upgrade(move |socket| push_reloads(socket, reloads))
}

async fn push_reloads(mut socket: WebSocket, mut reloads: broadcast::Receiver<()>) {
    loop {
        tokio::select! {
            signal = reloads.recv() => match signal {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    if socket.send(Message::Text("reload".into())).await.is_err() {
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => return,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return,
                // axum answers pings itself
                Some(Ok(_)) => {}
            },
        }
    }
}

fn open_in_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = std::process::Command::new("cmd");
        cmd.args(["/c", "start"]);
        cmd
    } else {
        std::process::Command::new("xdg-open")
    };
    command.arg(url).spawn().map(drop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn public_site() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        fs::create_dir_all(public.join("hello")).unwrap();
        fs::create_dir_all(public.join("img")).unwrap();
        fs::write(public.join("index.html"), "<html><body>home</body></html>").unwrap();
        fs::write(public.join("hello/index.html"), "<html><body>hello post</body></html>").unwrap();
        fs::write(public.join("404.html"), "<html><body>Page not found</body></html>").unwrap();
        fs::write(public.join("img/x.png"), b"png").unwrap();
        (dir, public)
    }

    fn preview(public_dir: PathBuf, live_reload: bool) -> Arc<Preview> {
        let (reloads, _) = broadcast::channel(1);
        Arc::new(Preview {
            public_dir,
            reloads,
            live_reload,
        })
    }

    async fn get_path(preview: Arc<Preview>, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = serve(State(preview), request).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[test]
    fn test_resolve_page() {
        let (_dir, public) = public_site();
        let hello = public.join("hello/index.html");

        assert_eq!(resolve_page(&public, "/"), Some(public.join("index.html")));
        assert_eq!(resolve_page(&public, "/hello"), Some(hello.clone()));
        assert_eq!(resolve_page(&public, "/hello/"), Some(hello.clone()));
        assert_eq!(resolve_page(&public, "/hello/index.html"), Some(hello));
        assert_eq!(resolve_page(&public, "/img/x.png"), None);
        assert_eq!(resolve_page(&public, "/missing"), None);
        assert_eq!(resolve_page(&public, "/../public/index.html"), None);
    }

    #[test]
    fn test_reload_script_goes_before_body_end() {
        let html = with_reload_script("<html><body><p>hi</p></body></html>");
        assert!(html.contains(RELOAD_ROUTE));
        assert!(html.ends_with("</script>\n</body></html>"));

        let fragment = with_reload_script("<p>no body</p>");
        assert!(fragment.starts_with("<p>no body</p><script>"));
    }

    #[tokio::test]
    async fn test_serves_post_pages_with_reload_script() {
        let (_dir, public) = public_site();
        let (status, body) = get_path(preview(public, true), "/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("hello post"));
        assert!(body.contains(RELOAD_ROUTE));
    }

    #[tokio::test]
    async fn test_unknown_path_gets_not_found_page() {
        let (_dir, public) = public_site();
        let (status, body) = get_path(preview(public, false), "/no-such-post").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
        assert!(!body.contains(RELOAD_ROUTE));
    }

    #[tokio::test]
    async fn test_serves_assets() {
        let (_dir, public) = public_site();
        let (status, body) = get_path(preview(public, true), "/img/x.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "png");
    }
}
