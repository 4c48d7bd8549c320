use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::{StatusCode, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, patch, post},
};
use instapage_core::{
    Editor, Product, ProductPatch, SITE_FILE, ViewMode, WebsiteData, WebsiteDataPatch,
    parse_site_toml,
};
use instapage_generator::{HtmlRenderer, html_escape, inject_live_reload, package};
use instapage_validator::ASSETS_DIR;
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use serde::Deserialize;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::sync::{RwLock, broadcast};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::site;

#[derive(Clone)]
struct AppState {
    site_path: PathBuf,
    editor: Arc<RwLock<Editor<HtmlRenderer>>>,
    reload_tx: broadcast::Sender<()>,
}

impl AppState {
    fn new(site_path: PathBuf, data: WebsiteData) -> Self {
        let (reload_tx, _) = broadcast::channel::<()>(100);
        Self {
            site_path,
            editor: Arc::new(RwLock::new(Editor::new(data, HtmlRenderer))),
            reload_tx,
        }
    }

    /// Apply an edit to a copy of the site, save it, then publish it
    ///
    /// The live editor only changes once the save succeeded.
    async fn commit<T>(
        &self,
        edit: impl FnOnce(&mut Editor<HtmlRenderer>) -> instapage_core::Result<T>,
    ) -> Result<(T, WebsiteData), ApiError> {
        let mut editor = self.editor.write().await;
        let mut draft = Editor::new(editor.data().clone(), HtmlRenderer);
        let output = edit(&mut draft)?;
        let data = draft.into_data();

        site::save(&self.site_path, &data)?;
        editor.replace(data.clone());
        let _ = self.reload_tx.send(());
        Ok((output, data))
    }
}

/// JSON error body for the editing API
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<instapage_core::Error> for ApiError {
    fn from(err: instapage_core::Error) -> Self {
        let status = match err {
            instapage_core::Error::ProductNotFound(_) => StatusCode::NOT_FOUND,
            instapage_core::Error::InvalidData(_) => StatusCode::BAD_REQUEST,
            instapage_core::Error::AssistantBusy => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{:#}", err),
        }
    }
}

/// Start the local editor with live preview.
///
/// This command:
/// - Loads site.toml into an editing session
/// - Serves the editor frame, the full-screen page and a JSON editing API
/// - Serves local images from assets/
/// - Saves every API edit back to site.toml
/// - Watches the directory and reloads when files change on disk
///
/// # Arguments
///
/// * `path` - Path to site directory containing site.toml
/// * `port` - Port to serve on (default: 8080)
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("🌐 Starting preview server...");
    println!("   Site: {}", path.display());

    let data = site::load(&path)?;

    println!("   ✓ Loaded: {}", data.business_name);
    println!("   ✓ Template: {}", data.template);
    println!("   ✓ Products: {}", data.products.len());

    let state = AppState::new(path.clone(), data);
    let app = router(state.clone(), &path);

    // Start file watcher
    let watcher_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_state).await {
            eprintln!("File watcher error: {}", e);
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Editor ready at: http://localhost:{}", port);
    println!("   Full-screen page: http://localhost:{}/site", port);
    println!("   Download archive: http://localhost:{}/download", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState, path: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(frame_handler))
        .route("/site", get(site_handler))
        .route("/_reload", get(sse_handler))
        .route("/download", get(download_handler))
        .route("/api/site", get(get_site).patch(patch_site))
        .route("/api/products", post(add_product))
        .route(
            "/api/products/{id}",
            patch(update_product).delete(remove_product),
        )
        .nest_service("/assets", ServeDir::new(path.join(ASSETS_DIR)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Watch for file changes and trigger reload
async fn watch_files(state: AppState) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&state.site_path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                // Filter out temporary files and hidden files
                let names: Vec<String> = event
                    .paths
                    .iter()
                    .map(|p| p.file_name().unwrap_or_default().to_string_lossy().into_owned())
                    .filter(|name| !name.starts_with('.') && !name.ends_with('~'))
                    .collect();

                if names.iter().any(|name| name == SITE_FILE) {
                    reload_site(&state).await;
                } else if !names.is_empty() {
                    println!("   📝 File changed, reloading...");
                    let _ = state.reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Pick up edits made to site.toml outside the editor
async fn reload_site(state: &AppState) {
    match parse_site_toml(site::site_file(&state.site_path)) {
        Ok(data) => {
            let mut editor = state.editor.write().await;
            // Our own saves come back through the watcher unchanged
            if editor.data() != &data {
                let revision = editor.replace(data);
                println!("   📝 {} changed, reloading (revision {})...", SITE_FILE, revision);
                let _ = state.reload_tx.send(());
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring invalid site file");
            println!("   ⚠ {} has errors, keeping the last good version: {}", SITE_FILE, e);
        }
    }
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(()) => yield Ok(Event::default().data("reload")),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Default, Deserialize)]
struct FrameQuery {
    view: Option<ViewMode>,
}

/// Editor shell: toolbar plus the page in a desktop- or phone-sized frame
async fn frame_handler(
    State(state): State<AppState>,
    Query(query): Query<FrameQuery>,
) -> Html<String> {
    let mut editor = state.editor.write().await;
    if let Some(view) = query.view {
        editor.set_view_mode(view);
    }
    let view = editor.view_mode();
    let name = html_escape(&editor.data().business_name);
    let revision = editor.revision();
    drop(editor);

    let frame_style = match view.frame_size() {
        Some((width, height)) => format!(
            "width: {}px; height: {}px; border: 12px solid #1c1917; border-radius: 36px;",
            width, height
        ),
        None => "width: 100%; height: calc(100vh - 64px); border: 0;".to_string(),
    };
    let active = |mode: ViewMode| if mode == view { "active" } else { "" };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name} | Editor</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            background: #e7e5e4;
        }}
        .toolbar {{
            height: 64px;
            display: flex;
            align-items: center;
            gap: 1rem;
            padding: 0 1.5rem;
            background: white;
            box-shadow: 0 2px 8px rgba(0,0,0,0.1);
        }}
        .toolbar .name {{ font-weight: bold; flex: 1; }}
        .toolbar a {{
            color: #44403c;
            text-decoration: none;
            padding: 0.5rem 1rem;
            border-radius: 6px;
        }}
        .toolbar a.active {{ background: #1c1917; color: white; }}
        .toolbar a.download {{ background: #4f46e5; color: white; }}
        .stage {{ display: flex; justify-content: center; padding: {padding}; }}
        iframe {{ background: white; }}
    </style>
</head>
<body>
    <div class="toolbar">
        <span class="name">{name} <small>rev {revision}</small></span>
        <a class="{desktop}" href="/?view=desktop">Desktop</a>
        <a class="{mobile}" href="/?view=mobile">Mobile</a>
        <a href="/site" target="_blank">Full screen</a>
        <a class="download" href="/download">Download .zip</a>
    </div>
    <div class="stage">
        <iframe src="/site" title="Site preview" style="{frame_style}"></iframe>
    </div>
</body>
</html>"#,
        name = name,
        revision = revision,
        desktop = active(ViewMode::Desktop),
        mobile = active(ViewMode::Mobile),
        padding = if view == ViewMode::Mobile { "2rem" } else { "0" },
        frame_style = frame_style,
    ))
}

/// The rendered page with the reload hook added
async fn site_handler(State(state): State<AppState>) -> Html<String> {
    let editor = state.editor.read().await;
    Html(inject_live_reload(editor.preview()))
}

async fn download_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let editor = state.editor.read().await;
    let archive = package(editor.data()).context("Failed to build archive")?;
    drop(editor);

    println!("   📦 Download: {} ({} bytes)", archive.file_name, archive.bytes.len());

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", archive.file_name),
        ),
    ];
    Ok((headers, archive.bytes).into_response())
}

async fn get_site(State(state): State<AppState>) -> Json<WebsiteData> {
    Json(state.editor.read().await.data().clone())
}

async fn patch_site(
    State(state): State<AppState>,
    Json(patch): Json<WebsiteDataPatch>,
) -> Result<Json<WebsiteData>, ApiError> {
    patch.check()?;
    if patch.is_empty() {
        return Ok(Json(state.editor.read().await.data().clone()));
    }
    let (_, data) = state
        .commit(|editor| {
            editor.apply(patch);
            Ok(())
        })
        .await?;
    Ok(Json(data))
}

async fn add_product(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let (id, data) = state.commit(|editor| Ok(editor.add_product())).await?;
    let product = data
        .product(&id)
        .cloned()
        .ok_or(instapage_core::Error::ProductNotFound(id))?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let (_, data) = state
        .commit(|editor| editor.update_product(&id, patch))
        .await?;
    let product = data
        .product(&id)
        .cloned()
        .ok_or(instapage_core::Error::ProductNotFound(id))?;
    Ok(Json(product))
}

async fn remove_product(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<StatusCode, ApiError> {
    state.commit(|editor| editor.remove_product(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
