//! HTTP gallery server.
//!
//! Every request re-scans the source directory, so the page always reflects
//! what is on disk right now. Scans run on the blocking pool; handlers share
//! nothing but the immutable [`AppState`].
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | Gallery page. `?theme=` and `?show_info=` select presentation |
//! | `GET /api/images` | Scan result as JSON |
//! | `GET /{filename}` | Raw bytes of one listed image |
//!
//! Theme resolution: query parameter (also stored in a 30-day `theme`
//! cookie), then the cookie, then `display.theme` from config.

use crate::config::GalleryConfig;
use crate::generate::{self, display_directory};
use crate::scan::{self, IMAGE_EXTENSIONS, file_extension};
use crate::types::{ImageRecord, Theme};
use axum::extract::{Path as UrlPath, Query, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, error, info};

const THEME_COOKIE: &str = "theme";
const SET_THEME_LIGHT: &str = "theme=light; Max-Age=2592000; Path=/";
const SET_THEME_DARK: &str = "theme=dark; Max-Age=2592000; Path=/";

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct AppState {
    source: Arc<PathBuf>,
    config: Arc<GalleryConfig>,
}

impl AppState {
    pub fn new(source: PathBuf, config: GalleryConfig) -> Self {
        Self {
            source: Arc::new(source),
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/images", get(api_images))
        .route("/{filename}", get(serve_image))
        .fallback(|| async { not_found() })
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}

/// Serve the gallery until Ctrl-C or SIGTERM.
pub async fn run(source: PathBuf, config: GalleryConfig, addr: SocketAddr) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    info!(%addr, source = %source.display(), "gallery server listening");

    axum::serve(listener, router(AppState::new(source, config)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gallery server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut term) = signal(SignalKind::terminate()) {
            term.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    response
}

/// Scan the source directory off the async runtime.
async fn scan_source(state: &AppState) -> Result<Vec<ImageRecord>, StatusCode> {
    let source = Arc::clone(&state.source);
    tokio::task::spawn_blocking(move || scan::scan(&source, IMAGE_EXTENSIONS))
        .await
        .map_err(|err| {
            error!(error = %err, "scan task failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

#[derive(Debug, Default, Deserialize)]
struct IndexParams {
    theme: Option<String>,
    show_info: Option<String>,
}

async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let records = scan_source(&state).await?;

    let requested_theme = params.theme.as_deref().map(Theme::from_param);
    let options = state.config.display.render_options(
        requested_theme.or_else(|| theme_cookie(&headers)),
        params.show_info.as_deref().map(|value| value == "true"),
    );
    debug!(images = records.len(), theme = %options.theme, show_info = options.show_info, "rendering gallery");

    let directory = display_directory(&state.source);
    let page = generate::render_page(&records, &state.config, options, &directory);
    let mut response = Html(page.into_string()).into_response();

    if let Some(theme) = requested_theme {
        let cookie = match theme {
            Theme::Light => SET_THEME_LIGHT,
            Theme::Dark => SET_THEME_DARK,
        };
        response
            .headers_mut()
            .insert(header::SET_COOKIE, HeaderValue::from_static(cookie));
    }
    Ok(response)
}

/// Theme stored by an earlier `?theme=` request, if any.
fn theme_cookie(headers: &HeaderMap) -> Option<Theme> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == THEME_COOKIE)
        .map(|(_, value)| Theme::from_param(value))
}

async fn api_images(State(state): State<AppState>) -> Result<Json<Vec<ImageRecord>>, StatusCode> {
    scan_source(&state).await.map(Json)
}

async fn serve_image(
    State(state): State<AppState>,
    UrlPath(filename): UrlPath<String>,
) -> Response {
    if !is_servable_name(&filename) {
        return not_found();
    }

    let path = state.source.join(&filename);
    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return not_found();
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, content_type(&filename))],
            bytes,
        )
            .into_response(),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "failed to read image");
            not_found()
        }
    }
}

/// A bare file name the scanner would list. Anything with a path
/// separator is rejected before touching the filesystem.
fn is_servable_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && scan::is_listable_name(name, IMAGE_EXTENSIONS)
}

fn content_type(filename: &str) -> &'static str {
    let ext = file_extension(filename)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}
