//! HTTP handler for the embedded placeholder storefront.

use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use crate::static_assets::Assets;

/// Long-lived caching for files under `assets/`, none for pages
fn cache_control(path: &str) -> &'static str {
    if path.starts_with("assets/") {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache"
    }
}

fn asset_response(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (header::CACHE_CONTROL, cache_control(path).to_string()),
        ],
        Body::from(data),
    )
        .into_response()
}

/// Serve embedded static assets, falling back to the landing page for unknown paths.
///
/// Unmatched `/api/*` paths are a 404 rather than HTML, so API clients never get a page back.
#[instrument]
pub async fn serve_embedded_asset(uri: Uri) -> Response {
    let mut path = uri.path().trim_start_matches('/');

    if path == "api" || path.starts_with("api/") {
        return StatusCode::NOT_FOUND.into_response();
    }

    if path.is_empty() || path.ends_with('/') {
        path = "index.html";
    }

    if let Some(content) = Assets::get(path) {
        return asset_response(path, content.data.into_owned());
    }

    debug!("No embedded asset for {}, serving index.html", uri.path());
    match Assets::get("index.html") {
        Some(index) => asset_response("index.html", index.data.into_owned()),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
