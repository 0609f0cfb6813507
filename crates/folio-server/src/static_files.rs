//! Static file serving.
//!
//! The reader stylesheet and script under `assets/` are embedded into the
//! binary. `highlight.css` is generated from the code highlighting theme the
//! first time it is requested.

use std::sync::{Arc, LazyLock};

use axum::Router;
use axum::extract::Path;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::state::AppState;

/// Reader assets compiled into the binary.
#[derive(rust_embed::RustEmbed)]
#[folder = "assets"]
struct Assets;

/// Name under which the generated highlight stylesheet is served.
pub(crate) const HIGHLIGHT_CSS: &str = "highlight.css";

const CACHE_CONTROL: &str = "public, max-age=3600";

static HIGHLIGHT_THEME: LazyLock<String> =
    LazyLock::new(|| match folio_renderer::theme_css() {
        Ok(css) => css,
        Err(e) => {
            tracing::warn!(error = %e, "Code highlighting stylesheet unavailable");
            String::new()
        }
    });

/// Create router for `/assets/*`.
pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new().route("/assets/{file}", get(serve_asset))
}

/// MIME type for an asset path.
fn mime_for(path: &str) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

/// Look up an asset's contents.
fn asset(file: &str) -> Option<Vec<u8>> {
    if file == HIGHLIGHT_CSS {
        return Some(HIGHLIGHT_THEME.as_bytes().to_vec());
    }
    Assets::get(file).map(|f| f.data.into_owned())
}

async fn serve_asset(Path(file): Path<String>) -> Response {
    let Some(content) = asset(&file) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Ok(mime) = HeaderValue::from_str(&mime_for(&file)) else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    (
        [
            (header::CONTENT_TYPE, mime),
            (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL)),
        ],
        content,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_mime_for_assets() {
        assert_eq!(mime_for("reader.css"), "text/css");
        assert_eq!(mime_for("reader.js"), "text/javascript");
        assert_eq!(mime_for("blob.unknown_ext"), "application/octet-stream");
    }

    #[test]
    fn test_embedded_assets() {
        assert!(asset("reader.css").is_some());
        assert!(asset("../Cargo.toml").is_none());
        assert!(asset("missing.js").is_none());
    }

    #[test]
    fn test_script_reads_copy_delay_from_button() {
        let script = String::from_utf8(asset("reader.js").unwrap()).unwrap();
        assert!(script.contains("dataset.copyMs"));
        assert!(script.contains("video-loader"));
    }

    #[test]
    fn test_highlight_stylesheet_is_generated() {
        let css = String::from_utf8(asset(HIGHLIGHT_CSS).unwrap()).unwrap();
        assert!(css.contains(".hl-"));
    }
}
