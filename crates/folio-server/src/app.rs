//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let page_routes = Router::new()
        .route("/", get(handlers::catalogue::get_catalogue))
        .route("/subjects/{subject_id}", get(handlers::subjects::get_subject))
        .route(
            "/subjects/{subject_id}/{sub_title_id}",
            get(handlers::subjects::get_sub_title),
        );

    let api_routes = Router::new()
        .route(
            "/api/subjects/{subject_id}/nav",
            get(handlers::navigation::get_navigation),
        )
        .route("/health", get(handlers::health));

    let [csp, nosniff, frame_options] = security::layers();
    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .merge(static_files::static_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(csp)
                .layer(nosniff)
                .layer(frame_options),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use folio_api::{
        ComponentEntry, ImageUrlResolver, MockContentApi, PageComponent, PublishStatus, Subject,
    };
    use folio_navigator::MISSING_SUBJECT_MESSAGE;
    use folio_renderer::RenderOptions;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    fn heading(text: &str) -> ComponentEntry {
        ComponentEntry::Single(PageComponent {
            component_type: Some("h2".to_owned()),
            description: Some(text.to_owned()),
            ..Default::default()
        })
    }

    fn api() -> MockContentApi {
        MockContentApi::new()
            .with_subject(1, "Rust")
            .with_subject(2, "Go")
            .with_subject_record(Subject {
                id: 3,
                name: "Drafts".to_owned(),
                description: String::new(),
                image: None,
                order: 3,
                publish_status: PublishStatus::Onhold,
            })
            .with_subject(4, "Empty")
            .with_main_title(10, 1, "Basics")
            .with_sub_title(100, 10, "Install")
            .with_sub_title(101, 10, "Hello world")
            .with_main_title(11, 1, "Ownership")
            .with_sub_title(110, 11, "Borrowing")
            .with_components(100, vec![heading("Installing rustup")])
            .with_components(110, vec![heading("Shared references")])
    }

    fn code(source: &str, language: &str) -> ComponentEntry {
        ComponentEntry::Single(PageComponent {
            component_type: Some("code".to_owned()),
            description: Some(source.to_owned()),
            language: Some(language.to_owned()),
            ..Default::default()
        })
    }

    fn router(api: MockContentApi) -> Router {
        create_router(Arc::new(AppState {
            api: Arc::new(api),
            images: ImageUrlResolver::new("http://localhost:3000/api"),
            options: RenderOptions::default(),
        }))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(router(api()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_catalogue_lists_published_subjects() {
        let (status, body) = get(router(api()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h2>Rust</h2>"));
        assert!(body.contains("<h2>Go</h2>"));
        assert!(!body.contains("Drafts"));
    }

    #[tokio::test]
    async fn test_catalogue_filter() {
        let (_, body) = get(router(api()), "/?q=RU").await;

        assert!(body.contains("<h2>Rust</h2>"));
        assert!(!body.contains("<h2>Go</h2>"));
        assert!(body.contains(r#"value="RU""#));
    }

    #[tokio::test]
    async fn test_catalogue_api_failure_is_inline_notice() {
        let (status, body) = get(router(api().failing("list_subjects", 500)), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"class="notice notice-error""#));
    }

    #[tokio::test]
    async fn test_subject_page_renders_default_sub_title() {
        let (status, body) = get(router(api()), "/subjects/1").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h2>Installing rustup</h2>"));
        assert!(body.contains(r#"aria-current="page" href="/subjects/1/100""#));
        assert!(body.contains(r#"href="/subjects/1/101">Hello world</a>"#));
    }

    #[tokio::test]
    async fn test_sub_title_page() {
        let (status, body) = get(router(api()), "/subjects/1/110").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h2>Shared references</h2>"));
        assert!(body.contains(r#"rel="prev" href="/subjects/1/101""#));
        assert!(!body.contains("rel=\"next\""));
    }

    #[tokio::test]
    async fn test_sub_title_without_components_is_empty_state() {
        let (status, body) = get(router(api()), "/subjects/1/101").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<p class="empty-state">"#));
    }

    #[tokio::test]
    async fn test_component_failure_is_inline_notice() {
        let api = api().failing("page_components", 500);
        let (status, body) = get(router(api), "/subjects/1/100").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<div class="notice notice-error" role="alert">"#));
        assert!(body.contains("Basics"));
    }

    #[tokio::test]
    async fn test_unknown_subject_is_not_found_page() {
        for uri in ["/subjects/99", "/subjects/3", "/subjects/4"] {
            let (status, body) = get(router(api()), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert!(body.contains(MISSING_SUBJECT_MESSAGE), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_foreign_sub_title_is_not_found() {
        let (status, _) = get(router(api()), "/subjects/1/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_subject_detail_failure_is_bad_gateway() {
        let api = api().failing("subject_detail", 503);
        let (status, body) = get(router(api), "/subjects/1").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("subject_detail failed"));
    }

    #[tokio::test]
    async fn test_navigation_json() {
        let (status, body) = get(router(api()), "/api/subjects/1/nav?subTitle=101").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["outline"]["selected"], 101);
        assert_eq!(json["neighbors"]["previous"]["sub_subject_id"], 100);
        assert_eq!(json["neighbors"]["next"]["sub_subject_id"], 110);
    }

    #[tokio::test]
    async fn test_navigation_json_not_found() {
        let (status, body) = get(router(api()), "/api/subjects/99/nav").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], MISSING_SUBJECT_MESSAGE);
        assert_eq!(json["subjectId"], 99);
    }

    #[tokio::test]
    async fn test_assets_and_security_headers() {
        let response = router(api())
            .oneshot(
                Request::builder()
                    .uri("/assets/reader.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::CONTENT_TYPE],
            "text/javascript"
        );
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert!(headers.contains_key("content-security-policy"));
    }

    #[tokio::test]
    async fn test_code_block_is_highlighted_with_copy_window() {
        let api = api()
            .with_sub_title(111, 11, "Lifetimes")
            .with_components(111, vec![code("fn main() {}", "rust")]);
        let (status, body) = get(router(api), "/subjects/1/111").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-copy-ms="2000""#));
        assert!(body.contains(r#"<code class="language-rust"><span class="hl-source hl-rust">"#));
        assert!(body.contains(r#"href="/assets/highlight.css""#));
    }

    #[tokio::test]
    async fn test_highlight_stylesheet_served() {
        let (status, body) = get(router(api()), "/assets/highlight.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(".hl-"));
    }

    #[tokio::test]
    async fn test_unknown_asset() {
        let (status, _) = get(router(api()), "/assets/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
