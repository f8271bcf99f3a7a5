// Integration tests for the downloader page routes.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use cobalt_proxy::{api::{AppState, site_router}, config::Config};
use tower::util::ServiceExt;

fn app() -> axum::Router {
    let state = AppState::new(Config::with_cobalt_url("http://127.0.0.1:9").unwrap()).unwrap();
    site_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::HOST, "dl.example.com")
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn every_site_route_renders() {
    let routes = [
        ("/tiktok/", "TikTok"),
        ("/facebook/", "Facebook"),
        ("/instagram", "Instagram"),
        ("/youtube/", "YouTube"),
        ("/youtube-mp3/", "YouTube to MP3"),
        ("/all-in-one/", "All-in-One"),
    ];

    for (uri, name) in routes {
        let response = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        let html = body_text(response).await;
        assert!(html.contains(&format!("{name} Downloader")), "{uri}");
        assert!(html.contains(r#"data-api-url="http://dl.example.com/api/download""#));
    }
}

#[tokio::test]
async fn root_aliases_all_in_one() {
    let root = body_text(app().oneshot(get("/")).await.unwrap()).await;
    let all_in_one = body_text(app().oneshot(get("/all-in-one/")).await.unwrap()).await;
    assert_eq!(root, all_in_one);
}

#[tokio::test]
async fn youtube_mp3_page_requests_audio() {
    let html = body_text(app().oneshot(get("/youtube-mp3/")).await.unwrap()).await;
    assert!(html.contains(r#"{"downloadMode":"audio","audioFormat":"mp3"}"#));
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    for uri in ["/vimeo/", "/youtube_mp3/", "/some/deep/path"] {
        let response = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_text(response).await, r#"{"error":"Not found"}"#);
    }
}

#[tokio::test]
async fn pages_only_answer_get() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/tiktok/")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
