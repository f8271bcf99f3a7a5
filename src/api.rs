//! HTTP adapters: the site server (pages + proxy) and the standalone proxy handler.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::{
        HeaderMap, HeaderName, HeaderValue, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, HOST,
        },
    },
    response::{Html, IntoResponse, Response},
    routing::{MethodRouter, get, post},
};
use tokio::net::TcpListener;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::{
    cobalt::CobaltClient,
    config::{Config, non_empty},
    error::ApiError,
    pages::{API_DOWNLOAD_PATH, render_page},
    proxy::parse_download_request,
    response::json_response,
    sites::{self, DEFAULT_SITE, SiteConfig},
};

const PREFLIGHT_MAX_AGE_SECONDS: &str = "86400";

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    cobalt: CobaltClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let cobalt = CobaltClient::new(&config.cobalt_api_url)?;
        Ok(Self {
            config: Arc::new(config),
            cobalt,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Pages for every site plus the proxy endpoint.
pub fn site_router(state: AppState) -> Router {
    let proxy = with_cors_headers(
        Router::new()
            .route(API_DOWNLOAD_PATH, download_route())
            .route("/api/download/", download_route()),
    );

    Router::new()
        .route("/", get(index_page))
        .route("/{route}", get(site_page))
        .route("/{route}/", get(site_page))
        .merge(proxy)
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Only the proxy endpoint, answering on every path.
pub fn standalone_router(state: AppState) -> Router {
    with_cors_headers(
        Router::new()
            .route("/", download_route())
            .route("/{*path}", download_route()),
    )
    .with_state(state)
    .layer(TraceLayer::new_for_http())
}

pub async fn serve(router: Router, bind_addr: &str) -> Result<(), ApiError> {
    let listener = TcpListener::bind(bind_addr).await.map_err(|error| {
        ApiError::internal(format!("Could not bind {bind_addr}: {error}"))
    })?;

    info!("Listening on http://{bind_addr}");

    axum::serve(listener, router)
        .await
        .map_err(|error| ApiError::internal(format!("HTTP server error: {error}")))
}

fn download_route() -> MethodRouter<AppState> {
    post(download).options(preflight).fallback(method_not_allowed)
}

fn with_cors_headers(router: Router<AppState>) -> Router<AppState> {
    let header = |name: HeaderName, value: &'static str| {
        SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
    };

    router
        .layer(header(ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(header(ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .layer(header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
}

async fn download(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match parse_download_request(&body) {
        Ok(request) => request,
        Err(rejection) => {
            debug!("Rejected download request: {}", rejection.message_text());
            return rejection.into_response();
        }
    };

    debug!(
        "Proxying {:?} with {} option(s) to {}",
        request.url,
        request.options.len(),
        state.cobalt.endpoint()
    );
    let result = state.cobalt.send_download_request(&request).await;
    json_response(StatusCode::OK, &result)
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(
            ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(PREFLIGHT_MAX_AGE_SECONDS),
        )],
    )
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

async fn index_page(State(state): State<AppState>, headers: HeaderMap) -> Result<Html<String>, ApiError> {
    let site = sites::find_by_slug(DEFAULT_SITE).ok_or_else(ApiError::not_found)?;
    Ok(page(&state, &headers, site))
}

async fn site_page(
    State(state): State<AppState>,
    Path(route): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let site = sites::find_by_route(&route).ok_or_else(ApiError::not_found)?;
    Ok(page(&state, &headers, site))
}

fn page(state: &AppState, headers: &HeaderMap, site: &SiteConfig) -> Html<String> {
    let api_url = resolve_api_url(state.config(), headers);
    Html(render_page(site, &api_url))
}

/// Absolute proxy URL for the host the page was requested on.
fn resolve_api_url(config: &Config, headers: &HeaderMap) -> String {
    if let Some(configured) = &config.public_api_url {
        return configured.clone();
    }

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(non_empty)
    };

    let Some(host) = header(HOST.as_str()) else {
        return API_DOWNLOAD_PATH.to_string();
    };
    let scheme = header("x-forwarded-proto")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| matches!(*value, "http" | "https"))
        .unwrap_or("http");

    format!("{scheme}://{host}{API_DOWNLOAD_PATH}")
}
