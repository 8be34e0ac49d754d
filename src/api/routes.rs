use std::any::Any;
use std::collections::BTreeMap;

use axum::{
    routing::get,
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{CorsLayer, Any as AnyOrigin};
use tower_http::trace::TraceLayer;

use crate::error::{panic_message, AppError, Result, INTERNAL_ERROR_MESSAGE};
use crate::api::models::{PageQuery, SearchQuery, ServiceInfo};
use crate::api::response;
use crate::catalog;
use crate::probe;
use crate::AppState;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_SEARCH_LIMIT: u32 = 20;
const DEFAULT_HOT_LIMIT: u32 = 50;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/music/search", get(search_handler))
        .route("/api/music/hot", get(hot_handler))
        .route("/api/music/categories", get(categories_handler))
        .route("/api/scrape/test", get(scrape_test_handler))
        .fallback(not_found_handler)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .with_state(app_state)
}

async fn index_handler() -> impl IntoResponse {
    let endpoints = BTreeMap::from([
        ("/api/music/search", "GET - search songs by keyword"),
        ("/api/music/hot", "GET - list hot songs"),
        ("/api/music/categories", "GET - list music categories"),
        ("/api/scrape/test", "GET - probe the configured target page"),
    ]);

    axum::Json(ServiceInfo {
        message: "Music discovery server is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

async fn search_handler(query: std::result::Result<Query<SearchQuery>, QueryRejection>) -> Result<Response> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let keyword = query
        .keyword
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Please provide a search keyword".to_string()))?;
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

    tracing::debug!("Searching for '{}' (page {}, limit {})", keyword, page, limit);
    Ok(response::success(catalog::search(&keyword, page, limit)).into_response())
}

async fn hot_handler(query: std::result::Result<Query<PageQuery>, QueryRejection>) -> Result<Response> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_HOT_LIMIT);

    Ok(response::success(catalog::hot(page, limit)).into_response())
}

async fn categories_handler() -> impl IntoResponse {
    response::success(catalog::categories())
}

async fn scrape_test_handler(State(state): State<AppState>) -> Response {
    let probe_config = &state.config.probe;

    match probe::run_probe(state.fetcher.clone(), &probe_config.target_url, probe_config).await {
        Ok(report) => response::success_with_message("Probe test completed", report).into_response(),
        Err(err) => {
            tracing::error!("Probe test failed: {}", err);
            response::error_with_cause(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Probe test failed",
                err.to_string(),
            )
            .into_response()
        }
    }
}

async fn not_found_handler(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked: {}", panic_message(err.as_ref()));

    response::error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string()).into_response()
}
