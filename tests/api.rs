use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use music_discovery_server::{
    api::routes::create_router,
    config::Config,
    probe::fetcher::{Fetcher, ProbeRequest},
    probe::{FetchError, RawResponse},
    AppState,
};
use serde_json::Value;
use tower::util::ServiceExt;

enum Behaviour {
    Page(&'static str),
    TimeOut,
    Panic,
}

struct StubFetcher(Behaviour);

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, request: &ProbeRequest) -> Result<RawResponse, FetchError> {
        match &self.0 {
            Behaviour::Page(body) => Ok(RawResponse {
                body: body.to_string(),
                status: 200,
                size: body.len(),
            }),
            Behaviour::TimeOut => Err(FetchError::Timeout(request.timeout())),
            Behaviour::Panic => panic!("fetcher exploded"),
        }
    }
}

fn app_with(behaviour: Behaviour, target: Option<&str>) -> Router {
    let target = target.map(str::to_string);
    let config = Config::from_lookup(|key| match key {
        "PROBE_TARGET_URL" => target.clone(),
        _ => None,
    })
    .unwrap();

    create_router(AppState {
        config: Arc::new(config),
        fetcher: Arc::new(StubFetcher(behaviour)),
    })
}

fn app() -> Router {
    app_with(Behaviour::Page("<title>Home</title>"), None)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn index_lists_endpoints() {
    let (status, body) = get(app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["message"].is_string());
    for path in ["/api/music/search", "/api/music/hot", "/api/music/categories", "/api/scrape/test"] {
        assert!(body["endpoints"][path].is_string(), "missing {}", path);
    }
}

#[tokio::test]
async fn search_without_keyword_is_rejected() {
    let (status, body) = get(app(), "/api/music/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn search_with_blank_keyword_is_rejected() {
    let (status, body) = get(app(), "/api/music/search?keyword=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn search_returns_first_page_by_default() {
    let (status, body) = get(app(), "/api/music/search?keyword=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["limit"], 20);
    let songs = body["data"]["songs"].as_array().unwrap();
    assert!(!songs.is_empty());
    assert_eq!(songs[0]["title"], "abc - 示例歌曲1");
    assert_eq!(songs[0]["artist"], "示例歌手1");
    assert_eq!(songs[0]["duration"], "03:45");
    assert!(songs[0].get("playCount").is_none());
}

#[tokio::test]
async fn search_honours_paging_params() {
    let (status, body) = get(app(), "/api/music/search?keyword=abc&page=4&limit=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page"], 4);
    assert_eq!(body["data"]["limit"], 5);
}

#[tokio::test]
async fn non_numeric_page_is_rejected() {
    let (status, body) = get(app(), "/api/music/search?keyword=abc&page=two").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn hot_defaults_to_fifty_per_page() {
    let (status, body) = get(app(), "/api/music/hot").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["limit"], 50);
    assert_eq!(body["data"]["total"], 200);
    assert_eq!(body["data"]["songs"][0]["playCount"], 1_000_000);
    assert_eq!(body["data"]["songs"][0]["title"], "热门歌曲1");
}

#[tokio::test]
async fn categories_match_reference_list() {
    let (status, body) = get(app(), "/api/music/categories").await;

    assert_eq!(status, StatusCode::OK);
    let categories = body["data"]["categories"].as_array().unwrap();
    let triples: Vec<(u64, &str, u64)> = categories
        .iter()
        .map(|c| {
            (
                c["id"].as_u64().unwrap(),
                c["name"].as_str().unwrap(),
                c["count"].as_u64().unwrap(),
            )
        })
        .collect();

    assert_eq!(
        triples,
        vec![
            (1, "流行", 5000),
            (2, "摇滚", 3200),
            (3, "电子", 2800),
            (4, "古典", 1500),
            (5, "爵士", 1200),
            (6, "民谣", 2000),
        ]
    );
}

#[tokio::test]
async fn probe_reports_page_signals() {
    let page = r#"<title>Charts</title><a href="/music/1">a</a><div class="track"></div>"#;
    let (status, body) = get(app_with(Behaviour::Page(page), None), "/api/scrape/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["message"].is_string());
    let axios = &body["data"]["methods"]["axios"];
    assert_eq!(axios["success"], true);
    assert_eq!(axios["statusCode"], 200);
    assert_eq!(axios["responseSize"], page.len());
    assert_eq!(axios["pageInfo"]["title"], "Charts");
    assert_eq!(axios["pageInfo"]["musicElements"]["songLinks"], 1);
    assert_eq!(axios["pageInfo"]["musicElements"]["musicContainers"], 1);
    assert_eq!(body["data"]["status"], "success");
}

#[tokio::test]
async fn probe_timeout_still_returns_ok_envelope() {
    let (status, body) = get(app_with(Behaviour::TimeOut, None), "/api/scrape/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "success");
    let axios = &body["data"]["methods"]["axios"];
    assert_eq!(axios["success"], false);
    assert!(!axios["error"].as_str().unwrap().is_empty());
    assert!(axios.get("pageInfo").is_none());
    assert!(body["data"]["timestamp"].is_string());
}

#[tokio::test]
async fn probe_with_invalid_target_is_server_error() {
    let app = app_with(Behaviour::Page(""), Some("not a url"));
    let (status, body) = get(app, "/api/scrape/test").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
    assert!(body["error"].as_str().unwrap().contains("not a url"));
}

#[tokio::test]
async fn panicking_fetcher_surfaces_cause() {
    let (status, body) = get(app_with(Behaviour::Panic, None), "/api/scrape/test").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
    assert!(body["error"].as_str().unwrap().contains("fetcher exploded"));
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let (status, body) = get(app(), "/api/music/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "endpoint not found");
}

#[tokio::test]
async fn timeout_error_mentions_configured_duration() {
    let (_, body) = get(app_with(Behaviour::TimeOut, None), "/api/scrape/test").await;
    let expected = format!("timeout of {}ms exceeded", Duration::from_secs(10).as_millis());

    assert_eq!(body["data"]["methods"]["axios"]["error"], expected);
}
