use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, FixedOffset, TimeZone};
use http_body_util::BodyExt;
use nr_core::{CandidateArticle, Engine, Error, Result, RuleSet, SearchPage, SearchRequest};
use nr_search::{FixtureSource, NewsSource};
use nr_web::{create_app, AppState, Clock};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
        .unwrap()
}

fn candidate(title: &str, description: &str, pub_date: &str) -> CandidateArticle {
    CandidateArticle {
        title: title.to_string(),
        original_link: Some(format!("https://news.example.com/{}", title.len())),
        link: format!("https://n.news.naver.com/{}", title.len()),
        description: description.to_string(),
        pub_date: pub_date.to_string(),
    }
}

/// Counts calls so tests can prove a request never reached the provider.
struct CountingSource {
    calls: AtomicUsize,
    result: fn() -> Result<SearchPage>,
}

#[async_trait]
impl NewsSource for CountingSource {
    fn name(&self) -> &str {
        "Counting"
    }

    async fn search(&self, _request: &SearchRequest) -> Result<SearchPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.result)()
    }
}

fn engine() -> Engine {
    Engine::new(Arc::new(RuleSet::builtin().unwrap()))
}

async fn app_with(source: Arc<dyn NewsSource>) -> axum::Router {
    let state = AppState::new(source, engine()).with_clock(Clock::Pinned(now()));
    create_app(state).await
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_ranked_envelope() {
    let mut items = vec![
        candidate(
            "<b>관세청</b> 마약 밀수 적발",
            "세관에서 대규모 마약 밀수를 적발했다",
            "Mon, 19 Oct 2026 09:30:00 +0900",
        ),
        candidate("관세청 마약 적발", "김건희 관련 수사", "Mon, 19 Oct 2026 10:00:00 +0900"),
        candidate("부산세관 통관 혁신", "", "Sun, 18 Oct 2026 10:00:00 +0900"),
        candidate("경찰 마약 수사", "검거", "Mon, 19 Oct 2026 10:00:00 +0900"),
        candidate("관세청장 간담회", "", "Mon, 28 Sep 2026 10:00:00 +0900"),
    ];
    // Filler that passes every gate, to exercise truncation.
    for i in 0..20 {
        items.push(candidate(
            &format!("세관 소식 {}", i),
            "",
            "Mon, 19 Oct 2026 08:00:00 +0900",
        ));
    }
    let source = FixtureSource::new(SearchPage { total: 4321, items });
    let (status, body) = get(app_with(Arc::new(source)).await, "/api/news?query=%EA%B4%80%EC%84%B8%EC%B2%AD").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_scanned"], 4321);
    // 1 drug bust + 1 Busan customs + 20 filler; excluded, off-topic and stale are gone.
    assert_eq!(body["filtered_count"], 22);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 15);
    assert_eq!(items[0]["title"], "관세청 마약 밀수 적발");
    assert_eq!(items[0]["pubDate"], "Mon, 19 Oct 2026 09:30:00 +0900");
    assert!(items[0]["originallink"].is_string());
    assert!(items.iter().all(|item| !item["description"].as_str().unwrap().contains("김건희")));
    assert!(body.get("message").is_none());

    let scores: Vec<u64> = items.iter().map(|i| i["score"].as_u64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_zero_matches_is_not_an_error() {
    let source = FixtureSource::new(SearchPage::default());
    let (status, body) = get(app_with(Arc::new(source)).await, "/api/news?query=%EC%84%B8%EA%B4%80").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_scanned"], 0);
    assert_eq!(body["filtered_count"], 0);
    assert_eq!(body["items"], serde_json::json!([]));
    assert_eq!(body["message"], "네이버 검색 결과가 0건입니다. 검색어: 세관");
}

#[tokio::test]
async fn test_invalid_parameters_never_reach_provider() {
    let source = Arc::new(CountingSource {
        calls: AtomicUsize::new(0),
        result: || Ok(SearchPage::default()),
    });

    for uri in [
        "/api/news?display=0",
        "/api/news?display=101",
        "/api/news?display=lots",
        "/api/news?sort=random",
        "/api/news?query=a&query=b",
    ] {
        let (status, body) = get(app_with(source.clone()).await, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert!(body["error"].is_string());
    }
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_query_string_gets_json_error() {
    let source = Arc::new(CountingSource {
        calls: AtomicUsize::new(0),
        result: || Ok(SearchPage::default()),
    });
    let (status, body) = get(app_with(source.clone()).await, "/api/news?query=a&query=b").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid parameter"), "error: {}", message);
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_query_without_default_is_bad_request() {
    let source = Arc::new(CountingSource {
        calls: AtomicUsize::new(0),
        result: || Ok(SearchPage::default()),
    });
    let mut rules = RuleSet::builtin().unwrap();
    rules.search_query.clear();
    let state = AppState::new(source.clone(), Engine::new(Arc::new(rules)));

    let (status, body) = get(create_app(state).await, "/api/news").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required parameter: query");
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_server_error() {
    let source = Arc::new(CountingSource {
        calls: AtomicUsize::new(0),
        result: || Err(Error::Upstream("401 Unauthorized (024): Authentication failed".to_string())),
    });
    let (status, body) = get(app_with(source.clone()).await, "/api/news").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Server Error: Upstream error: 401 Unauthorized (024): Authentication failed"
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_legacy_function_path() {
    let source = FixtureSource::new(SearchPage {
        total: 1,
        items: vec![candidate("관세청 발표", "", "Mon, 19 Oct 2026 09:30:00 +0900")],
    });
    let (status, body) = get(app_with(Arc::new(source)).await, "/.netlify/functions/navernews").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filtered_count"], 1);
}
