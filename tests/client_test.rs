use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tracking51_client_rs::{
    Config, CreateTrackRequest, Error, TrackingClient, TrackingItem, TracksQueryParams,
};

fn test_config(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        retry_wait_ms: 10,
        retry_max_wait_ms: 20,
        ..Config::new("test-key")
    }
}

fn client(server: &MockServer) -> TrackingClient {
    TrackingClient::new(test_config(server)).unwrap()
}

fn ok_body(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 200,
        "message": "ok",
        "data": data,
    }))
}

fn rate_limited() -> ResponseTemplate {
    ResponseTemplate::new(429).set_body_json(json!({
        "code": 429,
        "message": "too many requests",
    }))
}

#[tokio::test]
async fn profile_sends_auth_headers_and_decodes_the_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header("Tracking-Api-Key", "test-key"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .respond_with(ok_body(json!({
            "email": "owner@example.com",
            "regtime": 1600000000i64,
            "phone": "",
            "sms": 12,
            "track_number": 345,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client(&server).account().profile().await.unwrap();
    assert_eq!(profile.email, "owner@example.com");
    assert_eq!(profile.sms, 12);
    assert_eq!(profile.track_number, 345);
}

#[tokio::test]
async fn api_error_codes_map_through_the_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 401,
            "message": "raw body message",
        })))
        .mount(&server)
        .await;

    let err = client(&server).account().profile().await.unwrap_err();
    match err {
        Error::Api { code, ref message } => {
            assert_eq!(code, 401);
            assert_eq!(message, "authorization failed, check that the API key is correct");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limited_requests_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(rate_limited())
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ok_body(json!({"email": "owner@example.com"})))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client(&server).account().profile().await.unwrap();
    assert_eq!(profile.email, "owner@example.com");
}

#[tokio::test]
async fn retry_budget_exhaustion_surfaces_the_last_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(rate_limited())
        .expect(3) // initial attempt plus two retries
        .mount(&server)
        .await;

    let err = client(&server).account().profile().await.unwrap_err();
    match err {
        Error::RetryExhausted { attempts, last } => {
            assert_eq!(attempts, 2);
            assert!(matches!(*last, Error::Api { code: 429, .. }));
        }
        other => panic!("expected retry exhaustion, got {other:?}"),
    }
}

#[tokio::test]
async fn a_rate_limit_code_behind_http_200_still_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 429,
            "message": "too many requests",
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ok_body(json!({"email": "owner@example.com"})))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client(&server).account().profile().await.unwrap();
    assert_eq!(profile.email, "owner@example.com");
}

fn tracks(n: usize) -> serde_json::Value {
    let items: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "tracking_number": format!("N{i}"),
                "courier_code": "china-post",
            })
        })
        .collect();
    json!(items)
}

#[tokio::test]
async fn a_full_page_is_not_the_last_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("items_amount", "100"))
        .and(query_param("pages_amount", "1"))
        .respond_with(ok_body(tracks(100)))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .tracking()
        .query(&TracksQueryParams::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 100);
    assert!(!page.is_last_page);
}

#[tokio::test]
async fn a_short_page_is_the_last_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ok_body(tracks(57)))
        .mount(&server)
        .await;

    let page = client(&server)
        .tracking()
        .query(&TracksQueryParams::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 57);
    assert!(page.is_last_page);
}

#[tokio::test]
async fn the_throttle_spaces_consecutive_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ok_body(json!({"email": "owner@example.com"})))
        .expect(2)
        .mount(&server)
        .await;

    let config = Config {
        interval_ms: 1000,
        ..test_config(&server)
    };
    let client = TrackingClient::new(config).unwrap();

    let started = Instant::now();
    client.account().profile().await.unwrap();
    client.account().profile().await.unwrap();
    assert!(
        started.elapsed() >= Duration::from_millis(1000),
        "second dispatch ran {:?} after the first",
        started.elapsed()
    );
}

#[tokio::test]
async fn invalid_requests_never_reach_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/create"))
        .respond_with(ok_body(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .tracking()
        .create(&CreateTrackRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn delete_posts_the_batch_and_splits_the_outcome() {
    let server = MockServer::start().await;
    let items = [
        TrackingItem {
            tracking_number: "N1".into(),
            courier_code: "china-post".into(),
        },
        TrackingItem {
            tracking_number: "N2".into(),
            courier_code: "usps".into(),
        },
    ];
    Mock::given(method("DELETE"))
        .and(path("/delete"))
        .and(body_json(json!([
            {"tracking_number": "N1", "courier_code": "china-post"},
            {"tracking_number": "N2", "courier_code": "usps"},
        ])))
        .respond_with(ok_body(json!({
            "success": [{"tracking_number": "N1", "courier_code": "china-post"}],
            "error": [{"tracking_number": "N2", "courier_code": "usps"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).tracking().delete(&items).await.unwrap();
    assert_eq!(result.success, vec![items[0].clone()]);
    assert_eq!(result.error, vec![items[1].clone()]);
}

#[tokio::test]
async fn courier_list_falls_back_to_chinese_for_unknown_languages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courier"))
        .and(query_param("lang", "cn"))
        .respond_with(ok_body(json!([{
            "courier_name": "中国邮政",
            "courier_code": "china-post",
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let couriers = client(&server).courier().list("de").await.unwrap();
    assert_eq!(couriers.len(), 1);
    assert_eq!(couriers[0].code, "china-post");
}

#[tokio::test]
async fn transport_level_failures_surface_as_status_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>bad gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).account().profile().await.unwrap_err();
    match err {
        Error::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("bad gateway"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
