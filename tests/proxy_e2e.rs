//! End-to-end tests for the proxy pipeline.
//!
//! Each test spawns a programmable mock gateway and a proxy instance on
//! ephemeral loopback ports and drives them with a real HTTP client.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::{json, Value};

mod common;
use common::{
    client, recent_saves_payload, recommendations_payload, start_fixed_gateway,
    start_mock_gateway, start_proxy, SESSION_COOKIES,
};

fn full_item(index: usize) -> Value {
    json!({
        "__typename": "Item",
        "wordCount": 100 + index,
        "topImage": {"url": format!("https://img.example.com/{index}.jpg")},
        "title": format!("Title {index}"),
        "resolvedUrl": format!("https://example.com/resolved-{index}"),
        "givenUrl": format!("https://example.com/given-{index}"),
        "excerpt": "Excerpt",
        "domain": "example.com"
    })
}

// Scenario A: invalid count terminates locally with a field-scoped 400.
#[tokio::test]
async fn test_invalid_count_yields_400_without_upstream_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let gateway = start_mock_gateway(move |_request| {
        counted.fetch_add(1, Ordering::SeqCst);
        (StatusCode::OK, HeaderMap::new(), recent_saves_payload(vec![]))
    })
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves?count=0"))
        .header("consumer_key", "ck-test")
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["status"], "400");
    assert_eq!(body["errors"][0]["source"]["parameters"], "count");

    assert_eq!(calls.load(Ordering::SeqCst), 0, "no upstream call may be made");
}

// Scenario B: recognized nodes map, unrecognized nodes drop silently.
#[tokio::test]
async fn test_unrecognized_variants_are_filtered_from_response() {
    let gateway = start_fixed_gateway(recent_saves_payload(vec![
        full_item(0),
        json!({"__typename": "FutureVariant", "mystery": true}),
        full_item(1),
        json!({"__typename": "PendingItem"}),
    ]))
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves?count=5"))
        .header("consumer_key", "ck-test")
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let data = body["data"].as_array().unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["__typename"], "Save");
    assert_eq!(data[0]["topImageUrl"], "https://img.example.com/0.jpg");
    assert_eq!(data[2]["__typename"], "PendingSave");
}

// Scenario C: a bare transport failure surfaces as a fully generic 500.
#[tokio::test]
async fn test_transport_failure_yields_generic_500() {
    // bind and immediately drop a listener so the port is closed
    let dead_port = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let proxy = start_proxy(dead_port).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves"))
        .header("consumer_key", "ck-test")
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let text = response.text().await.unwrap();
    let body: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(body["errors"][0]["status"], "500");
    assert_eq!(body["errors"][0]["title"], "Internal Server Error");
    // nothing from the underlying error may leak into the body
    for fragment in ["refused", "connect", "tcp", "127.0.0.1"] {
        assert!(
            !text.to_lowercase().contains(fragment),
            "body leaked transport detail {fragment:?}: {text}"
        );
    }
}

// Scenario D: the auth marker is found regardless of nesting depth.
#[tokio::test]
async fn test_nested_unauthenticated_marker_classifies_as_401() {
    let gateway = start_fixed_gateway(json!({
        "errors": [{
            "message": "500: Internal Server Error",
            "extensions": {
                "response": {
                    "status": 500,
                    "body": {
                        "errors": [{
                            "message": "You must be logged in to use this service",
                            "extensions": {"code": "UNAUTHENTICATED"}
                        }]
                    }
                },
                "code": "INTERNAL_SERVER_ERROR"
            }
        }],
        "data": {"user": {"savedItems": null}}
    }))
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves"))
        .header("consumer_key", "ck-test")
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["title"], "Unauthorized");
}

#[tokio::test]
async fn test_unclassified_gateway_errors_become_502_with_redacted_title() {
    let gateway = start_fixed_gateway(json!({
        "errors": [{"message": "resolver exploded: stack trace here"}]
    }))
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves"))
        .header("consumer_key", "ck-test")
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.unwrap();
    let error = &body["errors"][0];

    assert_eq!(error["title"], "Bad Gateway");
    assert!(error.get("detail").is_none());
    // the raw rendering lives only in the internal correlation field
    assert!(error["source"]["upstreamError"]
        .as_str()
        .unwrap()
        .contains("resolver exploded"));
}

#[tokio::test]
async fn test_missing_consumer_key_is_rejected_before_upstream() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let gateway = start_mock_gateway(move |_request| {
        counted.fetch_add(1, Ordering::SeqCst);
        (StatusCode::OK, HeaderMap::new(), recent_saves_payload(vec![]))
    })
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves"))
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_incomplete_session_is_rejected_before_upstream() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let gateway = start_mock_gateway(move |_request| {
        counted.fetch_add(1, Ordering::SeqCst);
        (StatusCode::OK, HeaderMap::new(), recent_saves_payload(vec![]))
    })
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves"))
        .header("consumer_key", "ck-test")
        .header("cookie", "a95b4b6=user123")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["title"], "Unauthorized");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_recent_saves_forwards_session_and_identification_upstream() {
    let seen = Arc::new(Mutex::new(Vec::<(HeaderMap, Option<String>, Value)>::new()));
    let capture = seen.clone();
    let gateway = start_mock_gateway(move |request| {
        capture
            .lock()
            .unwrap()
            .push((request.headers, request.query, request.body));
        (StatusCode::OK, HeaderMap::new(), recent_saves_payload(vec![]))
    })
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves?count=3"))
        .header("consumer_key", "ck-test")
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let seen = seen.lock().unwrap();
    let (headers, query, body) = &seen[0];

    assert_eq!(headers.get("cookie").unwrap(), SESSION_COOKIES);
    assert_eq!(headers.get("apollographql-client-name").unwrap(), "bff-proxy");

    let query = query.as_deref().unwrap();
    assert!(query.contains("consumer_key=ck-test"));
    assert!(query.contains("enable_cors=1"));

    // validated variables, not raw strings
    assert_eq!(body["variables"]["pagination"]["first"], 3);
    assert!(body["query"].as_str().unwrap().contains("RecentSaves"));
}

#[tokio::test]
async fn test_recommendations_call_is_anonymous() {
    let seen = Arc::new(Mutex::new(Vec::<HeaderMap>::new()));
    let capture = seen.clone();
    let gateway = start_mock_gateway(move |request| {
        capture.lock().unwrap().push(request.headers);
        (
            StatusCode::OK,
            HeaderMap::new(),
            recommendations_payload(json!("fx"), 2),
        )
    })
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!(
            "http://{proxy}/desktop/v1/recommendations?locale=en-US"
        ))
        .header("consumer_key", "ck-test")
        // the client's own session must not leak to the public gateway
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let seen = seen.lock().unwrap();
    assert!(seen[0].get("cookie").is_none());
    assert_eq!(seen[0].get("apollographql-client-name").unwrap(), "bff-proxy");
}

#[tokio::test]
async fn test_recommendations_enrich_urls_and_keep_absent_fields_null() {
    let gateway = start_fixed_gateway(recommendations_payload(json!("fx-newtab"), 2)).await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!(
            "http://{proxy}/desktop/v1/recommendations?locale=de&count=2"
        ))
        .header("consumer_key", "ck-test")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let data = body["data"].as_array().unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["__typename"], "Recommendation");
    assert_eq!(
        data[0]["url"],
        "https://example.com/story-0?utm_source=fx-newtab"
    );
}

#[tokio::test]
async fn test_recommendations_validation_reports_all_violations() {
    let gateway = start_fixed_gateway(recommendations_payload(json!("fx"), 1)).await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!(
            "http://{proxy}/desktop/v1/recommendations?count=99"
        ))
        .header("consumer_key", "ck-test")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["source"]["parameters"], "count");
    assert_eq!(errors[1]["source"]["parameters"], "locale");
}

#[tokio::test]
async fn test_global_recs_serves_legacy_envelope() {
    let seen = Arc::new(Mutex::new(Vec::<Value>::new()));
    let capture = seen.clone();
    let gateway = start_mock_gateway(move |request| {
        capture.lock().unwrap().push(request.body);
        (
            StatusCode::OK,
            HeaderMap::new(),
            recommendations_payload(json!("fx"), 1),
        )
    })
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!(
            "http://{proxy}/v3/firefox/global-recs?locale_lang=en-GB"
        ))
        .header("consumer_key", "ck-test")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["status"], 1);
    assert_eq!(body["spocs"], json!([]));
    assert_eq!(body["settings"]["recsExpireTime"], 5400);
    let item = &body["recommendations"][0];
    assert_eq!(item["domain"], "The Example");
    assert!(item["image_src"].as_str().unwrap().contains("resize=w450"));

    // the legacy spelling mapped onto the gateway variables, with the
    // legacy default count
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0]["variables"]["locale"], "en-GB");
    assert_eq!(seen[0]["variables"]["count"], 20);
}

#[tokio::test]
async fn test_deny_listed_response_headers_are_not_forwarded() {
    let gateway = start_mock_gateway(move |_request| {
        let mut headers = HeaderMap::new();
        headers.insert("x-gateway-region", HeaderValue::from_static("us-east-1"));
        headers.insert("user-agent", HeaderValue::from_static("gateway-bot"));
        (
            StatusCode::OK,
            headers,
            recent_saves_payload(vec![full_item(0)]),
        )
    })
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves"))
        .header("consumer_key", "ck-test")
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("x-gateway-region").unwrap(),
        "us-east-1"
    );
    assert!(response.headers().get("user-agent").is_none());
    // our own content type survives the forwarding pass
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));
}

#[tokio::test]
async fn test_gateway_headers_are_forwarded_on_classified_errors_too() {
    let gateway = start_mock_gateway(move |_request| {
        let mut headers = HeaderMap::new();
        headers.insert("x-gateway-trace", HeaderValue::from_static("trace-1"));
        (
            StatusCode::OK,
            headers,
            json!({"errors": [{"message": "unmatched"}]}),
        )
    })
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves"))
        .header("consumer_key", "ck-test")
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    assert_eq!(response.headers().get("x-gateway-trace").unwrap(), "trace-1");
}

// multi-thread runtime: the responder blocks its worker to simulate a stuck
// gateway while the proxy keeps serving
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_upstream_timeout_yields_generic_500() {
    let gateway = start_mock_gateway(move |_request| {
        std::thread::sleep(std::time::Duration::from_secs(4));
        (StatusCode::OK, HeaderMap::new(), recent_saves_payload(vec![]))
    })
    .await;
    let proxy = start_proxy(gateway).await;

    let response = client()
        .get(format!("http://{proxy}/desktop/v1/recent-saves"))
        .header("consumer_key", "ck-test")
        .header("cookie", SESSION_COOKIES)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["title"], "Internal Server Error");
}
