mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let app = common::app(common::memory_store());
    let resp = send(&app, "GET", "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["questions"], 3);
}

#[tokio::test]
async fn json_api_end_to_end() {
    let app = common::app(common::sqlite_store().await);

    let resp = send(&app, "POST", "/api/quiz/start", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::json_body(resp).await;
    assert_eq!(body["progress"], 0);
    assert_eq!(body["total"], 3);
    let token = body["token"].as_str().unwrap().to_string();

    let resp = send(&app, "GET", &format!("/api/quiz/{}", token), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::json_body(resp).await;
    assert_eq!(body["question"]["question"], "Q0");
    assert_eq!(body["progress"], 0);
    assert_eq!(body["number"], 1);
    assert_eq!(body["total"], 3);
    assert!(body["question"].get("correct_answer").is_none());

    for (answer, expected_progress, finished) in [("A", 1, false), ("X", 2, false)] {
        let resp = send(
            &app,
            "POST",
            &format!("/api/quiz/{}/answer", token),
            Some(json!({ "answer": answer })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = common::json_body(resp).await;
        assert_eq!(body["next_progress"], expected_progress);
        assert_eq!(body["finished"], finished);
    }

    let resp = send(&app, "GET", &format!("/api/quiz/{}/state", token), None).await;
    let body = common::json_body(resp).await;
    assert_eq!(body["state"], "awaiting_question");
    assert_eq!(body["progress"], 2);

    let resp = send(
        &app,
        "POST",
        &format!("/api/quiz/{}/summary", token),
        Some(json!({ "pending_answer": "C" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::json_body(resp).await;
    assert_eq!(body["correct_count"], 2);
    assert_eq!(body["total"], 3);
    let indices: Vec<i64> = body["answered_records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["question_index"].as_i64().unwrap())
        .collect();
    assert_eq!(indices, vec![0, 1, 2]);

    let resp = send(&app, "GET", &format!("/api/quiz/{}", token), None).await;
    let body = common::json_body(resp).await;
    assert_eq!(body, json!({ "finished": true }));

    let resp = send(&app, "GET", &format!("/api/quiz/{}/state", token), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::json_body(resp).await;
    assert_eq!(body, json!({ "state": "finished", "total": 3 }));

    let resp = send(
        &app,
        "POST",
        &format!("/api/quiz/{}/answer", token),
        Some(json!({ "answer": "A" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = common::json_body(resp).await;
    assert_eq!(body["error"], "no_current_question");
}

#[tokio::test]
async fn unknown_token_maps_to_not_found() {
    let app = common::app(common::memory_store());
    let resp = send(&app, "GET", "/api/quiz/does-not-exist", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = common::json_body(resp).await;
    assert_eq!(body["error"], "session_not_found");

    let resp = send(
        &app,
        "POST",
        "/api/quiz/does-not-exist/answer",
        Some(json!({ "answer": "A" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_answer_field_is_stored_as_empty() {
    let app = common::app(common::memory_store());
    let body = common::json_body(send(&app, "POST", "/api/quiz/start", None).await).await;
    let token = body["token"].as_str().unwrap().to_string();

    let resp = send(&app, "POST", &format!("/api/quiz/{}/answer", token), Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "POST", &format!("/api/quiz/{}/summary", token), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::json_body(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["correct_count"], 0);
    assert_eq!(body["answered_records"][0]["user_answer"], "");
}

#[tokio::test]
async fn oversized_answer_is_rejected() {
    let app = common::app(common::memory_store());
    let body = common::json_body(send(&app, "POST", "/api/quiz/start", None).await).await;
    let token = body["token"].as_str().unwrap().to_string();

    let resp = send(
        &app,
        "POST",
        &format!("/api/quiz/{}/answer", token),
        Some(json!({ "answer": "x".repeat(2000) })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, "GET", &format!("/api/quiz/{}/state", token), None).await;
    let body = common::json_body(resp).await;
    assert_eq!(body["progress"], 0);
}

async fn start_token(app: &Router) -> String {
    let body = common::json_body(send(app, "POST", "/api/quiz/start", None).await).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn malformed_pending_answer_is_rejected_without_submitting() {
    let app = common::app(common::memory_store());
    let token = start_token(&app).await;
    let uri = format!("/api/quiz/{}/summary", token);

    let resp = send(&app, "POST", &uri, Some(json!({ "pending_answer": 5 }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = common::json_body(resp).await;
    assert_eq!(body["error"], "bad_request");

    let req = Request::builder()
        .method("POST")
        .uri(&uri)
        .header("content-type", "text/plain")
        .body(Body::from(json!({ "pending_answer": "A" }).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, "GET", &format!("/api/quiz/{}/state", token), None).await;
    let body = common::json_body(resp).await;
    assert_eq!(body["progress"], 0);
}

#[tokio::test]
async fn pending_answer_in_json_body_is_submitted() {
    let app = common::app(common::memory_store());
    let token = start_token(&app).await;

    let resp = send(
        &app,
        "POST",
        &format!("/api/quiz/{}/summary", token),
        Some(json!({ "pending_answer": "A" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::json_body(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["correct_count"], 1);
}
