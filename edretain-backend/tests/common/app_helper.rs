// tests/common/app_helper.rs

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use edretain_backend::api::{create_router, AppState};
use edretain_backend::config::AppConfig;
use serde::Serialize;
use serde_json::Value;
use tower::ServiceExt;

use crate::common::db::TestDatabase;

/// テスト用DBに接続したルーター
pub async fn setup_app() -> (Router, TestDatabase) {
    let db = TestDatabase::new().await;
    let app = build_app(&db);
    (app, db)
}

/// 既存のテストDBからルーターを作り直す（oneshot はルーターを消費するため）
pub fn build_app(db: &TestDatabase) -> Router {
    let config = AppConfig::for_testing();
    create_router(AppState::new(db.connection.clone(), &config))
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request<T: Serialize>(method: &str, uri: &str, body: &T) -> Request<Body> {
    Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// リクエストを1件送り、ステータスとJSONボディを返す
pub async fn send(db: &TestDatabase, request: Request<Body>) -> (StatusCode, Value) {
    let response = build_app(db).oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get_json(db: &TestDatabase, uri: &str) -> (StatusCode, Value) {
    send(db, get_request(uri)).await
}
