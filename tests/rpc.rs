mod common;

use axum::{
    body::Body,
    http::{self, Request, StatusCode},
    response::Response,
};
use serde_json::Value;
use tower::ServiceExt;

use axum_todo_rpc::Todo;

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn mutation(operation: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/rpc/{operation}"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn query(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_check() {
    let (app, _pool) = common::app().await;
    let resp = app.oneshot(query("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "success");
}

// --- createTodo ---

#[tokio::test]
async fn create_todo_returns_201_with_defaults() {
    let (app, _pool) = common::app().await;
    let resp = app
        .oneshot(mutation("createTodo", r#"{"title":"Buy milk"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.title, "Buy milk");
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_todo_empty_title_is_validation_error() {
    let (app, _pool) = common::app().await;
    let resp = app
        .oneshot(mutation("createTodo", r#"{"title":""}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_todo_malformed_body_is_validation_error() {
    let (app, _pool) = common::app().await;
    let resp = app
        .oneshot(mutation("createTodo", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// --- getTodo ---

#[tokio::test]
async fn get_todo_unknown_id_is_null() {
    let (app, _pool) = common::app().await;
    let resp = app.oneshot(query("/rpc/getTodo?id=99999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn get_todo_bad_id_is_validation_error() {
    let (app, _pool) = common::app().await;
    let resp = app.oneshot(query("/rpc/getTodo?id=abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- updateTodo ---

#[tokio::test]
async fn update_todo_unknown_id_is_404() {
    let (app, _pool) = common::app().await;
    let resp = app
        .oneshot(mutation("updateTodo", r#"{"id":99999,"title":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Todo with ID: 99999 not found");
}

// --- deleteTodo ---

#[tokio::test]
async fn delete_todo_unknown_id_reports_false() {
    let (app, _pool) = common::app().await;
    let resp = app
        .oneshot(mutation("deleteTodo", r#"{"id":99999}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "success": false }));
}

#[tokio::test]
async fn storage_failure_is_500() {
    let (app, pool) = common::app().await;
    pool.close().await;

    let resp = app.oneshot(query("/rpc/getTodos")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], "STORAGE_ERROR");
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let (app, _pool) = common::app().await;

    let resp = app
        .clone()
        .oneshot(mutation("createTodo", r#"{"title":"Walk dog"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = body_json(resp).await;
    let id = created.id;

    let resp = app.clone().oneshot(query("/rpc/getTodos")).await.unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![created.clone()]);

    let resp = app
        .clone()
        .oneshot(query(&format!("/rpc/getTodo?id={id}")))
        .await
        .unwrap();
    let fetched: Option<Todo> = body_json(resp).await;
    assert_eq!(fetched.as_ref(), Some(&created));

    let resp = app
        .clone()
        .oneshot(mutation(
            "updateTodo",
            &format!(r#"{{"id":{id},"completed":true}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "Walk dog");
    assert!(updated.completed);
    assert_eq!(updated.created_at, created.created_at);

    let resp = app
        .clone()
        .oneshot(mutation("deleteTodo", &format!(r#"{{"id":{id}}}"#)))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["success"], true);

    let resp = app
        .oneshot(query(&format!("/rpc/getTodo?id={id}")))
        .await
        .unwrap();
    let gone: Option<Todo> = body_json(resp).await;
    assert!(gone.is_none());
}
