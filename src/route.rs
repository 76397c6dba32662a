use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    error::AppError,
    handler,
    middleware::mw_log_request,
    model::Todo,
    schema::{CreateTodoInput, DeleteTodoInput, DeleteTodoOutput, GetTodoInput, UpdateTodoInput},
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_checker_handler))
        .route("/rpc/createTodo", post(create_todo))
        .route("/rpc/getTodo", get(get_todo))
        .route("/rpc/getTodos", get(get_todos))
        .route("/rpc/updateTodo", post(update_todo))
        .route("/rpc/deleteTodo", post(delete_todo))
        .with_state(app_state)
        .layer(from_fn(mw_log_request))
}

/// CORS for the browser-facing deployment; the origin must parse as a header value.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
        .allow_headers([ACCEPT, CONTENT_TYPE]))
}

// Handler for the health checker route
pub async fn health_checker_handler() -> impl IntoResponse {
    const MESSAGE: &str = "Typed RPC todo API with Rust, SQLX, SQLite, and Axum";

    Json(serde_json::json!({
        "status": "success",
        "message": MESSAGE
    }))
}

async fn create_todo(
    State(data): State<Arc<AppState>>,
    payload: Result<Json<CreateTodoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let Json(input) = payload.map_err(reject)?;
    let todo = handler::create_todo(&data.db, input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

// Serializes to `null` when the row does not exist.
async fn get_todo(
    State(data): State<Arc<AppState>>,
    params: Result<Query<GetTodoInput>, QueryRejection>,
) -> Result<Json<Option<Todo>>, AppError> {
    let Query(input) = params.map_err(reject)?;
    let todo = handler::get_todo(&data.db, input).await?;
    Ok(Json(todo))
}

async fn get_todos(State(data): State<Arc<AppState>>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = handler::get_todos(&data.db).await?;
    Ok(Json(todos))
}

async fn update_todo(
    State(data): State<Arc<AppState>>,
    payload: Result<Json<UpdateTodoInput>, JsonRejection>,
) -> Result<Json<Todo>, AppError> {
    let Json(input) = payload.map_err(reject)?;
    let todo = handler::update_todo(&data.db, input).await?;
    Ok(Json(todo))
}

async fn delete_todo(
    State(data): State<Arc<AppState>>,
    payload: Result<Json<DeleteTodoInput>, JsonRejection>,
) -> Result<Json<DeleteTodoOutput>, AppError> {
    let Json(input) = payload.map_err(reject)?;
    let output = handler::delete_todo(&data.db, input).await?;
    Ok(Json(output))
}

fn reject(rejection: impl std::fmt::Display) -> AppError {
    AppError::Validation(rejection.to_string())
}
