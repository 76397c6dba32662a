#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

use axum_todo_rpc::{db, route, AppState};

pub async fn pool() -> SqlitePool {
    db::connect_in_memory()
        .await
        .expect("in-memory database should open")
}

pub async fn app() -> (Router, SqlitePool) {
    let pool = pool().await;
    let router = route::create_router(Arc::new(AppState::new(pool.clone())));
    (router, pool)
}
