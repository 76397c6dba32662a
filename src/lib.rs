pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod route;
pub mod schema;
pub mod telemetry;
pub mod view;

use sqlx::{Pool, Sqlite};

pub use error::AppError;
pub use model::Todo;

// Struct representing the application state
pub struct AppState {
    pub(crate) db: Pool<Sqlite>,
}

impl AppState {
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db }
    }
}
