use std::sync::Arc;

use axum::Server;

use axum_todo_rpc::{config::Config, db, route, telemetry, AppState};

// Entry point of the application
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format)?;

    let pool = match db::connect(&config).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = ?err, "failed to connect to the database");
            return Err(err.into());
        }
    };

    let app_state = Arc::new(AppState::new(pool));

    let app = route::create_router(app_state).layer(route::cors_layer(&config.cors_origin)?);

    tracing::info!(addr = %config.server_addr, "server started successfully");

    Server::bind(&config.server_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
