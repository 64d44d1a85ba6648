//! Axum application setup.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Sessions
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/:id/columns", get(handlers::list_columns))
        .route("/sessions/:id/export", get(handlers::export_csv))
        // Operations
        .route("/sessions/:id/operations", post(handlers::apply_operation))
        // Profiling
        .route("/sessions/:id/missing", get(handlers::missing_summary))
        .route("/sessions/:id/dtypes", get(handlers::dtype_summary))
        .route("/sessions/:id/stats/:column", get(handlers::column_stats))
        .route("/sessions/:id/correlation", get(handlers::correlation));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(
    state: AppState,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;

    tracing::info!(addr = %listener.local_addr()?, "server listening");
    println!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
