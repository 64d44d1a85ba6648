//! Session lifecycle and table access handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use surveyprep::{SourceMetadata, Status, Table};

use crate::server::error::ApiError;
use crate::server::state::{AppState, Session};

/// Response after creating a session.
#[derive(Serialize)]
pub struct SessionCreated {
    pub id: String,
    pub version: u64,
    pub rows: usize,
    pub columns: Vec<String>,
    pub status: Status,
    pub source: SourceMetadata,
}

/// Full view of a session.
#[derive(Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub version: u64,
    pub table: Table,
    pub status: Status,
}

#[derive(Serialize)]
pub struct ColumnsResponse {
    pub columns: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.len().await,
    })
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionCreated>), ApiError> {
    let prep = state.prep.clone();
    let (pipeline, source) = tokio::task::spawn_blocking(move || prep.ingest(&body)).await??;

    let rows = pipeline.table.row_count();
    let columns = pipeline.list_columns();
    let status = pipeline.status.clone();
    let id = state.insert(Session::new(pipeline, source.clone())).await;
    tracing::info!(session = %id, rows, columns = columns.len(), "session created");

    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            id,
            version: 0,
            rows,
            columns,
            status,
            source,
        }),
    ))
}

/// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.get(&id).await?;
    let session = session.lock().await;
    Ok(Json(SessionResponse {
        id,
        version: session.version,
        table: session.pipeline.table.clone(),
        status: session.pipeline.status.clone(),
    }))
}

/// DELETE /api/sessions/:id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.remove(&id).await {
        tracing::info!(session = %id, "session dropped");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Session not found: {}", id)))
    }
}

/// GET /api/sessions/:id/columns
pub async fn list_columns(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let session = state.get(&id).await?;
    let columns = session.lock().await.pipeline.list_columns();
    Ok(Json(ColumnsResponse { columns }))
}

/// GET /api/sessions/:id/export
pub async fn export_csv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.get(&id).await?;
    let csv = session.lock().await.pipeline.export_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"processed_data.csv\"",
            ),
        ],
        csv,
    ))
}
