//! Operation handler.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use surveyprep::Status;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body: an operation, optionally with the version it was built against.
///
/// ```json
/// {"op": "discretize", "column": "Age", "bin_count": 5, "expected_version": 2}
/// ```
#[derive(Deserialize)]
pub struct OperationRequest {
    pub expected_version: Option<u64>,
    #[serde(flatten)]
    pub operation: serde_json::Map<String, serde_json::Value>,
}

/// Result of applying an operation.
#[derive(Serialize)]
pub struct OperationResponse {
    pub version: u64,
    pub status: Status,
    pub rows: usize,
    pub columns: Vec<String>,
}

/// POST /api/sessions/:id/operations
///
/// Failed operations still answer 200; the status carries the error and the
/// table is left as it was.
pub async fn apply_operation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<OperationRequest>,
) -> Result<Json<OperationResponse>, ApiError> {
    if req.operation.is_empty() {
        return Err(ApiError::BadRequest("Request body holds no operation".to_string()));
    }

    let session = state.get(&id).await?;
    let mut session = session.lock().await;

    if let Some(expected) = req.expected_version {
        if expected != session.version {
            return Err(ApiError::Conflict(format!(
                "Session is at version {}, request expected {}",
                session.version, expected
            )));
        }
    }

    let current = session.pipeline.clone();
    let operation = serde_json::Value::Object(req.operation);
    let next = tokio::task::spawn_blocking(move || current.apply_json(operation)).await?;

    session.pipeline = next;
    session.version += 1;
    tracing::debug!(
        session = %id,
        version = session.version,
        level = ?session.pipeline.status.level,
        "operation applied"
    );

    Ok(Json(OperationResponse {
        version: session.version,
        status: session.pipeline.status.clone(),
        rows: session.pipeline.table.row_count(),
        columns: session.pipeline.list_columns(),
    }))
}
