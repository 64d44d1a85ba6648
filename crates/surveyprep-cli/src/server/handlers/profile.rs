//! Read-only profiling handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use surveyprep::profile::{ColumnStats, CorrelationMatrix, DtypeSummary, MissingSummary};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// GET /api/sessions/:id/missing
pub async fn missing_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MissingSummary>, ApiError> {
    let session = state.get(&id).await?;
    let session = session.lock().await;
    Ok(Json(MissingSummary::of(&session.pipeline.table)))
}

/// GET /api/sessions/:id/dtypes
pub async fn dtype_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DtypeSummary>, ApiError> {
    let session = state.get(&id).await?;
    let session = session.lock().await;
    Ok(Json(DtypeSummary::of(&session.pipeline.table)))
}

/// GET /api/sessions/:id/stats/:column
pub async fn column_stats(
    State(state): State<AppState>,
    Path((id, column)): Path<(String, String)>,
) -> Result<Json<ColumnStats>, ApiError> {
    let session = state.get(&id).await?;
    let session = session.lock().await;
    Ok(Json(ColumnStats::of(&session.pipeline.table, &column)?))
}

/// GET /api/sessions/:id/correlation
pub async fn correlation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CorrelationMatrix>, ApiError> {
    let session = state.get(&id).await?;
    let session = session.lock().await;
    Ok(Json(CorrelationMatrix::of(&session.pipeline.table)))
}
