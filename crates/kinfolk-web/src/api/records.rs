use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use kinfolk_core::StoredRecord;
use serde::Deserialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records))
        .route("/{identifier}", get(get_record))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    q: Option<String>,
}

async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<StoredRecord>>, (StatusCode, String)> {
    let records = match query.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => state.storage.search_records(q).await,
        _ => state.storage.list_records().await,
    }
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(records))
}

async fn get_record(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<StoredRecord>, (StatusCode, String)> {
    let record = state
        .storage
        .get_record(&identifier)
        .await
        .map_err(|e| match e {
            kinfolk_core::Error::RecordNotFound(_) => {
                (StatusCode::NOT_FOUND, "Record not found".to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok(Json(record))
}
