//! Raw student record handlers.

use crate::error::AppError;
use crate::handlers::query_flag;
use crate::record::Record;
use crate::response::{listing, Listing};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;

/// `?active_only` appends the configured active filter to the query.
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Listing<Record>>, AppError> {
    let active_only = query_flag(&params, "active_only")?;
    let rows = state.source.fetch_all(active_only).await?;
    Ok(listing(rows))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(reg_no): Path<String>,
) -> Result<Json<Record>, AppError> {
    let record = state
        .source
        .fetch_one(&reg_no)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student with reg_no '{}'", reg_no)))?;
    Ok(Json(record))
}
