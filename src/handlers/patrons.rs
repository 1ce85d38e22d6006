//! Koha patron handlers: fetch records, map them, report what was skipped.

use crate::error::AppError;
use crate::handlers::query_flag;
use crate::response::{listing_with_skipped, Listing};
use crate::service::{map_batch, to_patron, BatchOptions, PatronEntry};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;

/// `?active_only`, `?include_raw` (return `{koha, raw}` pairs) and `?strict` (500 on the first unmappable record).
pub async fn list_patrons(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Listing<PatronEntry>>, AppError> {
    let active_only = query_flag(&params, "active_only")?;
    let options = BatchOptions {
        include_raw: query_flag(&params, "include_raw")?,
        strict: query_flag(&params, "strict")?,
    };
    let rows = state.source.fetch_all(active_only).await?;
    let outcome = map_batch(rows, &state.settings.koha, options)?;
    Ok(listing_with_skipped(outcome.patrons, outcome.skipped))
}

pub async fn get_patron(
    State(state): State<AppState>,
    Path(reg_no): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PatronEntry>, AppError> {
    let include_raw = query_flag(&params, "include_raw")?;
    let record = state
        .source
        .fetch_one(&reg_no)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student with reg_no '{}'", reg_no)))?;
    let patron = to_patron(&record, &state.settings.koha)?;
    Ok(Json(PatronEntry::new(patron, record, include_raw)))
}
