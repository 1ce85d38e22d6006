//! Response envelopes for list endpoints.

use crate::service::Skipped;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Listing<T> {
    pub count: usize,
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<Skipped>,
}

pub fn listing<T: Serialize>(data: Vec<T>) -> Json<Listing<T>> {
    listing_with_skipped(data, Vec::new())
}

/// `skipped` is left out of the body when empty.
pub fn listing_with_skipped<T: Serialize>(data: Vec<T>, skipped: Vec<Skipped>) -> Json<Listing<T>> {
    Json(Listing {
        count: data.len(),
        data,
        skipped,
    })
}
