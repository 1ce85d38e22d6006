//! HTTP handlers for student records and Koha patrons.

pub mod patrons;
pub mod students;
pub use patrons::*;
pub use students::*;

use crate::error::AppError;
use std::collections::HashMap;

/// Boolean query parameter, `false` when absent. Accepts true/1/yes/on and false/0/no/off in any case.
pub fn query_flag(params: &HashMap<String, String>, name: &str) -> Result<bool, AppError> {
    let Some(raw) = params.get(name) else {
        return Ok(false);
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AppError::BadRequest(format!(
            "{} must be a boolean, got '{}'",
            name, raw
        ))),
    }
}
