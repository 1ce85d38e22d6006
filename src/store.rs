//! Record source: runs the configured student query and turns rows into records.
//! Every fetch opens its own connection and closes it when done; there is no pool.

use crate::config::Settings;
use crate::error::AppError;
use crate::record::{Record, Scalar};
use crate::sql::{list_query, lookup_query};
use async_trait::async_trait;
use sqlx::postgres::{PgConnection, PgRow};
use sqlx::{ConnectOptions, Connection};
use std::sync::Arc;

/// Where student records come from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// All rows of the base query, with the active filter appended when `active_only` is set.
    async fn fetch_all(&self, active_only: bool) -> Result<Vec<Record>, AppError>;

    /// The row whose `reg_no` equals `reg_no`, if any.
    async fn fetch_one(&self, reg_no: &str) -> Result<Option<Record>, AppError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// PostgreSQL-backed source opening one connection per call.
pub struct PgRecordSource {
    settings: Arc<Settings>,
}

impl PgRecordSource {
    pub fn new(settings: Arc<Settings>) -> Self {
        PgRecordSource { settings }
    }

    async fn connect(&self) -> Result<PgConnection, AppError> {
        let options = self.settings.database.connect_options()?;
        let timeout = self.settings.database.connect_timeout;
        match tokio::time::timeout(timeout, options.connect()).await {
            Ok(conn) => Ok(conn?),
            Err(_) => Err(AppError::ConnectTimeout(timeout.as_secs())),
        }
    }
}

async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "closing database connection failed");
    }
}

#[async_trait]
impl RecordSource for PgRecordSource {
    async fn fetch_all(&self, active_only: bool) -> Result<Vec<Record>, AppError> {
        let sql = list_query(
            &self.settings.students_query,
            &self.settings.active_where_clause,
            active_only,
        );
        tracing::debug!(sql = %sql, "query");
        let mut conn = self.connect().await?;
        let rows = sqlx::query(&sql).fetch_all(&mut conn).await?;
        release(conn).await;
        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn fetch_one(&self, reg_no: &str) -> Result<Option<Record>, AppError> {
        let sql = lookup_query(&self.settings.students_query);
        tracing::debug!(sql = %sql, reg_no = %reg_no, "query");
        let mut conn = self.connect().await?;
        let row = sqlx::query(&sql).bind(reg_no).fetch_optional(&mut conn).await?;
        release(conn).await;
        Ok(row.map(|r| row_to_record(&r)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.connect().await?;
        sqlx::query("SELECT 1").execute(&mut conn).await?;
        release(conn).await;
        Ok(())
    }
}

fn row_to_record(row: &PgRow) -> Record {
    use sqlx::{Column, Row};
    row.columns()
        .iter()
        .map(|col| (col.name().to_lowercase(), cell_to_scalar(row, col.ordinal())))
        .collect()
}

/// Decode by trying the supported types in turn. Types with no match become null.
fn cell_to_scalar(row: &PgRow, idx: usize) -> Scalar {
    use sqlx::Row;
    if let Ok(v) = row.try_get::<Option<i16>, _>(idx) {
        return v.map(i64::from).into();
    }
    if let Ok(v) = row.try_get::<Option<i32>, _>(idx) {
        return v.map(i64::from).into();
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
        return v.into();
    }
    if let Ok(v) = row.try_get::<Option<f32>, _>(idx) {
        return v.map(real_to_scalar).unwrap_or(Scalar::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
        return v.into();
    }
    if let Ok(v) = row.try_get::<Option<rust_decimal::Decimal>, _>(idx) {
        return v.map(decimal_to_scalar).unwrap_or(Scalar::Null);
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(idx) {
        return v.into();
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return v.into();
    }
    if let Ok(v) = row.try_get::<Option<uuid::Uuid>, _>(idx) {
        return v.map(|u| u.to_string()).into();
    }
    if let Ok(v) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx) {
        return v.map(|d| d.to_rfc3339()).into();
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveDateTime>, _>(idx) {
        return v.map(|d| d.format("%Y-%m-%dT%H:%M:%S%.f").to_string()).into();
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveDate>, _>(idx) {
        return v.map(|d| d.format("%Y-%m-%d").to_string()).into();
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveTime>, _>(idx) {
        return v.map(|t| t.format("%H:%M:%S%.f").to_string()).into();
    }
    if let Ok(v) = row.try_get::<Option<serde_json::Value>, _>(idx) {
        return v.map(json_to_scalar).unwrap_or(Scalar::Null);
    }
    Scalar::Null
}

/// REAL keeps its shortest decimal form (`3.1`, not `3.0999999046325684`).
fn real_to_scalar(n: f32) -> Scalar {
    Scalar::Float(n.to_string().parse().unwrap_or(f64::from(n)))
}

/// NUMERIC keeps its exact digits and scale as text (`20240017`, `12.50`).
fn decimal_to_scalar(d: rust_decimal::Decimal) -> Scalar {
    Scalar::Text(d.to_string())
}

/// JSON scalars map directly; arrays and objects are kept as their JSON text.
fn json_to_scalar(value: serde_json::Value) -> Scalar {
    use serde_json::Value;
    match value {
        Value::Null => Scalar::Null,
        Value::Bool(b) => Scalar::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Int(i),
            None => n.as_f64().map(Scalar::Float).unwrap_or(Scalar::Null),
        },
        Value::String(s) => Scalar::Text(s),
        other => Scalar::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn real_values_keep_their_short_form() {
        assert_eq!(real_to_scalar(3.1), Scalar::Float(3.1));
        assert_eq!(real_to_scalar(3.1).to_text().as_deref(), Some("3.1"));
    }

    #[test]
    fn numeric_reg_no_renders_as_text() {
        let reg_no = decimal_to_scalar(Decimal::from_str("20240017").unwrap());
        assert_eq!(reg_no, Scalar::from("20240017"));
        let record: Record = [("reg_no", reg_no)].into_iter().collect();
        assert_eq!(record.trimmed("reg_no").as_deref(), Some("20240017"));
        assert_eq!(decimal_to_scalar(Decimal::from_str("12.50").unwrap()), Scalar::from("12.50"));
    }

    #[test]
    fn json_cells_become_scalars() {
        assert_eq!(json_to_scalar(serde_json::json!(7)), Scalar::Int(7));
        assert_eq!(json_to_scalar(serde_json::json!("CS")), Scalar::from("CS"));
        assert_eq!(json_to_scalar(serde_json::json!(null)), Scalar::Null);
        assert_eq!(
            json_to_scalar(serde_json::json!({"campus": "North"})),
            Scalar::from(r#"{"campus":"North"}"#)
        );
    }
}
