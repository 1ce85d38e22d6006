//! Koha bridge: serves student records from a legacy database as JSON and as Koha patron payloads.

pub mod config;
pub mod error;
pub mod handlers;
pub mod record;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{log_level_directive, KohaSettings, Settings};
pub use error::{AppError, ConfigError, MappingError};
pub use record::{Record, Scalar};
pub use routes::{app_routes, common_routes, patron_routes, student_routes};
pub use service::{map_batch, to_patron, BatchOptions, Patron};
pub use state::AppState;
pub use store::{PgRecordSource, RecordSource};
