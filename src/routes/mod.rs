mod common;
mod patrons;
mod students;

pub use common::common_routes;
pub use patrons::patron_routes;
pub use students::student_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// The full bridge API with request tracing.
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(student_routes(state.clone()))
        .merge(patron_routes(state))
        .layer(TraceLayer::new_for_http())
}
