//! Raw student record routes.

use crate::handlers::{get_student, list_students};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(list_students))
        .route("/students/:reg_no", get(get_student))
        .with_state(state)
}
