//! Koha patron routes.

use crate::handlers::{get_patron, list_patrons};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn patron_routes(state: AppState) -> Router {
    Router::new()
        .route("/koha/patrons", get(list_patrons))
        .route("/koha/patrons/:reg_no", get(get_patron))
        .with_state(state)
}
