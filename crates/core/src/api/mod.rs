use std::sync::Arc;

use axum::{routing::post, Router};

use crate::app_state::AppState;

mod invoke;

pub fn create_gate_routes() -> Router<Arc<AppState>> {
    Router::new().route("/invoke", post(invoke::invoke))
}
