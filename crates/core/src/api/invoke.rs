use std::sync::Arc;

use axum::{extract::State, Json};

use crate::app_state::AppState;
use crate::event::{Decision, ViewerEvent};
use crate::shared::{bad_request, HttpError};

/// Host-adapter boundary: one viewer event in, one decision out.
///
/// The edge hands over an envelope carrying a single request record; the
/// response body is either that record unchanged or the canned 401 challenge.
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    Json(event): Json<ViewerEvent>,
) -> Result<Json<Decision>, HttpError> {
    let record = event
        .records
        .into_iter()
        .next()
        .ok_or_else(|| bad_request("event contained no viewer request record".to_string()))?;

    Ok(Json(state.gate.evaluate(record.cf.request)))
}
