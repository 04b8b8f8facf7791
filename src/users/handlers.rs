use axum::{extract::State, routing::post, Json, Router};
use tracing::{instrument, warn};

use crate::{
    app::not_found,
    state::AppState,
    users::{
        dto::StatusResponse,
        error::RegisterError,
        extractors::RegisterPayload,
        services::{register_user, validate},
    },
};

pub fn register_routes() -> Router<AppState> {
    Router::new().route("/register", post(register).fallback(not_found))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    RegisterPayload(payload): RegisterPayload,
) -> Result<Json<StatusResponse>, RegisterError> {
    let registration = validate(payload).map_err(|e| {
        warn!(error = %e, "registration rejected");
        e
    })?;

    register_user(state.users.as_ref(), &state.config.hashing, registration).await?;

    Ok(Json(StatusResponse::ok("User successfully created")))
}
