use crate::state::AppState;
use axum::Router;

mod dto;
mod error;
pub(crate) mod extractors;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
pub(crate) mod password;
pub mod repo;
mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::register_routes()
}
