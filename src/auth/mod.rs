use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod jwt;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
