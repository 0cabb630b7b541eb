pub mod photos;
pub mod tags;

use axum::Router;
use crate::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new().merge(photos::router()).merge(tags::router())
}
