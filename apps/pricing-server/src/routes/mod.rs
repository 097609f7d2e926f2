pub mod auth;
pub mod health;
pub mod price;

use crate::state::SharedState;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

pub const PRICE_ROUTE: &str = "/api/price";
pub const LOGIN_ROUTE: &str = "/login/google";
pub const CALLBACK_ROUTE: &str = "/auth/callback";
pub const HEALTH_ROUTE: &str = "/health";

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route(PRICE_ROUTE, post(price::price_card))
        .route(LOGIN_ROUTE, get(auth::login_google))
        .route(CALLBACK_ROUTE, get(auth::auth_callback))
        .route(HEALTH_ROUTE, get(health::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
