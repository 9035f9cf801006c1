//! Route definitions

use axum::{Router, routing::get};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{error, handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/weather",
            get(handlers::weather::get_weather)
                .post(handlers::weather::add_weather)
                .put(handlers::weather::update_weather)
                .delete(handlers::weather::delete_weather),
        )
        .route("/weather/health", get(handlers::health::health_check))
        .fallback(error::not_found)
        .method_not_allowed_fallback(error::method_not_allowed)
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::handle_panic))
}
