use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod products;
mod users;


pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/users", users::router(state.clone()))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
