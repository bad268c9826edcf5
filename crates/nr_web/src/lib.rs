use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod logging;
pub mod state;

pub use error::ApiError;
pub use handlers::NewsEnvelope;
pub use state::{AppState, Clock};

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/news", get(handlers::search_news))
        // Path of the serverless deployment this service replaces.
        .route("/.netlify/functions/navernews", get(handlers::search_news))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{AppState, Clock, NewsEnvelope};
    pub use nr_core::{Engine, Error, Result, RuleSet};
}
