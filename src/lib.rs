pub mod app_state;
pub mod client;
pub mod configuration;
pub mod data_models;
pub mod db;
pub mod errors;
mod routes;

use crate::app_state::AppState;
use crate::db::Database;
use axum::routing::{delete, get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_app(db: Database) -> (Router, AppState) {
    let app_state = AppState::init(db);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = Router::new()
        .route("/health_check", get(routes::health_check))
        .route(
            "/products",
            get(routes::products).post(routes::create_product),
        )
        .route(
            "/products/:id",
            put(routes::replace_product).delete(routes::delete_product),
        )
        .route(
            "/categories",
            get(routes::categories).post(routes::create_category),
        )
        .route("/categories/:id", delete(routes::delete_category))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state.clone());
    (app, app_state)
}
