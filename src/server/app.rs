use anyhow::{Context, Result};
use axum::{
    routing::{delete, get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{categories, dashboard, health, products};
use crate::AppContext;

#[derive(Clone)]
pub struct AppState {
    pub ctx: AppContext,
}

pub async fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState {
        ctx: AppContext::new(db),
    };

    let cors = match cors_origin {
        Some("*") | None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<axum::http::HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", origin))?,
            )
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        .route("/", get(dashboard::dashboard))
        .route("/seed", get(dashboard::seed))
        .merge(catalog_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        // Category routes
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            get(categories::get_category).delete(categories::delete_category),
        )
        .route("/categories/:id/attributes", post(categories::add_attribute))
        // Product routes
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id/edit",
            get(products::edit_product).post(products::save_product_values),
        )
        .route("/products/:id", delete(products::delete_product))
}
