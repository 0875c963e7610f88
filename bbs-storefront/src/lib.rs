//! bbs-storefront library - Storefront HTTP service
//!
//! Exposes the catalog, cart and favorites as a JSON API. Cart and
//! favorites are rehydrated from durable storage on every request, so the
//! stored collections stay the single source of truth.

use axum::Router;
use bbs_common::storage::SqliteStore;
use bbs_common::{Cart, Catalog, Favorites, Persistence};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only beat catalog
    pub catalog: Arc<Catalog>,
    /// Durable storage for cart and favorites
    pub persistence: Persistence<SqliteStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: Catalog, store: SqliteStore) -> Self {
        Self {
            catalog: Arc::new(catalog),
            persistence: Persistence::new(Arc::new(store)),
        }
    }

    /// Cart as currently stored
    pub async fn cart(&self) -> Cart<SqliteStore> {
        Cart::load(self.catalog.clone(), self.persistence.clone()).await
    }

    /// Favorites as currently stored
    pub async fn favorites(&self) -> Favorites<SqliteStore> {
        Favorites::load(self.catalog.clone(), self.persistence.clone()).await
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post, put};

    let catalog = Router::new()
        .route("/api/beats", get(api::list_beats))
        .route("/api/beats/:id", get(api::get_beat))
        .route("/api/genres", get(api::list_genres));

    let cart = Router::new()
        .route("/api/cart", get(api::get_cart).delete(api::clear_cart))
        .route("/api/cart/items", post(api::add_to_cart))
        .route("/api/cart/items/:id", delete(api::remove_from_cart))
        .route("/api/cart/items/:id/quantity", put(api::set_quantity))
        .route("/api/cart/items/:id/license", put(api::set_license))
        .route("/api/cart/checkout", post(api::checkout))
        // Kept off the /api/favorites/:id level so every id stays addressable
        .route("/api/cart/from-favorites", post(api::add_all_to_cart));

    let favorites = Router::new()
        .route("/api/favorites", get(api::get_favorites))
        .route("/api/favorites/:id", delete(api::remove_favorite))
        .route("/api/favorites/:id/toggle", post(api::toggle_favorite));

    Router::new()
        .merge(catalog)
        .merge(cart)
        .merge(favorites)
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
