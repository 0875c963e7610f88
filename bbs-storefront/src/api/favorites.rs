//! Favorites API

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::beats::BeatView;
use super::cart::CartResponse;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteView {
    pub beat: BeatView,
    /// Drives the "In Cart" state of the per-beat add button
    pub in_cart: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    pub beats: Vec<FavoriteView>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub beat_id: String,
    pub is_favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistence_warning: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAllResponse {
    /// Lines newly added to the cart
    pub added: usize,
    pub cart: CartResponse,
}

/// GET /api/favorites
///
/// Favorited beats still in the catalog, in the order they were saved
pub async fn get_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    let favorites = state.favorites().await;
    let cart = state.cart().await;

    let beats: Vec<FavoriteView> = favorites
        .beats()
        .into_iter()
        .map(|beat| FavoriteView {
            in_cart: cart.contains(&beat.id),
            beat: BeatView::from(beat),
        })
        .collect();

    Json(FavoritesResponse {
        count: beats.len(),
        beats,
    })
}

/// POST /api/favorites/:id/toggle
///
/// Unknown beats can only be toggled off, so stale favorites stay removable.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(beat_id): Path<String>,
) -> ApiResult<Json<ToggleResponse>> {
    let mut favorites = state.favorites().await;
    if !state.catalog.contains(&beat_id) && !favorites.is_favorite(&beat_id) {
        return Err(ApiError::beat_not_found(&beat_id));
    }

    let is_favorite = favorites.toggle_favorite(&beat_id).await;
    Ok(Json(ToggleResponse {
        beat_id,
        is_favorite,
        persistence_warning: favorites.last_save_error().map(str::to_string),
    }))
}

/// DELETE /api/favorites/:id
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(beat_id): Path<String>,
) -> Json<ToggleResponse> {
    let mut favorites = state.favorites().await;
    favorites.remove_favorite(&beat_id).await;
    Json(ToggleResponse {
        beat_id,
        is_favorite: false,
        persistence_warning: favorites.last_save_error().map(str::to_string),
    })
}

/// POST /api/cart/from-favorites
pub async fn add_all_to_cart(State(state): State<AppState>) -> Json<AddAllResponse> {
    let favorites = state.favorites().await;
    let mut cart = state.cart().await;
    let added = favorites.add_all_favorites_to_cart(&mut cart).await;

    Json(AddAllResponse {
        added,
        cart: CartResponse::from(&cart),
    })
}
