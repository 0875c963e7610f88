//! Cart API
//!
//! Every handler rebuilds the cart from storage, applies at most one
//! mutation (which writes through) and returns the resulting cart summary.

use axum::{
    extract::{Path, State},
    Json,
};
use bbs_common::cart::{Cart, LicenseType};
use bbs_common::KeyValueStore;
use serde::{Deserialize, Serialize};

use super::beats::BeatView;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// One resolvable cart line
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub beat: BeatView,
    pub quantity: u32,
    pub license_type: LicenseType,
    pub unit_price: f64,
    pub line_price: f64,
}

/// Cart contents and totals
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineView>,
    /// Stored lines whose beat is no longer in the catalog
    pub unavailable_items: usize,
    /// Units across all lines (badge count)
    pub item_count: u64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    /// Set when the last write to storage failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistence_warning: Option<String>,
}

impl<S: KeyValueStore> From<&Cart<S>> for CartResponse {
    fn from(cart: &Cart<S>) -> Self {
        let items: Vec<CartLineView> = cart
            .lines()
            .into_iter()
            .map(|line| CartLineView {
                beat: BeatView::from(line.beat),
                quantity: line.item.quantity,
                license_type: line.item.license_type,
                unit_price: line.unit_price,
                line_price: line.line_price,
            })
            .collect();

        Self {
            unavailable_items: cart.items().len() - items.len(),
            items,
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            total: cart.total(),
            persistence_warning: cart.last_save_error().map(str::to_string),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub beat_id: String,
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    /// Zero or negative removes the line
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRequest {
    pub license_type: LicenseType,
}

/// GET /api/cart
pub async fn get_cart(State(state): State<AppState>) -> Json<CartResponse> {
    let cart = state.cart().await;
    Json(CartResponse::from(&cart))
}

/// POST /api/cart/items
///
/// Adds the beat at quantity 1, basic license. Already-present beats are
/// left unchanged.
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> ApiResult<Json<CartResponse>> {
    if !state.catalog.contains(&request.beat_id) {
        return Err(ApiError::beat_not_found(&request.beat_id));
    }
    let mut cart = state.cart().await;
    cart.add_item(&request.beat_id).await;
    Ok(Json(CartResponse::from(&cart)))
}

/// DELETE /api/cart/items/:id
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(beat_id): Path<String>,
) -> Json<CartResponse> {
    let mut cart = state.cart().await;
    cart.remove_item(&beat_id).await;
    Json(CartResponse::from(&cart))
}

/// PUT /api/cart/items/:id/quantity
pub async fn set_quantity(
    State(state): State<AppState>,
    Path(beat_id): Path<String>,
    Json(request): Json<QuantityRequest>,
) -> Json<CartResponse> {
    let mut cart = state.cart().await;
    cart.set_quantity(&beat_id, request.quantity).await;
    Json(CartResponse::from(&cart))
}

/// PUT /api/cart/items/:id/license
pub async fn set_license(
    State(state): State<AppState>,
    Path(beat_id): Path<String>,
    Json(request): Json<LicenseRequest>,
) -> Json<CartResponse> {
    let mut cart = state.cart().await;
    cart.set_license_type(&beat_id, request.license_type).await;
    Json(CartResponse::from(&cart))
}

/// DELETE /api/cart
pub async fn clear_cart(State(state): State<AppState>) -> Json<CartResponse> {
    let mut cart = state.cart().await;
    cart.clear().await;
    Json(CartResponse::from(&cart))
}

/// POST /api/cart/checkout
///
/// There is no payment processing behind the checkout button.
pub async fn checkout() -> ApiError {
    ApiError::NotImplemented("Checkout is not available".to_string())
}
