//! Catalog browsing API
//!
//! Store grid listing with search, genre filter and pagination, plus the
//! beat detail view.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use bbs_common::browse::{genre_options, BeatQuery};
use bbs_common::human_time::format_duration;
use bbs_common::Beat;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::pagination::{paginate, Page};
use crate::AppState;

/// Query parameters for the store grid
#[derive(Debug, Deserialize)]
pub struct ListBeatsQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

/// A beat as shown on the grid
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatView {
    #[serde(flatten)]
    pub beat: Beat,
    /// Duration as `M:SS`
    pub duration_display: String,
}

impl From<&Beat> for BeatView {
    fn from(beat: &Beat) -> Self {
        Self {
            beat: beat.clone(),
            duration_display: format_duration(beat.duration),
        }
    }
}

/// Beat detail with the visitor's cart and favorite state
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatDetail {
    #[serde(flatten)]
    pub beat: BeatView,
    pub is_favorite: bool,
    pub in_cart: bool,
}

/// GET /api/beats
///
/// Filters by search term and genre, then returns the requested page.
/// Out-of-range pages are clamped.
pub async fn list_beats(
    State(state): State<AppState>,
    Query(query): Query<ListBeatsQuery>,
) -> Json<Page<BeatView>> {
    let filter = BeatQuery {
        search: query.search,
        genre: query.genre,
    };
    let views: Vec<BeatView> = filter
        .filter(&state.catalog)
        .into_iter()
        .map(BeatView::from)
        .collect();

    Json(paginate(&views, query.page))
}

/// GET /api/beats/:id
pub async fn get_beat(
    State(state): State<AppState>,
    Path(beat_id): Path<String>,
) -> ApiResult<Json<BeatDetail>> {
    let beat = state
        .catalog
        .beat_by_id(&beat_id)
        .ok_or_else(|| ApiError::beat_not_found(&beat_id))?;

    let cart = state.cart().await;
    let favorites = state.favorites().await;

    Ok(Json(BeatDetail {
        beat: BeatView::from(beat),
        is_favorite: favorites.is_favorite(&beat_id),
        in_cart: cart.contains(&beat_id),
    }))
}

/// GET /api/genres
///
/// `"all"` followed by the catalog's genres in first-seen order
pub async fn list_genres(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(genre_options(&state.catalog))
}
