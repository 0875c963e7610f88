//! HTTP API handlers for bbs-storefront

pub mod beats;
pub mod buildinfo;
pub mod cart;
pub mod favorites;
pub mod health;

pub use beats::{get_beat, list_beats, list_genres};
pub use buildinfo::get_build_info;
pub use cart::{
    add_to_cart, checkout, clear_cart, get_cart, remove_from_cart, set_license, set_quantity,
};
pub use favorites::{add_all_to_cart, get_favorites, remove_favorite, toggle_favorite};
pub use health::health_routes;
