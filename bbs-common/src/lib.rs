//! # BlingsBeats Storefront Common Library
//!
//! Storefront core shared by the service and its tests:
//! - Beat catalog and search/genre filtering
//! - Durable key-value persistence for cart and favorites
//! - Cart engine with license-tier pricing and totals
//! - Favorites engine
//! - Configuration loading

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod favorites;
pub mod human_time;
pub mod storage;

pub use cart::{Cart, CartItem, LicenseType};
pub use catalog::{Beat, Catalog};
pub use error::{Error, Result};
pub use favorites::Favorites;
pub use storage::{CollectionKey, KeyValueStore, MemoryStore, Persistence};
