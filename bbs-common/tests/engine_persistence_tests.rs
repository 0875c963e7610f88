//! Integration tests for the cart and favorites engines over real backends
//!
//! Each `load` stands in for a fresh view mount: state written by one engine
//! instance must be visible to the next one built over the same store.

use bbs_common::db::init_memory_database;
use bbs_common::storage::SqliteStore;
use bbs_common::{Cart, CartItem, Catalog, Favorites, KeyValueStore, LicenseType, MemoryStore, Persistence};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::sync::Arc;

const EPSILON: f64 = 1e-9;

async fn sqlite_persistence() -> Persistence<SqliteStore> {
    let pool = init_memory_database().await.unwrap();
    Persistence::new(Arc::new(SqliteStore::new(pool)))
}

#[tokio::test]
async fn test_cart_survives_remount() {
    let catalog = Arc::new(Catalog::sample());
    let persistence = sqlite_persistence().await;

    let mut cart = Cart::load(catalog.clone(), persistence.clone()).await;
    cart.add_item("1").await;
    cart.add_item("4").await;
    cart.set_quantity("4", 2).await;
    cart.set_license_type("1", LicenseType::Premium).await;
    drop(cart);

    let cart = Cart::load(catalog, persistence).await;
    assert_eq!(
        cart.items(),
        &[
            CartItem {
                beat_id: "1".into(),
                quantity: 1,
                license_type: LicenseType::Premium,
            },
            CartItem {
                beat_id: "4".into(),
                quantity: 2,
                license_type: LicenseType::Basic,
            },
        ]
    );
    let expected = 29.99 * 2.0 + 34.99 * 2.0;
    assert!((cart.subtotal() - expected).abs() < EPSILON);
}

#[tokio::test]
async fn test_stale_reference_excluded_but_persisted() {
    let catalog = Arc::new(Catalog::sample());
    let persistence = sqlite_persistence().await;
    persistence
        .store()
        .set(
            "cart",
            r#"[{"beatId":"404","quantity":3,"licenseType":"exclusive"},
                {"beatId":"5","quantity":1,"licenseType":"basic"}]"#,
        )
        .await
        .unwrap();

    let mut cart = Cart::load(catalog.clone(), persistence.clone()).await;
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].beat.id, "5");
    assert!((cart.subtotal() - 19.99).abs() < EPSILON);
    assert!(cart.price_for_item(&cart.items()[0]).is_none());

    // An unrelated mutation must not prune the stale line
    cart.set_quantity("5", 2).await;
    let stored = persistence.store().get("cart").await.unwrap().unwrap();
    assert!(stored.contains(r#""beatId":"404""#));

    // Explicit removal does
    cart.remove_item("404").await;
    let reloaded = Cart::load(catalog, persistence).await;
    assert_eq!(reloaded.items().len(), 1);
}

#[tokio::test]
async fn test_corrupted_cart_loads_empty() {
    let catalog = Arc::new(Catalog::sample());
    let persistence = sqlite_persistence().await;
    persistence.store().set("cart", "[{\"beatId\":").await.unwrap();

    let cart = Cart::load(catalog, persistence).await;
    assert!(cart.is_empty());
    assert_eq!(cart.subtotal(), 0.0);
}

#[tokio::test]
async fn test_unknown_license_tier_drops_only_that_line() {
    let catalog = Arc::new(Catalog::sample());
    let persistence = sqlite_persistence().await;
    persistence
        .store()
        .set(
            "cart",
            r#"[{"beatId":"1","quantity":2,"licenseType":"premium"},
                {"beatId":"2","quantity":1,"licenseType":"gold"},
                {"beatId":"3","quantity":1,"licenseType":"basic"}]"#,
        )
        .await
        .unwrap();

    let mut cart = Cart::load(catalog.clone(), persistence.clone()).await;
    let ids: Vec<&str> = cart.items().iter().map(|i| i.beat_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    // The next write keeps the readable lines
    cart.add_item("4").await;
    let remounted = Cart::load(catalog, persistence).await;
    assert_eq!(
        remounted.items(),
        &[
            CartItem {
                beat_id: "1".into(),
                quantity: 2,
                license_type: LicenseType::Premium,
            },
            CartItem::new("3"),
            CartItem::new("4"),
        ]
    );
}

#[tokio::test]
async fn test_quota_failure_keeps_in_memory_state() {
    let catalog = Arc::new(Catalog::sample());
    // Room for one line item but not two
    let store = Arc::new(MemoryStore::with_quota(70));
    let persistence = Persistence::new(store.clone());

    let mut cart = Cart::load(catalog.clone(), persistence.clone()).await;
    assert!(cart.add_item("1").await);
    assert!(cart.last_save_error().is_none());

    assert!(cart.add_item("2").await);
    assert!(cart.last_save_error().is_some());
    assert_eq!(cart.items().len(), 2);
    assert!((cart.subtotal() - (29.99 + 39.99)).abs() < EPSILON);

    // Next mount only sees what made it to storage
    let remounted = Cart::load(catalog, persistence).await;
    assert_eq!(remounted.items(), &[CartItem::new("1")]);
}

#[tokio::test]
async fn test_add_all_partial_failure_no_rollback() {
    let catalog = Arc::new(Catalog::sample());
    let store = Arc::new(MemoryStore::with_quota(120));
    let persistence = Persistence::new(store.clone());

    let mut favorites = Favorites::load(catalog.clone(), persistence.clone()).await;
    for id in ["2", "6", "7"] {
        favorites.toggle_favorite(id).await;
    }

    let mut cart = Cart::load(catalog.clone(), persistence.clone()).await;
    let added = favorites.add_all_favorites_to_cart(&mut cart).await;

    // All three land in memory even though storage filled up part way
    assert_eq!(added, 3);
    assert_eq!(cart.items().len(), 3);
    assert!(cart.last_save_error().is_some());

    let remounted = Cart::load(catalog, persistence).await;
    assert!(remounted.items().len() < 3);
    assert!(!remounted.is_empty());
}

#[tokio::test]
async fn test_total_is_subtotal_plus_eight_percent() {
    let catalog = Arc::new(Catalog::sample());
    let persistence = Persistence::new(Arc::new(MemoryStore::new()));
    let mut cart = Cart::load(catalog, persistence).await;

    let tiers = [LicenseType::Basic, LicenseType::Premium, LicenseType::Exclusive];
    for (i, id) in ["1", "2", "3", "4", "5", "6", "7", "8"].iter().enumerate() {
        cart.add_item(id).await;
        cart.set_quantity(id, (i as i64 % 3) + 1).await;
        cart.set_license_type(id, tiers[i % 3]).await;
        assert!((cart.total() - cart.subtotal() * 1.08).abs() < 1e-6);
    }
}

#[tokio::test]
async fn test_add_remove_sequences_keep_one_line_per_id() {
    let catalog = Arc::new(Catalog::sample());
    let ids = ["1", "2", "3", "4", "5", "6", "7", "8", "ghost"];

    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _round in 0..20 {
        let persistence = Persistence::new(Arc::new(MemoryStore::new()));
        let mut cart = Cart::load(catalog.clone(), persistence.clone()).await;
        let mut expected = BTreeSet::new();

        for _ in 0..40 {
            let id = ids[rng.gen_range(0..ids.len())];
            if rng.gen_bool(0.5) {
                cart.add_item(id).await;
                expected.insert(id.to_string());
            } else {
                cart.remove_item(id).await;
                expected.remove(id);
            }
        }

        let actual: Vec<String> = cart.items().iter().map(|i| i.beat_id.clone()).collect();
        let unique: BTreeSet<String> = actual.iter().cloned().collect();
        assert_eq!(actual.len(), unique.len(), "duplicate line items: {:?}", actual);
        assert_eq!(unique, expected);

        let remounted = Cart::load(catalog.clone(), persistence).await;
        assert_eq!(remounted.items(), cart.items());
    }
}

#[tokio::test]
async fn test_favorites_and_cart_share_store_independently() {
    let catalog = Arc::new(Catalog::sample());
    let persistence = sqlite_persistence().await;

    let mut favorites = Favorites::load(catalog.clone(), persistence.clone()).await;
    favorites.toggle_favorite("2").await;
    favorites.toggle_favorite("6").await;

    let mut cart = Cart::load(catalog.clone(), persistence.clone()).await;
    favorites.add_all_favorites_to_cart(&mut cart).await;

    // Moving to the cart does not unfavorite
    let favorites = Favorites::load(catalog.clone(), persistence.clone()).await;
    assert_eq!(favorites.ids(), &["2", "6"]);

    let cart = Cart::load(catalog, persistence).await;
    assert_eq!(cart.items(), &[CartItem::new("2"), CartItem::new("6")]);
}
