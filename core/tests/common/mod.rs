// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use chrono::{DateTime, TimeZone, Utc};
use quinta::models::{Product, UNCATEGORIZED};
use quinta::{
  seed, AppState, Catalog, CategoryBook, MemoryStore, StockPolicy, Storefront, StorefrontConfig,
};
use tracing::Level;

// --- Fixtures ---

/// A fixed instant so minted ids and dates are predictable.
pub fn fixed_now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
}

pub fn product(id: u64, name: &str, price_cents: i64, stock: i64, category: &str) -> Product {
  Product {
    id,
    name: name.to_string(),
    description: format!("{} description", name),
    price_cents,
    cost_price_cents: price_cents * 7 / 10,
    category: category.to_string(),
    image: String::new(),
    rating: 4.5,
    stock,
  }
}

/// State holding the default catalog and category lists, without users.
pub fn catalog_state() -> AppState {
  AppState {
    catalog: Catalog::new(seed::default_products()),
    categories: CategoryBook::new(seed::default_product_categories(), seed::default_staff_categories()),
    ..AppState::default()
  }
}

pub fn state_with(products: Vec<Product>) -> AppState {
  AppState {
    catalog: Catalog::new(products),
    ..AppState::default()
  }
}

/// An unseeded storefront over a fresh memory store.
pub fn empty_storefront(policy: StockPolicy) -> Storefront<MemoryStore> {
  let config = StorefrontConfig::default().without_seed().with_stock_policy(policy);
  Storefront::open(MemoryStore::new(), config).unwrap()
}

pub fn stock_of(state: &AppState, id: u64) -> i64 {
  state.catalog.get(id).unwrap().stock
}

pub fn is_uncategorized(label: &str) -> bool {
  label == UNCATEGORIZED
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
