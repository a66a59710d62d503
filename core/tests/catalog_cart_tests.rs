// tests/catalog_cart_tests.rs
mod common;
use common::*;
use quinta::models::{ProductDraft, ProductPatch};
use quinta::{Cart, Catalog, QuintaError};
use serial_test::serial;

fn draft(name: &str, price_cents: i64, stock: i64) -> ProductDraft {
  ProductDraft {
    name: name.to_string(),
    description: String::new(),
    price_cents,
    cost_price_cents: price_cents / 2,
    category: "Rações".to_string(),
    image: String::new(),
    rating: 5.0,
    stock,
  }
}

#[test]
#[serial]
fn test_add_mints_ids_above_every_existing_id() {
  setup_tracing();
  let mut catalog = Catalog::new(vec![product(u64::MAX / 2, "Futuro", 100, 1, "Rações")]);
  let first = catalog.add(draft("Milho", 500, 3), fixed_now()).unwrap().id;
  let second = catalog.add(draft("Soja", 700, 3), fixed_now()).unwrap().id;
  assert_eq!(first, u64::MAX / 2 + 1);
  assert_eq!(second, first + 1);
  assert_eq!(catalog.len(), 3);
}

#[test]
#[serial]
fn test_add_uses_clock_for_fresh_catalogs() {
  setup_tracing();
  let mut catalog = Catalog::new(seed_products());
  let id = catalog.add(draft("Milho", 500, 3), fixed_now()).unwrap().id;
  assert_eq!(id, fixed_now().timestamp_millis() as u64);
}

fn seed_products() -> Vec<quinta::models::Product> {
  quinta::seed::default_products()
}

#[test]
#[serial]
fn test_add_rejects_blank_names() {
  setup_tracing();
  let mut catalog = Catalog::default();
  let err = catalog.add(draft("   ", 500, 3), fixed_now()).unwrap_err();
  assert!(matches!(err, QuintaError::Validation(_)));
  assert!(catalog.is_empty());
}

#[test]
#[serial]
fn test_update_keeps_id_and_replaces_fields() {
  setup_tracing();
  let mut catalog = Catalog::new(seed_products());
  let patch = ProductPatch {
    price_cents: Some(12_000_000),
    stock: Some(3),
    ..ProductPatch::default()
  };
  let updated = catalog.update(2, patch).unwrap();
  assert_eq!(updated.id, 2);
  assert_eq!(updated.price_cents, 12_000_000);
  assert_eq!(updated.stock, 3);
  assert_eq!(updated.name, "Ração Postura Premium 20kg");
}

#[test]
#[serial]
fn test_update_unknown_product_is_not_found() {
  setup_tracing();
  let mut catalog = Catalog::new(seed_products());
  let err = catalog.update(42, ProductPatch::default()).unwrap_err();
  assert!(matches!(err, QuintaError::NotFound { entity: "Product", .. }));
}

#[test]
#[serial]
fn test_low_stock_and_backordered_views() {
  setup_tracing();
  let catalog = Catalog::new(vec![
    product(1, "A", 100, 10, "X"),
    product(2, "B", 100, 5, "X"),
    product(3, "C", 100, -2, "X"),
  ]);
  let low: Vec<u64> = catalog.low_stock(5).iter().map(|p| p.id).collect();
  assert_eq!(low, vec![2, 3]);
  let backordered: Vec<u64> = catalog.backordered().iter().map(|p| p.id).collect();
  assert_eq!(backordered, vec![3]);
}

#[test]
#[serial]
fn test_cart_add_increments_existing_line() {
  setup_tracing();
  let feed = product(1, "Ração", 11_500_000, 25, "Rações");
  let mut cart = Cart::new();
  cart.add(&feed).unwrap();
  cart.add(&feed).unwrap();
  assert_eq!(cart.lines().len(), 1);
  assert_eq!(cart.line(1).unwrap().quantity, 2);
  assert_eq!(cart.item_count(), 2);
  assert_eq!(cart.total_cents(), 23_000_000);
}

#[test]
#[serial]
fn test_cart_rejects_products_without_stock() {
  setup_tracing();
  let mut cart = Cart::new();
  cart.add(&product(2, "Milho", 100, 4, "Rações")).unwrap();
  let before = cart.clone();
  for stock in [0, -3] {
    let err = cart.add(&product(1, "Esgotado", 100, stock, "Rações")).unwrap_err();
    assert!(matches!(err, QuintaError::OutOfStock { product_id: 1, .. }));
    assert!(err.is_rejection());
  }
  assert_eq!(cart, before);
}

#[test]
#[serial]
fn test_update_quantity_clamps_to_one() {
  setup_tracing();
  let feed = product(1, "Ração", 100, 25, "Rações");
  let mut cart = Cart::new();
  for _ in 0..3 {
    cart.add(&feed).unwrap();
  }
  assert_eq!(cart.update_quantity(1, -1000).unwrap().quantity, 1);
  assert_eq!(cart.update_quantity(1, 4).unwrap().quantity, 5);
  assert!(cart.update_quantity(99, 1).is_none());
  assert_eq!(cart.lines().len(), 1);
}

#[test]
#[serial]
fn test_update_quantity_saturates_on_extreme_deltas() {
  setup_tracing();
  let mut cart = Cart::new();
  cart.add(&product(1, "Incubadora", 100, 10, "Incubação")).unwrap();
  assert_eq!(cart.update_quantity(1, i64::MAX).unwrap().quantity, u32::MAX);
  assert_eq!(cart.update_quantity(1, i64::MAX).unwrap().quantity, u32::MAX);
  assert_eq!(cart.update_quantity(1, i64::MIN).unwrap().quantity, 1);
}

#[test]
#[serial]
fn test_remove_and_retain_lines() {
  setup_tracing();
  let mut cart = Cart::new();
  cart.add(&product(1, "A", 100, 5, "X")).unwrap();
  cart.add(&product(2, "B", 200, 5, "X")).unwrap();
  cart.add(&product(3, "C", 300, 5, "X")).unwrap();

  assert_eq!(cart.remove(2).unwrap().product_id(), 2);
  assert!(cart.remove(2).is_none());
  cart.retain_products(|id| id != 3);
  let ids: Vec<u64> = cart.lines().iter().map(|l| l.product_id()).collect();
  assert_eq!(ids, vec![1]);
  cart.clear();
  assert!(cart.is_empty());
  assert_eq!(cart.total_cents(), 0);
}

#[test]
#[serial]
fn test_cart_lines_keep_their_snapshot_price() {
  setup_tracing();
  let mut live = product(1, "Ração", 10_000, 5, "Rações");
  let mut cart = Cart::new();
  cart.add(&live).unwrap();
  live.price_cents = 99_900;
  cart.add(&live).unwrap();
  assert_eq!(cart.total_cents(), 20_000);
}
