// tests/storefront_tests.rs
mod common;
use common::*;
use quinta::models::{AccountDraft, AccountKind, EmployeeDraft, Product, ProductDraft};
use quinta::persistence::decode_collection;
use quinta::{
  Cart, CartKind, CategoryKind, KeyValueStore, MemoryStore, QuintaError, Removal, SharedStorefront, StockPolicy,
  Storefront, StorefrontConfig,
};
use serial_test::serial;
use std::sync::Arc;

fn stored_products(store: &MemoryStore) -> Vec<Product> {
  let raw = store.load("quintadosovos_products").unwrap().unwrap();
  decode_collection(quinta::Collection::Products, &raw).unwrap()
}

fn feed_draft(stock: i64) -> ProductDraft {
  ProductDraft {
    name: "Ração Crescimento".to_string(),
    description: "Para frangos".to_string(),
    price_cents: 9_000_000,
    cost_price_cents: 6_000_000,
    category: "Rações".to_string(),
    image: String::new(),
    rating: 5.0,
    stock,
  }
}

#[test]
#[serial]
fn test_checkout_persists_catalog_and_ledger() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let mut storefront = Storefront::open(Arc::clone(&store), StorefrontConfig::default().without_seed()).unwrap();
  let id = storefront.add_product(feed_draft(5)).unwrap().id;

  let mut cart = Cart::new();
  storefront.add_to_cart(&mut cart, id).unwrap();
  storefront.add_to_cart(&mut cart, id).unwrap();
  let invoice = storefront.checkout(&mut cart, CartKind::Storefront).unwrap().unwrap();
  assert_eq!(invoice.total_cents, 18_000_000);

  assert_eq!(stored_products(&store)[0].stock, 3);
  let raw = store.load("quintadosovos_transactions").unwrap().unwrap();
  assert!(raw.contains("\"amountCents\":18000000"));
  assert!(raw.contains("\"type\":\"ENTRADA\""));

  let reopened = Storefront::open(Arc::clone(&store), StorefrontConfig::default().without_seed()).unwrap();
  assert_eq!(reopened.state().ledger.len(), 1);
  assert_eq!(reopened.product(id).unwrap().stock, 3);
}

#[test]
#[serial]
fn test_point_of_sale_cart_survives_checkout() {
  setup_tracing();
  let mut storefront = empty_storefront(StockPolicy::RejectOversell);
  let id = storefront.add_product(feed_draft(5)).unwrap().id;
  let mut till = Cart::new();
  storefront.add_to_cart(&mut till, id).unwrap();
  storefront.checkout(&mut till, CartKind::PointOfSale).unwrap().unwrap();
  assert_eq!(till.item_count(), 1);
  assert_eq!(storefront.state().ledger.entries()[0].description, "Venda POS");
}

#[test]
#[serial]
fn test_configured_policy_applies_to_checkout() {
  setup_tracing();
  let mut strict = empty_storefront(StockPolicy::RejectOversell);
  let id = strict.add_product(feed_draft(1)).unwrap().id;
  let mut cart = Cart::new();
  strict.add_to_cart(&mut cart, id).unwrap();
  cart.update_quantity(id, 1);
  assert!(matches!(
    strict.checkout(&mut cart, CartKind::Storefront),
    Err(QuintaError::InsufficientStock { .. })
  ));

  let mut lenient = empty_storefront(StockPolicy::AllowBackorder);
  let id = lenient.add_product(feed_draft(1)).unwrap().id;
  let mut cart = Cart::new();
  lenient.add_to_cart(&mut cart, id).unwrap();
  cart.update_quantity(id, 1);
  lenient.checkout(&mut cart, CartKind::Storefront).unwrap().unwrap();
  assert_eq!(lenient.dashboard().backordered, 1);
}

#[test]
#[serial]
fn test_delete_product_cascades_to_carts() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let mut storefront = Storefront::open(Arc::clone(&store), StorefrontConfig::default().without_seed()).unwrap();
  let doomed = storefront.add_product(feed_draft(5)).unwrap().id;
  let kept = storefront.add_product(feed_draft(5)).unwrap().id;

  let mut shop_cart = Cart::new();
  let mut till = Cart::new();
  for cart in [&mut shop_cart, &mut till] {
    storefront.add_to_cart(cart, doomed).unwrap();
    storefront.add_to_cart(cart, kept).unwrap();
  }

  let declined = storefront.delete_product(doomed, &false, [&mut shop_cart, &mut till]).unwrap();
  assert_eq!(declined, Removal::Declined);
  assert_eq!(shop_cart.lines().len(), 2);

  let removed = storefront.delete_product(doomed, &true, [&mut shop_cart, &mut till]).unwrap();
  assert_eq!(removed.removed().unwrap().id, doomed);
  assert!(shop_cart.line(doomed).is_none());
  assert!(till.line(doomed).is_none());
  assert!(till.line(kept).is_some());
  assert_eq!(stored_products(&store).len(), 1);

  let again = storefront.delete_product(doomed, &true, std::iter::empty()).unwrap();
  assert_eq!(again, Removal::Missing);
}

#[test]
#[serial]
fn test_category_delete_persists_cascade() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let mut storefront = Storefront::open(Arc::clone(&store), StorefrontConfig::default().without_seed()).unwrap();
  storefront.add_category(CategoryKind::Product, "Rações").unwrap();
  storefront.add_product(feed_draft(5)).unwrap();
  storefront.add_product(feed_draft(2)).unwrap();

  let outcome = storefront.delete_category(CategoryKind::Product, "Rações", &true).unwrap();
  assert_eq!(outcome.removed().unwrap().products, 2);
  assert!(stored_products(&store).iter().all(|p| is_uncategorized(&p.category)));
  let raw = store.load("quintadosovos_categories").unwrap().unwrap();
  assert_eq!(raw, r#"{"schemaVersion":1,"items":[]}"#);
}

#[test]
#[serial]
fn test_payroll_and_dashboard() {
  setup_tracing();
  let mut storefront = empty_storefront(StockPolicy::RejectOversell);
  storefront.add_product(feed_draft(3)).unwrap();
  let maria = storefront
    .hire(EmployeeDraft {
      name: "Maria".to_string(),
      role: "Tratadora".to_string(),
      category: "Produção".to_string(),
      salary_cents: 18_000_000,
      admission_date: None,
      contact: String::new(),
    })
    .unwrap()
    .id;
  storefront
    .open_account(AccountDraft {
      entity_name: "Cliente A".to_string(),
      kind: AccountKind::Cliente,
      opening_balance_cents: 0,
    })
    .unwrap();

  let before = storefront.dashboard();
  assert_eq!(before.pending_payroll, 1);
  assert_eq!(before.low_stock, 1);

  storefront.pay_salary(maria).unwrap();
  assert!(matches!(storefront.pay_salary(maria), Err(QuintaError::AlreadyPaid { .. })));

  let after = storefront.dashboard();
  assert_eq!(after.product_count, 1);
  assert_eq!(after.employee_count, 1);
  assert_eq!(after.transaction_count, 1);
  assert_eq!(after.pending_payroll, 0);
  assert_eq!(after.ledger.expenses_cents, 18_000_000);
  assert_eq!(after.ledger.net_cents, -18_000_000);

  assert_eq!(storefront.open_payroll_cycle().unwrap(), 1);
  assert_eq!(storefront.dashboard().pending_payroll, 1);
}

#[test]
#[serial]
fn test_shared_storefront_serialises_writers() {
  setup_tracing();
  let shared = SharedStorefront::new(empty_storefront(StockPolicy::RejectOversell));
  let id = shared.write().add_product(feed_draft(100)).unwrap().id;

  let handles: Vec<_> = (0..4)
    .map(|_| {
      let shared = shared.clone();
      std::thread::spawn(move || {
        for _ in 0..5 {
          let mut cart = Cart::new();
          let mut guard = shared.write();
          guard.add_to_cart(&mut cart, id).unwrap();
          guard.checkout(&mut cart, CartKind::Storefront).unwrap();
        }
      })
    })
    .collect();
  for handle in handles {
    handle.join().unwrap();
  }

  let products = shared.map_read(|s| s.state().catalog.products());
  assert_eq!(products[0].stock, 80);
  drop(products);
  assert_eq!(shared.read().state().ledger.len(), 20);
}

/// Memory store whose saves fail for every key containing `failing`.
#[derive(Default)]
struct FailingStore {
  inner: MemoryStore,
  failing: parking_lot::Mutex<Option<&'static str>>,
}

impl FailingStore {
  fn fail_on(&self, fragment: Option<&'static str>) {
    *self.failing.lock() = fragment;
  }
}

impl KeyValueStore for FailingStore {
  fn load(&self, key: &str) -> quinta::QuintaResult<Option<String>> {
    self.inner.load(key)
  }

  fn save(&self, key: &str, value: &str) -> quinta::QuintaResult<()> {
    if let Some(fragment) = *self.failing.lock() {
      if key.contains(fragment) {
        return Err(QuintaError::storage(key, anyhow::anyhow!("disk full")));
      }
    }
    self.inner.save(key, value)
  }
}

#[test]
#[serial]
fn test_failed_save_rolls_checkout_back() {
  setup_tracing();
  let store = Arc::new(FailingStore::default());
  let mut storefront = Storefront::open(Arc::clone(&store), StorefrontConfig::default()).unwrap();
  storefront.persist_all().unwrap();

  let mut cart = Cart::new();
  storefront.add_to_cart(&mut cart, 2).unwrap();
  let before_cart = cart.clone();
  let before_state = storefront.state().clone();

  // Products save first and succeed, then the ledger save fails.
  store.fail_on(Some("transactions"));
  let err = storefront.checkout(&mut cart, CartKind::Storefront).unwrap_err();
  assert!(matches!(err, QuintaError::Storage { .. }));
  assert_eq!(storefront.state(), &before_state);
  assert_eq!(cart, before_cart);
  let raw = store.inner.load("quintadosovos_products").unwrap().unwrap();
  let stored: Vec<Product> = decode_collection(quinta::Collection::Products, &raw).unwrap();
  assert_eq!(stored.iter().find(|p| p.id == 2).unwrap().stock, 25);

  store.fail_on(None);
  let invoice = storefront.checkout(&mut cart, CartKind::Storefront).unwrap().unwrap();
  assert_eq!(invoice.total_cents, 11_500_000);
  assert_eq!(storefront.state().ledger.len(), 1);
  assert_eq!(storefront.product(2).unwrap().stock, 24);
  assert!(cart.is_empty());
}

#[test]
#[serial]
fn test_failed_save_rolls_back_payroll_and_cascades() {
  setup_tracing();
  let store = Arc::new(FailingStore::default());
  let mut storefront = Storefront::open(Arc::clone(&store), StorefrontConfig::default()).unwrap();
  let hired = storefront
    .hire(EmployeeDraft {
      name: "Rosa Neto".to_string(),
      role: "Tratadora".to_string(),
      category: "Produção".to_string(),
      salary_cents: 15_000_000,
      admission_date: None,
      contact: String::new(),
    })
    .unwrap();
  let before = storefront.state().clone();

  store.fail_on(Some("quintadosovos"));
  assert!(storefront.pay_salary(hired.id).is_err());
  assert!(storefront.rename_category(CategoryKind::Staff, "Produção", "Aviário").is_err());
  assert!(storefront.add_product(feed_draft(3)).is_err());
  assert_eq!(storefront.state(), &before);

  store.fail_on(None);
  assert!(storefront.pay_salary(hired.id).is_ok());
  assert_eq!(storefront.state().ledger.len(), 1);
}
