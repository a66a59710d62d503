// tests/category_tests.rs
mod common;
use common::*;
use quinta::categories::{add_category, delete_category, rename_category};
use quinta::models::{Employee, PaymentStatus, Role, User, UNCATEGORIZED};
use quinta::{CategoryKind, QuintaError, Removal, Roster, UserDirectory};
use serial_test::serial;

fn employee(id: u64, category: &str) -> Employee {
  Employee {
    id,
    name: format!("Funcionário {}", id),
    role: "Tratador".to_string(),
    category: category.to_string(),
    salary_cents: 15_000_000,
    admission_date: fixed_now().date_naive(),
    contact: String::new(),
    payment_status: PaymentStatus::Pendente,
    last_payment_date: None,
    photo: None,
    id_card_doc: None,
    cv_doc: None,
  }
}

fn user(id: u64, category: Option<&str>) -> User {
  User {
    id,
    username: format!("user{}", id),
    password_hash: String::new(),
    role: Role::Staff,
    category: category.map(str::to_string),
    display_name: format!("User {}", id),
    created_at: fixed_now().date_naive(),
    permissions: Vec::new(),
  }
}

#[test]
#[serial]
fn test_add_trims_and_rejects_duplicates() {
  setup_tracing();
  let mut state = catalog_state();
  assert_eq!(add_category(&mut state, CategoryKind::Product, "  Ninhos ").unwrap(), "Ninhos");
  assert_eq!(state.categories.product.last().map(String::as_str), Some("Ninhos"));

  let err = add_category(&mut state, CategoryKind::Product, "Ninhos").unwrap_err();
  assert!(matches!(err, QuintaError::Validation(ref m) if m.contains("Categoria já existe")));
  let err = add_category(&mut state, CategoryKind::Staff, "   ").unwrap_err();
  assert!(matches!(err, QuintaError::Validation(_)));
  assert_eq!(state.categories.staff.len(), 4);
}

#[test]
#[serial]
fn test_delete_reassigns_products_to_uncategorized() {
  setup_tracing();
  let mut state = state_with(vec![
    product(1, "A", 100, 1, "X"),
    product(2, "B", 100, 1, "Y"),
    product(3, "C", 100, 1, "X"),
  ]);
  state.categories.product = vec!["X".to_string(), "Y".to_string()];

  let outcome = delete_category(&mut state, CategoryKind::Product, "X", &true).unwrap();
  assert_eq!(outcome.removed().unwrap().products, 2);
  assert_eq!(state.categories.product, vec!["Y".to_string()]);
  assert!(is_uncategorized(&state.catalog.get(1).unwrap().category));
  assert_eq!(state.catalog.get(2).unwrap().category, "Y");
  assert_eq!(state.catalog.get(3).unwrap().category, UNCATEGORIZED);
}

#[test]
#[serial]
fn test_declined_delete_leaves_everything() {
  setup_tracing();
  let mut state = catalog_state();
  let before = state.clone();
  let outcome = delete_category(&mut state, CategoryKind::Product, "Rações", &false).unwrap();
  assert_eq!(outcome, Removal::Declined);
  assert_eq!(state, before);
  assert_eq!(
    delete_category(&mut state, CategoryKind::Product, "Nada", &true).unwrap(),
    Removal::Missing
  );
}

#[test]
#[serial]
fn test_uncategorized_label_cannot_be_deleted() {
  setup_tracing();
  let mut state = state_with(vec![product(1, "A", 100, 1, UNCATEGORIZED)]);
  state.categories.product = vec!["X".to_string(), UNCATEGORIZED.to_string()];
  let before = state.clone();

  let err = delete_category(&mut state, CategoryKind::Product, UNCATEGORIZED, &true).unwrap_err();
  assert!(matches!(err, QuintaError::Validation(_)));
  assert_eq!(state, before);
}

#[test]
#[serial]
fn test_staff_rename_rewrites_employees_and_users_together() {
  setup_tracing();
  let mut state = catalog_state();
  state.roster = Roster::new(vec![employee(1, "Produção"), employee(2, "Vendas")]);
  state.users = UserDirectory::new(vec![user(10, Some("Produção")), user(11, None)]);

  let report = rename_category(&mut state, CategoryKind::Staff, "Produção", "Aviário").unwrap();
  assert_eq!(report.employees, 1);
  assert_eq!(report.users, 1);
  assert_eq!(report.products, 0);
  assert!(state.categories.staff.contains(&"Aviário".to_string()));
  assert!(!state.categories.staff.contains(&"Produção".to_string()));
  assert_eq!(state.roster.get(1).unwrap().category, "Aviário");
  assert_eq!(state.roster.get(2).unwrap().category, "Vendas");
  assert_eq!(state.users.get(10).unwrap().category.as_deref(), Some("Aviário"));
  assert_eq!(state.users.get(11).unwrap().category, None);
}

#[test]
#[serial]
fn test_rename_validates_before_mutating() {
  setup_tracing();
  let mut state = catalog_state();
  let before = state.clone();

  let err = rename_category(&mut state, CategoryKind::Product, "Rações", "Saúde").unwrap_err();
  assert!(matches!(err, QuintaError::Validation(_)));
  let err = rename_category(&mut state, CategoryKind::Product, "Inexistente", "Outra").unwrap_err();
  assert!(matches!(err, QuintaError::NotFound { entity: "Category", .. }));
  let err = rename_category(&mut state, CategoryKind::Product, "Rações", " ").unwrap_err();
  assert!(matches!(err, QuintaError::Validation(_)));
  assert_eq!(state, before);

  let report = rename_category(&mut state, CategoryKind::Product, "Rações", "Rações").unwrap();
  assert_eq!(report.total(), 0);
}

#[test]
#[serial]
fn test_product_rename_follows_the_label() {
  setup_tracing();
  let mut state = catalog_state();
  let report = rename_category(&mut state, CategoryKind::Product, "Rações", "Alimentação").unwrap();
  assert_eq!(report.products, 1);
  assert_eq!(state.catalog.get(2).unwrap().category, "Alimentação");
  assert_eq!(state.categories.product[0], "Alimentação");
}
