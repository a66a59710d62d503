// quinta/src/storefront.rs

//! The application facade: state, store and configuration in one place.
//! Every mutating method persists exactly the collections it changed.

use crate::accounts::AccountsSummary;
use crate::cart::{Cart, CartKind};
use crate::categories::{self, CascadeReport, CategoryKind};
use crate::checkout;
use crate::config::StorefrontConfig;
use crate::confirm::{Confirm, Removal};
use crate::error::{QuintaError, QuintaResult};
use crate::ledger::LedgerSummary;
use crate::models::{
  AccountDraft, AccountPatch, CurrentAccount, DocumentKind, Employee, EmployeeDraft, EmployeePatch, Invoice,
  Product, ProductDraft, ProductPatch, Transaction, User, UserDraft, UserPatch,
};
use crate::persistence::{self, Collection};
use crate::state::AppState;
use crate::storage::KeyValueStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Stock at or below this shows up on the dashboard as low.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
  pub product_count: usize,
  pub employee_count: usize,
  pub transaction_count: usize,
  pub pending_payroll: usize,
  pub low_stock: usize,
  pub backordered: usize,
  pub ledger: LedgerSummary,
  pub accounts: AccountsSummary,
}

#[derive(Debug)]
pub struct Storefront<S: KeyValueStore> {
  state: AppState,
  store: S,
  config: StorefrontConfig,
}

impl<S: KeyValueStore> Storefront<S> {
  /// Rehydrates state from `store`, seeding missing collections.
  #[instrument(name = "Storefront::open", skip(store, config), fields(namespace = %config.namespace), err(Display))]
  pub fn open(store: S, config: StorefrontConfig) -> QuintaResult<Self> {
    let state = persistence::load_state(&store, &config)?;
    Ok(Self { state, store, config })
  }

  pub fn state(&self) -> &AppState {
    &self.state
  }

  pub fn config(&self) -> &StorefrontConfig {
    &self.config
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  fn persist(&self, collections: &[Collection]) -> QuintaResult<()> {
    persistence::save_state(&self.store, &self.config.namespace, &self.state, collections)
  }

  /// Runs `mutate` and saves `collections` when `changed` says the outcome
  /// touched state. Any error, including a failed save, puts the state back
  /// as it was before the call.
  fn transact<T>(
    &mut self,
    collections: &[Collection],
    mutate: impl FnOnce(&mut AppState) -> QuintaResult<T>,
    changed: impl FnOnce(&T) -> bool,
  ) -> QuintaResult<T> {
    let snapshot = self.state.clone();
    let value = match mutate(&mut self.state) {
      Ok(value) => value,
      Err(e) => {
        self.state = snapshot;
        return Err(e);
      }
    };
    if !changed(&value) {
      return Ok(value);
    }
    if let Err(e) = self.persist(collections) {
      warn!(error = %e, "Save failed, restoring the previous state.");
      self.state = snapshot;
      // Earlier collections of this save may already be on disk.
      if let Err(rewrite) = self.persist(collections) {
        warn!(error = %rewrite, "Could not rewrite the restored collections.");
      }
      return Err(e);
    }
    Ok(value)
  }

  fn commit<T>(
    &mut self,
    collections: &[Collection],
    mutate: impl FnOnce(&mut AppState) -> QuintaResult<T>,
  ) -> QuintaResult<T> {
    self.transact(collections, mutate, |_| true)
  }

  /// Writes every collection, e.g. to materialise seed data on first start.
  pub fn persist_all(&self) -> QuintaResult<()> {
    self.persist(&Collection::ALL)
  }

  // --- Catalog ---

  pub fn product(&self, id: u64) -> QuintaResult<&Product> {
    self.state.catalog.get(id).ok_or_else(|| QuintaError::not_found("Product", id))
  }

  pub fn search_products(&self, category: Option<&str>, query: &str) -> Vec<&Product> {
    self.state.catalog.filter(category, query)
  }

  pub fn add_product(&mut self, draft: ProductDraft) -> QuintaResult<Product> {
    self.commit(&[Collection::Products], |state| {
      Ok(state.catalog.add(draft, Utc::now())?.clone())
    })
  }

  pub fn update_product(&mut self, id: u64, patch: ProductPatch) -> QuintaResult<Product> {
    self.commit(&[Collection::Products], |state| Ok(state.catalog.update(id, patch)?.clone()))
  }

  /// Removes a product after confirmation and drops its line from every
  /// given cart once the catalog is saved.
  #[instrument(name = "Storefront::delete_product", skip(self, confirm, carts), err(Display))]
  pub fn delete_product<'c>(
    &mut self,
    id: u64,
    confirm: &dyn Confirm,
    carts: impl IntoIterator<Item = &'c mut Cart>,
  ) -> QuintaResult<Removal<Product>> {
    let Some(product) = self.state.catalog.get(id) else {
      return Ok(Removal::Missing);
    };
    if !confirm.confirm(&format!("Excluir o produto {}?", product.name)) {
      return Ok(Removal::Declined);
    }
    let removed = self.commit(&[Collection::Products], |state| {
      state.catalog.remove(id).ok_or_else(|| QuintaError::not_found("Product", id))
    })?;
    for cart in carts {
      cart.retain_products(|product_id| product_id != id);
    }
    info!(product_id = id, "Product deleted.");
    Ok(Removal::Removed(removed))
  }

  // --- Cart & checkout ---

  /// Adds one unit of a catalog product to `cart`.
  pub fn add_to_cart(&self, cart: &mut Cart, product_id: u64) -> QuintaResult<()> {
    let product = self.product(product_id)?;
    cart.add(product)?;
    Ok(())
  }

  /// Settles `cart` under the configured stock policy. Persists the catalog
  /// and the ledger when a sale happened; if that save fails, both the state
  /// and `cart` are left as they were.
  pub fn checkout(&mut self, cart: &mut Cart, kind: CartKind) -> QuintaResult<Option<Invoice>> {
    let saved_cart = cart.clone();
    let policy = self.config.stock_policy;
    let result = self.transact(
      &[Collection::Products, Collection::Transactions],
      |state| checkout::checkout(state, cart, kind, policy, Utc::now()),
      Option::is_some,
    );
    if result.is_err() {
      *cart = saved_cart;
    }
    result
  }

  // --- Categories ---

  fn category_collections(kind: CategoryKind) -> &'static [Collection] {
    match kind {
      CategoryKind::Product => &[Collection::Categories, Collection::Products],
      CategoryKind::Staff => &[Collection::StaffCategories, Collection::Employees, Collection::Users],
    }
  }

  pub fn add_category(&mut self, kind: CategoryKind, name: &str) -> QuintaResult<String> {
    self.commit(&Self::category_collections(kind)[..1], |state| {
      categories::add_category(state, kind, name)
    })
  }

  pub fn rename_category(&mut self, kind: CategoryKind, old: &str, new: &str) -> QuintaResult<CascadeReport> {
    self.commit(Self::category_collections(kind), |state| {
      categories::rename_category(state, kind, old, new)
    })
  }

  pub fn delete_category(
    &mut self,
    kind: CategoryKind,
    name: &str,
    confirm: &dyn Confirm,
  ) -> QuintaResult<Removal<CascadeReport>> {
    self.transact(
      Self::category_collections(kind),
      |state| categories::delete_category(state, kind, name, confirm),
      Removal::is_removed,
    )
  }

  // --- HR ---

  pub fn hire(&mut self, draft: EmployeeDraft) -> QuintaResult<Employee> {
    self.commit(&[Collection::Employees], |state| {
      Ok(state.roster.hire(draft, Utc::now())?.clone())
    })
  }

  pub fn update_employee(&mut self, id: u64, patch: EmployeePatch) -> QuintaResult<Employee> {
    self.commit(&[Collection::Employees], |state| Ok(state.roster.update(id, patch)?.clone()))
  }

  pub fn dismiss_employee(&mut self, id: u64, confirm: &dyn Confirm) -> QuintaResult<Removal<Employee>> {
    self.transact(
      &[Collection::Employees],
      |state| Ok(state.roster.dismiss(id, confirm)),
      Removal::is_removed,
    )
  }

  pub fn attach_document(&mut self, id: u64, kind: DocumentKind, encoded: String) -> QuintaResult<Employee> {
    self.commit(&[Collection::Employees], |state| {
      Ok(state.roster.attach_document(id, kind, encoded)?.clone())
    })
  }

  pub fn pay_salary(&mut self, id: u64) -> QuintaResult<Transaction> {
    self.commit(&[Collection::Employees, Collection::Transactions], |state| {
      let AppState { roster, ledger, .. } = state;
      roster.pay_salary(id, ledger, Utc::now())
    })
  }

  pub fn open_payroll_cycle(&mut self) -> QuintaResult<usize> {
    self.commit(&[Collection::Employees], |state| Ok(state.roster.open_payroll_cycle()))
  }

  // --- System users ---

  pub fn create_user(&mut self, draft: UserDraft) -> QuintaResult<User> {
    self.commit(&[Collection::Users], |state| {
      Ok(state.users.create(draft, Utc::now())?.clone())
    })
  }

  pub fn update_user(&mut self, id: u64, patch: UserPatch) -> QuintaResult<User> {
    self.commit(&[Collection::Users], |state| Ok(state.users.update(id, patch)?.clone()))
  }

  pub fn delete_user(&mut self, id: u64, acting_user_id: u64, confirm: &dyn Confirm) -> QuintaResult<Removal<User>> {
    self.transact(
      &[Collection::Users],
      |state| state.users.delete(id, acting_user_id, confirm),
      Removal::is_removed,
    )
  }

  // --- Current accounts ---

  pub fn open_account(&mut self, draft: AccountDraft) -> QuintaResult<CurrentAccount> {
    self.commit(&[Collection::Accounts], |state| {
      Ok(state.accounts.open(draft, Utc::now())?.clone())
    })
  }

  pub fn update_account(&mut self, id: u64, patch: AccountPatch) -> QuintaResult<CurrentAccount> {
    self.commit(&[Collection::Accounts], |state| Ok(state.accounts.update(id, patch)?.clone()))
  }

  pub fn post_account_movement(&mut self, id: u64, delta_cents: i64) -> QuintaResult<CurrentAccount> {
    self.commit(&[Collection::Accounts], |state| {
      Ok(
        state
          .accounts
          .post_movement(id, delta_cents, Utc::now().date_naive())?
          .clone(),
      )
    })
  }

  pub fn close_account(&mut self, id: u64, confirm: &dyn Confirm) -> QuintaResult<Removal<CurrentAccount>> {
    self.transact(
      &[Collection::Accounts],
      |state| Ok(state.accounts.close(id, confirm)),
      Removal::is_removed,
    )
  }

  // --- Finance ---

  pub fn dashboard(&self) -> Dashboard {
    Dashboard {
      product_count: self.state.catalog.len(),
      employee_count: self.state.roster.len(),
      transaction_count: self.state.ledger.len(),
      pending_payroll: self.state.roster.pending_payroll().count(),
      low_stock: self.state.catalog.low_stock(LOW_STOCK_THRESHOLD).len(),
      backordered: self.state.catalog.backordered().len(),
      ledger: self.state.ledger.summary(),
      accounts: self.state.accounts.summary(),
    }
  }
}
