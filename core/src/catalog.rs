// quinta/src/catalog.rs

//! The ordered collection of sellable products.

use crate::error::{QuintaError, QuintaResult};
use crate::ids::mint_id;
use crate::models::{Product, ProductDraft, ProductPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Category filter value meaning "every category".
pub const ALL_CATEGORIES: &str = "Todos";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
  products: Vec<Product>,
}

impl Catalog {
  pub fn new(products: Vec<Product>) -> Self {
    Self { products }
  }

  pub fn products(&self) -> &[Product] {
    &self.products
  }

  pub fn len(&self) -> usize {
    self.products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.is_empty()
  }

  pub fn get(&self, id: u64) -> Option<&Product> {
    self.products.iter().find(|p| p.id == id)
  }

  pub(crate) fn get_mut(&mut self, id: u64) -> Option<&mut Product> {
    self.products.iter_mut().find(|p| p.id == id)
  }

  /// Appends a new product under a freshly minted id.
  #[instrument(name = "catalog::add", skip(self, draft), fields(name = %draft.name), err(Display))]
  pub fn add(&mut self, draft: ProductDraft, now: DateTime<Utc>) -> QuintaResult<&Product> {
    validate_draft(&draft)?;
    let id = mint_id(self.products.iter().map(|p| p.id), now);
    self.products.push(draft.into_product(id));
    debug!(product_id = id, "Product added to catalog.");
    Ok(&self.products[self.products.len() - 1])
  }

  /// Replaces the given fields of a product. The id never changes.
  #[instrument(name = "catalog::update", skip(self, patch), err(Display))]
  pub fn update(&mut self, id: u64, patch: ProductPatch) -> QuintaResult<&Product> {
    if let Some(name) = &patch.name {
      if name.trim().is_empty() {
        return Err(QuintaError::Validation("Product name cannot be empty".to_string()));
      }
    }
    if patch.price_cents.is_some_and(|p| p < 0) || patch.cost_price_cents.is_some_and(|c| c < 0) {
      return Err(QuintaError::Validation("Prices cannot be negative".to_string()));
    }
    let product = self.get_mut(id).ok_or_else(|| QuintaError::not_found("Product", id))?;
    patch.apply_to(product);
    Ok(product)
  }

  /// Removes a product. Unknown ids are a no-op.
  pub fn remove(&mut self, id: u64) -> Option<Product> {
    let position = self.products.iter().position(|p| p.id == id)?;
    Some(self.products.remove(position))
  }

  /// Linear scan keeping catalog order. `category` of `None` or `"Todos"`
  /// matches everything; `query` is a case-insensitive substring of the name
  /// or description.
  pub fn filter(&self, category: Option<&str>, query: &str) -> Vec<&Product> {
    let needle = query.trim().to_lowercase();
    let category = category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);
    self
      .products
      .iter()
      .filter(|p| category.map_or(true, |c| p.category == c))
      .filter(|p| p.matches_query(&needle))
      .collect()
  }

  /// Rewrites every product labelled `old` to `new`. Returns how many changed.
  pub(crate) fn relabel(&mut self, old: &str, new: &str) -> usize {
    let mut changed = 0;
    for product in self.products.iter_mut().filter(|p| p.category == old) {
      product.category = new.to_string();
      changed += 1;
    }
    changed
  }

  pub fn low_stock(&self, threshold: i64) -> Vec<&Product> {
    self.products.iter().filter(|p| p.stock <= threshold).collect()
  }

  /// Products sold past zero under the backorder policy.
  pub fn backordered(&self) -> Vec<&Product> {
    self.products.iter().filter(|p| p.stock < 0).collect()
  }

  pub(crate) fn decrement_stock(&mut self, id: u64, quantity: u32) {
    if let Some(product) = self.get_mut(id) {
      product.stock -= i64::from(quantity);
    }
  }
}

fn validate_draft(draft: &ProductDraft) -> QuintaResult<()> {
  if draft.name.trim().is_empty() {
    return Err(QuintaError::Validation("Product name cannot be empty".to_string()));
  }
  if draft.price_cents < 0 || draft.cost_price_cents < 0 {
    return Err(QuintaError::Validation("Prices cannot be negative".to_string()));
  }
  Ok(())
}
