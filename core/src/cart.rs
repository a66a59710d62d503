// quinta/src/cart.rs

//! Session-scoped shopping carts. Never persisted.

use crate::error::{QuintaError, QuintaResult};
use crate::models::{CartLine, Product};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which surface a cart belongs to. Decides the sale description and whether
/// checkout empties the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CartKind {
  /// The customer-facing store.
  Storefront,
  /// The back-office till.
  PointOfSale,
}

impl CartKind {
  pub fn sale_description(self) -> &'static str {
    match self {
      CartKind::Storefront => "Venda Online",
      CartKind::PointOfSale => "Venda POS",
    }
  }
}

impl fmt::Display for CartKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CartKind::Storefront => f.write_str("storefront"),
      CartKind::PointOfSale => f.write_str("pos"),
    }
  }
}

/// Ordered lines, at most one per product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
  lines: Vec<CartLine>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn line(&self, product_id: u64) -> Option<&CartLine> {
    self.lines.iter().find(|l| l.product_id() == product_id)
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Adds one unit. A product with no stock is rejected and the cart is left
  /// as it was. An existing line keeps its original snapshot.
  pub fn add(&mut self, product: &Product) -> QuintaResult<&CartLine> {
    if product.stock <= 0 {
      return Err(QuintaError::OutOfStock {
        product_id: product.id,
        name: product.name.clone(),
      });
    }
    let index = match self.lines.iter().position(|l| l.product_id() == product.id) {
      Some(index) => {
        let line = &mut self.lines[index];
        line.quantity = line.quantity.saturating_add(1);
        index
      }
      None => {
        self.lines.push(CartLine::new(product.clone()));
        self.lines.len() - 1
      }
    };
    Ok(&self.lines[index])
  }

  /// Moves the quantity by `delta`, never below one. Unknown ids are a no-op.
  pub fn update_quantity(&mut self, product_id: u64, delta: i64) -> Option<&CartLine> {
    let line = self.lines.iter_mut().find(|l| l.product_id() == product_id)?;
    let next = i64::from(line.quantity).saturating_add(delta).clamp(1, i64::from(u32::MAX));
    line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
    Some(line)
  }

  pub fn remove(&mut self, product_id: u64) -> Option<CartLine> {
    let position = self.lines.iter().position(|l| l.product_id() == product_id)?;
    Some(self.lines.remove(position))
  }

  pub fn clear(&mut self) {
    self.lines.clear();
  }

  /// Drops every line whose product id fails the predicate.
  pub fn retain_products(&mut self, mut keep: impl FnMut(u64) -> bool) {
    self.lines.retain(|l| keep(l.product_id()));
  }

  pub fn total_cents(&self) -> i64 {
    self.lines.iter().map(CartLine::line_total_cents).sum()
  }

  pub fn total_cost_cents(&self) -> i64 {
    self.lines.iter().map(CartLine::line_cost_cents).sum()
  }

  /// Sum of quantities, not number of lines.
  pub fn item_count(&self) -> u64 {
    self.lines.iter().map(|l| u64::from(l.quantity)).sum()
  }
}
