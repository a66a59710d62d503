// quinta/src/models/cart_line.rs

use super::Product;
use serde::{Deserialize, Serialize};

/// A product snapshot taken when it entered the cart, plus a quantity of at
/// least one. Prices are those of the snapshot, not the live catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  #[serde(flatten)]
  pub product: Product,
  pub quantity: u32,
}

impl CartLine {
  pub fn new(product: Product) -> Self {
    Self { product, quantity: 1 }
  }

  pub fn product_id(&self) -> u64 {
    self.product.id
  }

  pub fn line_total_cents(&self) -> i64 {
    self.product.price_cents * i64::from(self.quantity)
  }

  pub fn line_cost_cents(&self) -> i64 {
    self.product.cost_price_cents * i64::from(self.quantity)
  }
}
