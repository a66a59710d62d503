// quinta/src/models/product.rs

use super::uncategorized;
use serde::{Deserialize, Serialize};

/// A sellable catalog entry. Amounts are in cêntimos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: u64,
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price_cents: i64,
  #[serde(default)]
  pub cost_price_cents: i64,
  #[serde(default = "uncategorized")]
  pub category: String,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub rating: f32,
  /// Not clamped at zero; a negative value is a backorder.
  #[serde(default)]
  pub stock: i64,
}

impl Product {
  pub fn in_stock(&self) -> bool {
    self.stock > 0
  }

  /// Unit margin, sale price minus cost price.
  pub fn unit_margin_cents(&self) -> i64 {
    self.price_cents - self.cost_price_cents
  }

  pub(crate) fn matches_query(&self, needle_lowercase: &str) -> bool {
    needle_lowercase.is_empty()
      || self.name.to_lowercase().contains(needle_lowercase)
      || self.description.to_lowercase().contains(needle_lowercase)
  }
}

/// Everything a new product needs except its id, which the catalog mints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price_cents: i64,
  #[serde(default)]
  pub cost_price_cents: i64,
  #[serde(default = "uncategorized")]
  pub category: String,
  #[serde(default)]
  pub image: String,
  #[serde(default = "default_rating")]
  pub rating: f32,
  #[serde(default)]
  pub stock: i64,
}

fn default_rating() -> f32 {
  5.0
}

impl ProductDraft {
  pub(crate) fn into_product(self, id: u64) -> Product {
    Product {
      id,
      name: self.name,
      description: self.description,
      price_cents: self.price_cents,
      cost_price_cents: self.cost_price_cents,
      category: self.category,
      image: self.image,
      rating: self.rating,
      stock: self.stock,
    }
  }
}

/// Admin edit. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
  pub name: Option<String>,
  pub description: Option<String>,
  pub price_cents: Option<i64>,
  pub cost_price_cents: Option<i64>,
  pub category: Option<String>,
  pub image: Option<String>,
  pub rating: Option<f32>,
  pub stock: Option<i64>,
}

impl ProductPatch {
  pub(crate) fn apply_to(self, product: &mut Product) {
    if let Some(name) = self.name {
      product.name = name;
    }
    if let Some(description) = self.description {
      product.description = description;
    }
    if let Some(price) = self.price_cents {
      product.price_cents = price;
    }
    if let Some(cost) = self.cost_price_cents {
      product.cost_price_cents = cost;
    }
    if let Some(category) = self.category {
      product.category = category;
    }
    if let Some(image) = self.image {
      product.image = image;
    }
    if let Some(rating) = self.rating {
      product.rating = rating;
    }
    if let Some(stock) = self.stock {
      product.stock = stock;
    }
  }
}
