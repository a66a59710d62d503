// quinta/src/checkout.rs

//! Cart to invoice, ledger entry and stock decrement.

use crate::cart::{Cart, CartKind};
use crate::config::StockPolicy;
use crate::error::{QuintaError, QuintaResult};
use crate::ids::invoice_number;
use crate::models::{Invoice, TransactionKind, SALES_CATEGORY};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// Settles a cart.
///
/// An empty cart returns `Ok(None)` and changes nothing. Otherwise every line
/// is checked against the catalog first; if that passes, the ledger gets one
/// `ENTRADA` for the cart total, each referenced product loses the line
/// quantity from its stock, and the invoice is returned. Only a storefront
/// cart is emptied here.
///
/// Not idempotent: settling the same lines twice records two sales.
#[instrument(
  name = "checkout",
  skip(state, cart, now),
  fields(lines = cart.lines().len(), kind = %kind, policy = %policy),
  err(Display)
)]
pub fn checkout(
  state: &mut AppState,
  cart: &mut Cart,
  kind: CartKind,
  policy: StockPolicy,
  now: DateTime<Utc>,
) -> QuintaResult<Option<Invoice>> {
  if cart.is_empty() {
    return Ok(None);
  }

  check_stock(state, cart, policy)?;

  let total_cents = cart.total_cents();
  let total_cost_cents = cart.total_cost_cents();
  let invoice = Invoice {
    id: invoice_number(),
    issued_at: now,
    items: cart.lines().to_vec(),
    total_cents,
    total_cost_cents,
  };

  state.ledger.record(
    TransactionKind::Entrada,
    SALES_CATEGORY,
    kind.sale_description().to_string(),
    total_cents,
    Some(total_cost_cents),
    now,
  );

  for line in cart.lines() {
    state.catalog.decrement_stock(line.product_id(), line.quantity);
  }
  for product in state.catalog.backordered() {
    warn!(product_id = product.id, stock = product.stock, "Product is backordered after checkout.");
  }

  if kind == CartKind::Storefront {
    cart.clear();
  }

  info!(invoice_id = invoice.id, total_cents, items = invoice.item_count(), "Checkout completed.");
  Ok(Some(invoice))
}

/// Fails on the first line whose product is gone, or which asks for more
/// than is on hand when oversell is rejected. Runs before any mutation.
fn check_stock(state: &AppState, cart: &Cart, policy: StockPolicy) -> QuintaResult<()> {
  let mut requested: BTreeMap<u64, i64> = BTreeMap::new();
  for line in cart.lines() {
    *requested.entry(line.product_id()).or_insert(0) += i64::from(line.quantity);
  }

  for (product_id, quantity) in requested {
    let product = state
      .catalog
      .get(product_id)
      .ok_or_else(|| QuintaError::not_found("Product", product_id))?;
    if policy == StockPolicy::RejectOversell && product.stock < quantity {
      return Err(QuintaError::InsufficientStock {
        product_id,
        name: product.name.clone(),
        requested: quantity,
        available: product.stock,
      });
    }
  }
  Ok(())
}
