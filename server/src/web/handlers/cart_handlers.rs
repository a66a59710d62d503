// quinta_server/src/web/handlers/cart_handlers.rs

//! Cart routes. The same handlers serve `/cart` (storefront) and `/pos`
//! (point of sale); the scope registers which `CartKind` applies.

use actix_web::{web, HttpResponse};
use quinta::models::Permission;
use quinta::{Cart, CartKind};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{ActingUser, SessionId};

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub product_id: u64,
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityPayload {
  pub delta: i64,
}

fn cart_json(cart: &Cart) -> Value {
  json!({
      "items": cart.lines(),
      "itemCount": cart.item_count(),
      "totalCents": cart.total_cents(),
  })
}

/// The till is a back-office surface and needs the `caixa` permission.
fn authorize(app_state: &AppState, kind: CartKind, acting: Option<ActingUser>) -> Result<(), AppError> {
  match kind {
    CartKind::Storefront => Ok(()),
    CartKind::PointOfSale => acting
      .ok_or_else(|| AppError::Auth("The point of sale requires an X-Acting-User header.".to_string()))?
      .require(app_state, Permission::Caixa),
  }
}

// --- Handler Implementation ---

#[instrument(name = "handler::get_cart", skip(app_state, kind, acting), fields(session = %session.0, kind = %kind.get_ref()))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  kind: web::Data<CartKind>,
  session: SessionId,
  acting: Option<ActingUser>,
) -> Result<HttpResponse, AppError> {
  authorize(&app_state, **kind, acting)?;
  let cart = app_state.sessions.with_cart(session.0, **kind, |cart| cart_json(cart))?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Cart fetched.", "cart": cart })))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, kind, acting, req_payload),
    fields(session = %session.0, product_id = req_payload.product_id)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  kind: web::Data<CartKind>,
  session: SessionId,
  acting: Option<ActingUser>,
  req_payload: web::Json<AddToCartRequestPayload>,
) -> Result<HttpResponse, AppError> {
  authorize(&app_state, **kind, acting)?;
  let storefront = app_state.storefront.read();
  let cart = app_state.sessions.with_cart(session.0, **kind, |cart| {
    storefront.add_to_cart(cart, req_payload.product_id)?;
    Ok::<_, AppError>(cart_json(cart))
  })??;
  info!("Product added to cart.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Product added to cart.", "cart": cart })))
}

#[instrument(name = "handler::update_cart_quantity", skip(app_state, kind, acting, path, payload), fields(session = %session.0))]
pub async fn update_quantity_handler(
  app_state: web::Data<AppState>,
  kind: web::Data<CartKind>,
  session: SessionId,
  acting: Option<ActingUser>,
  path: web::Path<u64>,
  payload: web::Json<UpdateQuantityPayload>,
) -> Result<HttpResponse, AppError> {
  authorize(&app_state, **kind, acting)?;
  let product_id = path.into_inner();
  let cart = app_state.sessions.with_cart(session.0, **kind, |cart| {
    cart
      .update_quantity(product_id, payload.delta)
      .map(|_| ())
      .map(|()| cart_json(cart))
      .ok_or_else(|| AppError::NotFound(format!("Product {} is not in the cart.", product_id)))
  })??;
  Ok(HttpResponse::Ok().json(json!({ "message": "Quantity updated.", "cart": cart })))
}

#[instrument(name = "handler::remove_from_cart", skip(app_state, kind, acting, path), fields(session = %session.0))]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  kind: web::Data<CartKind>,
  session: SessionId,
  acting: Option<ActingUser>,
  path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
  authorize(&app_state, **kind, acting)?;
  let product_id = path.into_inner();
  let cart = app_state.sessions.with_cart(session.0, **kind, |cart| {
    cart.remove(product_id);
    cart_json(cart)
  })?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Line removed.", "cart": cart })))
}

#[instrument(name = "handler::clear_cart", skip(app_state, kind, acting), fields(session = %session.0))]
pub async fn clear_cart_handler(
  app_state: web::Data<AppState>,
  kind: web::Data<CartKind>,
  session: SessionId,
  acting: Option<ActingUser>,
) -> Result<HttpResponse, AppError> {
  authorize(&app_state, **kind, acting)?;
  let cart = app_state.sessions.with_cart(session.0, **kind, |cart| {
    cart.clear();
    cart_json(cart)
  })?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Cart cleared.", "cart": cart })))
}

/// Settles the session cart. The point of sale empties its cart after a
/// successful sale.
#[instrument(name = "handler::checkout", skip(app_state, kind, acting), fields(session = %session.0, kind = %kind.get_ref()))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  kind: web::Data<CartKind>,
  session: SessionId,
  acting: Option<ActingUser>,
) -> Result<HttpResponse, AppError> {
  authorize(&app_state, **kind, acting)?;
  let kind = **kind;
  let invoice = {
    let mut storefront = app_state.storefront.write();
    app_state.sessions.with_cart(session.0, kind, |cart| {
      let invoice = storefront.checkout(cart, kind)?;
      if kind == CartKind::PointOfSale && invoice.is_some() {
        cart.clear();
      }
      Ok::<_, AppError>(invoice)
    })??
  };

  match invoice {
    Some(invoice) => {
      info!(invoice_id = invoice.id, total_cents = invoice.total_cents, "Sale completed.");
      Ok(HttpResponse::Created().json(json!({
          "message": "Checkout completed.",
          "invoice": invoice
      })))
    }
    None => Ok(HttpResponse::Ok().json(json!({
        "message": "Cart is empty; nothing to check out.",
        "invoice": null
    }))),
  }
}
