// quinta_server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use quinta::models::{Permission, ProductDraft, ProductPatch};
use quinta::Removal;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{ActingUser, ConfirmQuery};

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  pub category: Option<String>,
  #[serde(default)]
  pub q: String,
}

#[instrument(name = "handler::list_products", skip(app_state, query_params))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let storefront = app_state.storefront.read();
  let products = storefront.search_products(query_params.category.as_deref(), &query_params.q);
  info!("Successfully fetched {} products.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let storefront = app_state.storefront.read();
  let product = storefront.product(product_id)?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Product fetched successfully.",
      "product": product
  })))
}

#[instrument(name = "handler::create_product", skip(app_state, payload), fields(user_id = acting.user_id))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  payload: web::Json<ProductDraft>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Stock)?;
  let product = app_state.storefront.write().add_product(payload.into_inner())?;
  info!(product_id = product.id, "Product created.");
  Ok(HttpResponse::Created().json(json!({
      "message": "Product created.",
      "product": product
  })))
}

#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(user_id = acting.user_id))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
  payload: web::Json<ProductPatch>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Stock)?;
  let product = app_state
    .storefront
    .write()
    .update_product(path.into_inner(), payload.into_inner())?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Product updated.",
      "product": product
  })))
}

/// Deletes a product and drops it from every open cart.
#[instrument(name = "handler::delete_product", skip(app_state, path, query), fields(user_id = acting.user_id))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
  query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Stock)?;
  let product_id = path.into_inner();
  let outcome = {
    let mut storefront = app_state.storefront.write();
    app_state
      .sessions
      .with_all_carts(|carts| storefront.delete_product(product_id, &query.confirm, carts))?
  };

  match outcome {
    Removal::Removed(product) => Ok(HttpResponse::Ok().json(json!({
        "message": "Product deleted.",
        "product": product
    }))),
    Removal::Missing => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)))
    }
    Removal::Declined => Err(AppError::Declined(format!(
      "Deleting product {} requires ?confirm=true.",
      product_id
    ))),
  }
}
