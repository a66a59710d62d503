// quinta_server/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use quinta::models::Permission;
use quinta::{CategoryKind, Removal};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{ActingUser, ConfirmQuery};

#[derive(Deserialize, Debug)]
pub struct CategoryPayload {
  pub name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RenameCategoryPayload {
  pub new_name: String,
}

fn area(kind: CategoryKind) -> Permission {
  match kind {
    CategoryKind::Product => Permission::Stock,
    CategoryKind::Staff => Permission::Rh,
  }
}

#[instrument(name = "handler::list_categories", skip(app_state, path))]
pub async fn list_categories_handler(
  app_state: web::Data<AppState>,
  path: web::Path<CategoryKind>,
) -> Result<HttpResponse, AppError> {
  let kind = path.into_inner();
  let categories = app_state.storefront.map_read(|s| s.state().categories.list(kind));
  Ok(HttpResponse::Ok().json(json!({ "kind": kind, "categories": &*categories })))
}

#[instrument(name = "handler::add_category", skip(app_state, path, payload), fields(user_id = acting.user_id))]
pub async fn add_category_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<CategoryKind>,
  payload: web::Json<CategoryPayload>,
) -> Result<HttpResponse, AppError> {
  let kind = path.into_inner();
  acting.require(&app_state, area(kind))?;
  let name = app_state.storefront.write().add_category(kind, &payload.name)?;
  Ok(HttpResponse::Created().json(json!({ "message": "Category added.", "name": name })))
}

#[instrument(name = "handler::rename_category", skip(app_state, path, payload), fields(user_id = acting.user_id))]
pub async fn rename_category_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<(CategoryKind, String)>,
  payload: web::Json<RenameCategoryPayload>,
) -> Result<HttpResponse, AppError> {
  let (kind, old) = path.into_inner();
  acting.require(&app_state, area(kind))?;
  let report = app_state
    .storefront
    .write()
    .rename_category(kind, &old, &payload.new_name)?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Category renamed.", "updated": report })))
}

#[instrument(name = "handler::delete_category", skip(app_state, path, query), fields(user_id = acting.user_id))]
pub async fn delete_category_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<(CategoryKind, String)>,
  query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse, AppError> {
  let (kind, name) = path.into_inner();
  acting.require(&app_state, area(kind))?;
  let outcome = app_state
    .storefront
    .write()
    .delete_category(kind, &name, &query.confirm)?;
  match outcome {
    Removal::Removed(report) => Ok(HttpResponse::Ok().json(json!({
        "message": "Category deleted; records moved to 'Sem Categoria'.",
        "reassigned": report
    }))),
    Removal::Missing => Err(AppError::NotFound(format!("Category '{}' not found.", name))),
    Removal::Declined => Err(AppError::Declined(format!("Deleting category '{}' requires ?confirm=true.", name))),
  }
}
