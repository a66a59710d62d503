// quinta_server/src/web/handlers/employee_handlers.rs

use actix_web::{web, HttpResponse};
use quinta::models::{DocumentKind, EmployeeDraft, EmployeePatch, Permission};
use quinta::Removal;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{ActingUser, ConfirmQuery};

#[derive(Deserialize, Debug)]
pub struct DocumentPayload {
  pub kind: DocumentKind,
  /// Already encoded by the client, usually a data URL.
  pub content: String,
}

#[instrument(name = "handler::list_employees", skip(app_state), fields(user_id = acting.user_id))]
pub async fn list_employees_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let employees = app_state.storefront.map_read(|s| s.state().roster.employees());
  Ok(HttpResponse::Ok().json(json!({ "employees": &*employees })))
}

#[instrument(name = "handler::hire_employee", skip(app_state, payload), fields(user_id = acting.user_id))]
pub async fn hire_employee_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  payload: web::Json<EmployeeDraft>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let employee = app_state.storefront.write().hire(payload.into_inner())?;
  Ok(HttpResponse::Created().json(json!({ "message": "Employee hired.", "employee": employee })))
}

#[instrument(name = "handler::update_employee", skip(app_state, path, payload), fields(user_id = acting.user_id))]
pub async fn update_employee_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
  payload: web::Json<EmployeePatch>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let employee = app_state
    .storefront
    .write()
    .update_employee(path.into_inner(), payload.into_inner())?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Employee updated.", "employee": employee })))
}

#[instrument(name = "handler::dismiss_employee", skip(app_state, path, query), fields(user_id = acting.user_id))]
pub async fn dismiss_employee_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
  query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let employee_id = path.into_inner();
  match app_state.storefront.write().dismiss_employee(employee_id, &query.confirm)? {
    Removal::Removed(employee) => Ok(HttpResponse::Ok().json(json!({ "message": "Employee removed.", "employee": employee }))),
    Removal::Missing => Err(AppError::NotFound(format!("Employee {} not found.", employee_id))),
    Removal::Declined => Err(AppError::Declined(format!(
      "Removing employee {} requires ?confirm=true.",
      employee_id
    ))),
  }
}

#[instrument(name = "handler::attach_document", skip(app_state, path, payload), fields(user_id = acting.user_id, kind = ?payload.kind))]
pub async fn attach_document_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
  payload: web::Json<DocumentPayload>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let DocumentPayload { kind, content } = payload.into_inner();
  let employee = app_state
    .storefront
    .write()
    .attach_document(path.into_inner(), kind, content)?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Document attached.", "employee": employee })))
}

#[instrument(name = "handler::pay_salary", skip(app_state, path), fields(user_id = acting.user_id, employee_id = *path))]
pub async fn pay_salary_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let transaction = app_state.storefront.write().pay_salary(path.into_inner())?;
  info!(transaction_id = transaction.id, "Salary paid.");
  Ok(HttpResponse::Created().json(json!({ "message": "Salary paid.", "transaction": transaction })))
}

#[instrument(name = "handler::open_payroll_cycle", skip(app_state), fields(user_id = acting.user_id))]
pub async fn open_payroll_cycle_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let reset = app_state.storefront.write().open_payroll_cycle()?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Payroll cycle opened.", "reset": reset })))
}
