// quinta_server/src/web/routes.rs

use actix_web::web;
use quinta::CartKind;

use crate::web::handlers::{
  account_handlers, advisor_handlers, cart_handlers, category_handlers, employee_handlers, finance_handlers,
  product_handlers, session_handlers, user_handlers,
};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Cart routes shared by the storefront and the till.
fn cart_scope(path: &str, kind: CartKind) -> actix_web::Scope {
  web::scope(path)
    .app_data(web::Data::new(kind))
    .service(
      web::resource("")
        .route(web::get().to(cart_handlers::get_cart_handler))
        .route(web::post().to(cart_handlers::add_to_cart_handler))
        .route(web::delete().to(cart_handlers::clear_cart_handler)),
    )
    .route("/checkout", web::post().to(cart_handlers::checkout_handler))
    .service(
      web::resource("/{product_id}")
        .route(web::patch().to(cart_handlers::update_quantity_handler))
        .route(web::delete().to(cart_handlers::remove_from_cart_handler)),
    )
}

fn admin_scope() -> actix_web::Scope {
  web::scope("/admin")
    .route("/dashboard", web::get().to(finance_handlers::dashboard_handler))
    .service(
      web::scope("/products")
        .route("", web::post().to(product_handlers::create_product_handler))
        .service(
          web::resource("/{product_id}")
            .route(web::put().to(product_handlers::update_product_handler))
            .route(web::delete().to(product_handlers::delete_product_handler)),
        ),
    )
    .service(
      web::scope("/finance")
        .route("/summary", web::get().to(finance_handlers::finance_summary_handler))
        .route("/transactions", web::get().to(finance_handlers::list_transactions_handler)),
    )
    .service(
      web::scope("/categories")
        .service(
          web::resource("/{kind}")
            .route(web::get().to(category_handlers::list_categories_handler))
            .route(web::post().to(category_handlers::add_category_handler)),
        )
        .service(
          web::resource("/{kind}/{name}")
            .route(web::put().to(category_handlers::rename_category_handler))
            .route(web::delete().to(category_handlers::delete_category_handler)),
        ),
    )
    .service(
      web::scope("/employees")
        .service(
          web::resource("")
            .route(web::get().to(employee_handlers::list_employees_handler))
            .route(web::post().to(employee_handlers::hire_employee_handler)),
        )
        .route("/payroll/cycle", web::post().to(employee_handlers::open_payroll_cycle_handler))
        .service(
          web::resource("/{employee_id}")
            .route(web::put().to(employee_handlers::update_employee_handler))
            .route(web::delete().to(employee_handlers::dismiss_employee_handler)),
        )
        .route("/{employee_id}/pay", web::post().to(employee_handlers::pay_salary_handler))
        .route(
          "/{employee_id}/documents",
          web::post().to(employee_handlers::attach_document_handler),
        ),
    )
    .service(
      web::scope("/users")
        .service(
          web::resource("")
            .route(web::get().to(user_handlers::list_users_handler))
            .route(web::post().to(user_handlers::create_user_handler)),
        )
        .service(
          web::resource("/{user_id}")
            .route(web::put().to(user_handlers::update_user_handler))
            .route(web::delete().to(user_handlers::delete_user_handler)),
        ),
    )
    .service(
      web::scope("/accounts")
        .service(
          web::resource("")
            .route(web::get().to(account_handlers::list_accounts_handler))
            .route(web::post().to(account_handlers::open_account_handler)),
        )
        .service(
          web::resource("/{account_id}")
            .route(web::put().to(account_handlers::update_account_handler))
            .route(web::delete().to(account_handlers::close_account_handler)),
        )
        .route(
          "/{account_id}/movements",
          web::post().to(account_handlers::post_movement_handler),
        ),
    )
}

// Called from `main.rs` and from the handler tests.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .route("/sessions", web::post().to(session_handlers::create_session_handler))
      .route("/sessions/{session_id}", web::delete().to(session_handlers::close_session_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
      )
      .service(cart_scope("/cart", CartKind::Storefront))
      .service(cart_scope("/pos", CartKind::PointOfSale))
      .service(admin_scope())
      .route("/advisor", web::post().to(advisor_handlers::advisor_handler)),
  );
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;
  use crate::state::{AppState, Store};
  use actix_web::{http::StatusCode, test, App};
  use quinta::{MemoryStore, OfflineAdvisor, SharedStorefront, Storefront, StorefrontConfig};
  use serde_json::{json, Value};
  use std::sync::Arc;

  const ADMIN: (&str, &str) = ("X-Acting-User", "1");

  fn app_state() -> AppState {
    let store: Store = Box::new(MemoryStore::new());
    let storefront = Storefront::open(store, StorefrontConfig::default()).unwrap();
    AppState::new(
      SharedStorefront::new(storefront),
      Arc::new(OfflineAdvisor),
      Arc::new(AppConfig::default()),
    )
  }

  macro_rules! init_app {
    ($state:expr) => {
      test::init_service(
        App::new()
          .app_data(web::Data::new($state))
          .configure(configure_app_routes),
      )
      .await
    };
  }

  macro_rules! open_session {
    ($app:expr) => {{
      let req = test::TestRequest::post().uri("/api/v1/sessions").to_request();
      let body: Value = test::call_and_read_body_json(&$app, req).await;
      body["sessionId"].as_str().unwrap().to_string()
    }};
  }

  #[actix_rt::test]
  async fn health_check_answers_ok() {
    let app = init_app!(app_state());
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
  }

  #[actix_rt::test]
  async fn storefront_checkout_flow_settles_cart_and_stock() {
    let app = init_app!(app_state());
    let session = open_session!(app);

    let req = test::TestRequest::post()
      .uri("/api/v1/cart")
      .insert_header(("X-Session-ID", session.as_str()))
      .set_json(json!({ "productId": 2 }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::patch()
      .uri("/api/v1/cart/2")
      .insert_header(("X-Session-ID", session.as_str()))
      .set_json(json!({ "delta": 2 }))
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["cart"]["itemCount"], 3);

    let req = test::TestRequest::post()
      .uri("/api/v1/cart/checkout")
      .insert_header(("X-Session-ID", session.as_str()))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["invoice"]["totalCents"], 34_500_000);

    let req = test::TestRequest::get().uri("/api/v1/products/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["product"]["stock"], 22);

    let req = test::TestRequest::get()
      .uri("/api/v1/cart")
      .insert_header(("X-Session-ID", session.as_str()))
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["cart"]["itemCount"], 0);
  }

  #[actix_rt::test]
  async fn closed_session_is_not_found() {
    let app = init_app!(app_state());
    let session = open_session!(app);

    let req = test::TestRequest::delete()
      .uri(&format!("/api/v1/sessions/{}", session))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
      .uri("/api/v1/cart")
      .insert_header(("X-Session-ID", session.as_str()))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
      .uri(&format!("/api/v1/sessions/{}", session))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
  }

  #[actix_rt::test]
  async fn cart_requires_session_header() {
    let app = init_app!(app_state());
    let req = test::TestRequest::get().uri("/api/v1/cart").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
  }

  #[actix_rt::test]
  async fn oversell_is_rejected_with_conflict() {
    let app = init_app!(app_state());
    let session = open_session!(app);

    let req = test::TestRequest::post()
      .uri("/api/v1/cart")
      .insert_header(("X-Session-ID", session.as_str()))
      .set_json(json!({ "productId": 1 }))
      .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::patch()
      .uri("/api/v1/cart/1")
      .insert_header(("X-Session-ID", session.as_str()))
      .set_json(json!({ "delta": 20 }))
      .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
      .uri("/api/v1/cart/checkout")
      .insert_header(("X-Session-ID", session.as_str()))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["available"], 10);
  }

  #[actix_rt::test]
  async fn point_of_sale_needs_cashier_permission() {
    let app = init_app!(app_state());
    let session = open_session!(app);

    let req = test::TestRequest::get()
      .uri("/api/v1/pos")
      .insert_header(("X-Session-ID", session.as_str()))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
      .uri("/api/v1/pos")
      .insert_header(("X-Session-ID", session.as_str()))
      .insert_header(ADMIN)
      .set_json(json!({ "productId": 4 }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
      .uri("/api/v1/pos/checkout")
      .insert_header(("X-Session-ID", session.as_str()))
      .insert_header(ADMIN)
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);


    let req = test::TestRequest::get()
      .uri("/api/v1/admin/finance/transactions")
      .insert_header(ADMIN)
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["transactions"].as_array().unwrap().len(), 1);
    assert_eq!(body["transactions"][0]["description"], "Venda POS");
  }

  #[actix_rt::test]
  async fn unknown_user_is_forbidden_from_admin_routes() {
    let app = init_app!(app_state());
    let req = test::TestRequest::get()
      .uri("/api/v1/admin/dashboard")
      .insert_header(("X-Acting-User", "999"))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
  }

  #[actix_rt::test]
  async fn unconfirmed_product_delete_is_declined() {
    let app = init_app!(app_state());
    let req = test::TestRequest::delete()
      .uri("/api/v1/admin/products/3?confirm=false")
      .insert_header(ADMIN)
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::delete()
      .uri("/api/v1/admin/products/3?confirm=true")
      .insert_header(ADMIN)
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/products/3").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
  }

  #[actix_rt::test]
  async fn admin_cannot_delete_itself() {
    let app = init_app!(app_state());
    let req = test::TestRequest::delete()
      .uri("/api/v1/admin/users/1?confirm=true")
      .insert_header(ADMIN)
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
  }

  #[actix_rt::test]
  async fn category_rename_cascades_to_products() {
    let app = init_app!(app_state());
    let req = test::TestRequest::put()
      .uri("/api/v1/admin/categories/product/Equipamentos")
      .insert_header(ADMIN)
      .set_json(json!({ "newName": "Equipamento" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/products?category=Equipamento").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(!body["products"].as_array().unwrap().is_empty());
  }

  #[actix_rt::test]
  async fn payroll_pays_once_per_cycle() {
    let app = init_app!(app_state());
    let req = test::TestRequest::post()
      .uri("/api/v1/admin/employees")
      .insert_header(ADMIN)
      .set_json(json!({
          "name": "Ana Lopes",
          "role": "Tratadora",
          "salaryCents": 15_000_000,
          "category": "Produção"
      }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["employee"]["id"].as_u64().unwrap();

    let pay_uri = format!("/api/v1/admin/employees/{}/pay", id);
    let req = test::TestRequest::post().uri(&pay_uri).insert_header(ADMIN).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    let req = test::TestRequest::post().uri(&pay_uri).insert_header(ADMIN).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
  }

  #[actix_rt::test]
  async fn advisor_falls_back_when_offline() {
    let app = init_app!(app_state());
    let req = test::TestRequest::post()
      .uri("/api/v1/advisor")
      .set_json(json!({ "message": "Que ração para pintos?" }))
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["reply"], quinta::advisor::CONNECTION_FALLBACK);
  }
}
