// quinta_server/src/web/handlers/mod.rs

pub mod account_handlers;
pub mod advisor_handlers;
pub mod cart_handlers;
pub mod category_handlers;
pub mod employee_handlers;
pub mod finance_handlers;
pub mod product_handlers;
pub mod session_handlers;
pub mod user_handlers;
