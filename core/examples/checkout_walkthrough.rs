// quinta/examples/checkout_walkthrough.rs

use quinta::{
  advise_or_fallback, format_kz, Cart, CartKind, CategoryKind, MemoryStore, OfflineAdvisor, QuintaError, Storefront,
  StorefrontConfig,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), QuintaError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Checkout Walkthrough ---");

  // 1. Open a storefront over an in-memory store. Missing collections are
  //    seeded with the default catalog.
  let mut storefront = Storefront::open(MemoryStore::new(), StorefrontConfig::default())?;

  // 2. Fill a storefront cart with three bags of feed.
  let mut cart = Cart::new();
  for _ in 0..3 {
    storefront.add_to_cart(&mut cart, 2)?;
  }
  info!(items = cart.item_count(), total = %format_kz(cart.total_cents()), "Cart ready.");

  // 3. Settle it.
  if let Some(invoice) = storefront.checkout(&mut cart, CartKind::Storefront)? {
    info!(invoice = invoice.id, total = %format_kz(invoice.total_cents), "Invoice issued.");
  }
  info!(stock = storefront.product(2)?.stock, "Feed stock after the sale.");

  // 4. Retire a category; its products move to "Sem Categoria".
  let outcome = storefront.delete_category(CategoryKind::Product, "Saúde", &true)?;
  info!(?outcome, "Category removed.");

  // 5. Without an API key the advisor answers with its fallback.
  let reply = advise_or_fallback(&OfflineAdvisor, "Qual ração para poedeiras?", storefront.state().catalog.products()).await;
  info!(%reply, "Advisor replied.");

  let dashboard = storefront.dashboard();
  info!(
    revenue = %format_kz(dashboard.ledger.revenue_cents),
    margin = %format_kz(dashboard.ledger.gross_margin_cents),
    "Dashboard."
  );
  Ok(())
}
