// quinta_server/src/state.rs
use crate::config::AppConfig;
use crate::services::sessions::SessionStore;
use quinta::{Advisor, KeyValueStore, SharedStorefront};
use std::sync::Arc;

pub type Store = Box<dyn KeyValueStore>;

#[derive(Clone)]
pub struct AppState {
  pub storefront: SharedStorefront<Store>,
  pub sessions: Arc<SessionStore>,
  pub advisor: Arc<dyn Advisor>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(storefront: SharedStorefront<Store>, advisor: Arc<dyn Advisor>, config: Arc<AppConfig>) -> Self {
    Self {
      storefront,
      sessions: Arc::new(SessionStore::new(config.session_ttl)),
      advisor,
      config,
    }
  }
}
