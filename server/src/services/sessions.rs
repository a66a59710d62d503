// quinta_server/src/services/sessions.rs

//! In-memory carts keyed by session. Nothing here is persisted; a restart
//! empties every cart.

use crate::errors::AppError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use quinta::{Cart, CartKind};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};
use uuid::Uuid;

#[derive(Debug, Default)]
struct SessionCarts {
  storefront: Cart,
  point_of_sale: Cart,
}

impl SessionCarts {
  fn cart_mut(&mut self, kind: CartKind) -> &mut Cart {
    match kind {
      CartKind::Storefront => &mut self.storefront,
      CartKind::PointOfSale => &mut self.point_of_sale,
    }
  }
}

#[derive(Debug)]
struct Session {
  created_at: DateTime<Utc>,
  last_seen: DateTime<Utc>,
  carts: SessionCarts,
}

/// Idle time after which a cart session is dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Lock order: take the storefront lock before this one, never the reverse.
///
/// Sessions idle for longer than the TTL are dropped: lazily when touched,
/// and in a sweep every time a new session is opened.
#[derive(Debug)]
pub struct SessionStore {
  sessions: RwLock<HashMap<Uuid, Session>>,
  ttl: Duration,
}

impl Default for SessionStore {
  fn default() -> Self {
    Self::new(DEFAULT_SESSION_TTL)
  }
}

impl SessionStore {
  pub fn new(ttl: Duration) -> Self {
    Self {
      sessions: RwLock::new(HashMap::new()),
      ttl,
    }
  }

  fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
    (now - session.last_seen).to_std().map_or(false, |idle| idle > self.ttl)
  }

  pub fn create(&self) -> (Uuid, DateTime<Utc>) {
    self.create_at(Utc::now())
  }

  #[instrument(name = "sessions::create", skip(self))]
  pub(crate) fn create_at(&self, now: DateTime<Utc>) -> (Uuid, DateTime<Utc>) {
    let id = Uuid::new_v4();
    let mut sessions = self.sessions.write();
    let before = sessions.len();
    sessions.retain(|_, session| !self.is_expired(session, now));
    let pruned = before - sessions.len();
    if pruned > 0 {
      debug!(pruned, "Expired sessions dropped.");
    }
    sessions.insert(
      id,
      Session {
        created_at: now,
        last_seen: now,
        carts: SessionCarts::default(),
      },
    );
    debug!(session_id = %id, "Session opened.");
    (id, now)
  }

  pub fn created_at(&self, id: Uuid) -> Option<DateTime<Utc>> {
    self.sessions.read().get(&id).map(|s| s.created_at)
  }

  pub fn len(&self) -> usize {
    self.sessions.read().len()
  }

  /// Ends a session and drops its carts. Returns false for unknown ids.
  pub fn close(&self, id: Uuid) -> bool {
    self.sessions.write().remove(&id).is_some()
  }

  /// Runs `f` against one cart of a session and refreshes its idle timer.
  pub fn with_cart<R>(&self, id: Uuid, kind: CartKind, f: impl FnOnce(&mut Cart) -> R) -> Result<R, AppError> {
    self.with_cart_at(id, kind, Utc::now(), f)
  }

  pub(crate) fn with_cart_at<R>(
    &self,
    id: Uuid,
    kind: CartKind,
    now: DateTime<Utc>,
    f: impl FnOnce(&mut Cart) -> R,
  ) -> Result<R, AppError> {
    let not_found = || AppError::NotFound(format!("Session {} not found.", id));
    let mut sessions = self.sessions.write();
    let expired = match sessions.get(&id) {
      Some(session) => self.is_expired(session, now),
      None => return Err(not_found()),
    };
    if expired {
      sessions.remove(&id);
      debug!(session_id = %id, "Session expired.");
      return Err(not_found());
    }
    let session = sessions.get_mut(&id).ok_or_else(not_found)?;
    session.last_seen = now;
    Ok(f(session.carts.cart_mut(kind)))
  }

  /// Runs `f` with every cart of every session, for cascades.
  pub fn with_all_carts<R>(&self, f: impl FnOnce(Vec<&mut Cart>) -> R) -> R {
    let mut sessions = self.sessions.write();
    let carts = sessions
      .values_mut()
      .flat_map(|s| [&mut s.carts.storefront, &mut s.carts.point_of_sale])
      .collect();
    f(carts)
  }
}
