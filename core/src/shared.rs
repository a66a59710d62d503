// quinta/src/shared.rs
use crate::storage::KeyValueStore;
use crate::storefront::Storefront;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// A `Storefront` shared between request handlers. Many readers or a single
/// writer at a time.
///
/// IMPORTANT: guards are blocking and MUST NOT be held across `.await`
/// suspension points.
#[derive(Debug)]
pub struct SharedStorefront<S: KeyValueStore + 'static>(Arc<RwLock<Storefront<S>>>);

impl<S: KeyValueStore + 'static> SharedStorefront<S> {
  pub fn new(storefront: Storefront<S>) -> Self {
    SharedStorefront(Arc::new(RwLock::new(storefront)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, Storefront<S>> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, Storefront<S>> {
    self.0.write()
  }

  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, Storefront<S>>> {
    self.0.try_write()
  }

  /// Read guard narrowed to one part of the storefront.
  /// Example: `shared.map_read(|s| s.state().catalog.products())`
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&Storefront<S>) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }
}

impl<S: KeyValueStore + 'static> Clone for SharedStorefront<S> {
  fn clone(&self) -> Self {
    SharedStorefront(Arc::clone(&self.0))
  }
}
