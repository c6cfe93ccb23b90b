//! The process-wide default container and its accessors.

use crate::container::Container;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

// Empty until first access or an explicit `set_global`.
static GLOBAL_CONTAINER: Lazy<RwLock<Option<Arc<Container>>>> = Lazy::new(|| RwLock::new(None));

/// Returns the process-wide container, creating it on first access.
///
/// # Examples
///
/// ```
/// use fibre_container::{global, Content};
///
/// fn register_services() {
///   global().singleton("greeting", Content::value(String::from("Hello from global!")));
/// }
/// ```
pub fn global() -> Arc<Container> {
  if let Some(container) = &*GLOBAL_CONTAINER.read() {
    return container.clone();
  }
  let mut slot = GLOBAL_CONTAINER.write();
  slot
    .get_or_insert_with(|| {
      tracing::debug!("creating process-wide container");
      Arc::new(Container::new())
    })
    .clone()
}

/// Replaces the process-wide container and returns what was set.
///
/// Passing `None` resets it; the next [`global`] call lazily creates a new,
/// empty container. Tests use this to isolate themselves from one another.
pub fn set_global(container: Option<Arc<Container>>) -> Option<Arc<Container>> {
  tracing::debug!(cleared = container.is_none(), "replacing process-wide container");
  *GLOBAL_CONTAINER.write() = container.clone();
  container
}
