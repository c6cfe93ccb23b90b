use crate::container::Container;
use crate::loader::{ConstructorTable, ImplementationLoader};

use std::fmt;
use std::sync::Arc;

/// A builder for creating [`Container`] instances.
///
/// ```
/// use fibre_container::{Container, ConstructorTable};
/// use std::sync::Arc;
///
/// let table = Arc::new(ConstructorTable::with_root("app"));
/// table.define("services/clock", |_| Ok(0_u64));
///
/// let container = Container::builder().loader(table.clone()).build();
/// let ticks = container.resolve_as::<u64>("services/clock").unwrap();
/// assert_eq!(*ticks, 0);
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
  loader: Option<Arc<dyn ImplementationLoader>>,
}

impl fmt::Debug for ContainerBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ContainerBuilder")
      .field("has_loader", &self.loader.is_some())
      .finish()
  }
}

impl ContainerBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the loader used to construct providers bound to a path, and
  /// unregistered names. Defaults to an empty [`ConstructorTable`].
  pub fn loader(mut self, loader: Arc<dyn ImplementationLoader>) -> Self {
    self.loader = Some(loader);
    self
  }

  pub fn build(self) -> Container {
    let loader = self
      .loader
      .unwrap_or_else(|| Arc::new(ConstructorTable::new()));
    Container::with_loader(loader)
  }
}
