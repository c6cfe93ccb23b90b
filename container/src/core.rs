//! Core data structures: provider references, binding content and the
//! per-thread resolution guard.

use crate::container::Container;
use crate::error::{Error, Result};
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

/// A resolved value. Every provider resolves to one of these, and two
/// resolutions share a value exactly when `Arc::ptr_eq` holds.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// A factory bound as provider content. It receives the container so it can
/// resolve its own dependencies.
pub type Factory = Arc<dyn Fn(&Container) -> Result<Instance> + Send + Sync>;

thread_local! {
  // Providers currently being resolved on this thread, tagged with the id of
  // the container doing the resolving.
  static RESOLVING_STACK: RefCell<Vec<(u64, String)>> = const { RefCell::new(Vec::new()) };
}

/// An RAII guard that detects re-entrant resolution of the same provider.
///
/// Entering pushes `(container, provider)` onto the thread-local stack and
/// fails if that pair is already present. Dropping the guard pops it again,
/// so an error anywhere in a factory unwinds the stack cleanly.
pub(crate) struct ResolutionGuard {
  container_id: u64,
  provider: String,
}

impl ResolutionGuard {
  pub(crate) fn enter(container_id: u64, provider: &str) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      let cycle_start = stack
        .iter()
        .position(|(id, p)| *id == container_id && p == provider);
      if let Some(start) = cycle_start {
        let mut chain: Vec<String> = stack[start..]
          .iter()
          .filter(|(id, _)| *id == container_id)
          .map(|(_, p)| p.clone())
          .collect();
        chain.push(provider.to_owned());
        return Err(Error::CircularDependency {
          provider: provider.to_owned(),
          chain,
        });
      }
      stack.push((container_id, provider.to_owned()));
      Ok(())
    })?;

    Ok(Self {
      container_id,
      provider: provider.to_owned(),
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(pos) = stack
        .iter()
        .rposition(|(id, p)| *id == self.container_id && *p == self.provider)
      {
        stack.remove(pos);
      }
    });
  }
}

/// What a provider is bound to.
#[derive(Clone)]
pub enum Content {
  /// A ready value, returned as-is on every resolution.
  Value(Instance),
  /// A factory invoked with the container on resolution.
  Factory(Factory),
  /// An identifier handed to the implementation loader and constructed with
  /// the resolution parameters.
  Path(String),
}

impl Content {
  /// Binds a concrete value. Closures passed here are stored, never invoked.
  pub fn value<T: Any + Send + Sync>(value: T) -> Self {
    Content::Value(Arc::new(value))
  }

  /// Binds an already shared instance without wrapping it again.
  pub fn instance(instance: Instance) -> Self {
    Content::Value(instance)
  }

  /// Binds a typed factory.
  pub fn factory<T, F>(factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    Content::Factory(Arc::new(move |container: &Container| -> Result<Instance> {
      factory(container).map(|value| Arc::new(value) as Instance)
    }))
  }

  /// Binds a factory that already produces an [`Instance`], such as one that
  /// forwards the result of another resolution.
  pub fn instance_factory<F>(factory: F) -> Self
  where
    F: Fn(&Container) -> Result<Instance> + Send + Sync + 'static,
  {
    Content::Factory(Arc::new(factory))
  }

  /// Binds a loadable implementation identifier.
  pub fn path(path: impl Into<String>) -> Self {
    Content::Path(path.into())
  }

  pub fn as_path(&self) -> Option<&str> {
    match self {
      Content::Path(path) => Some(path),
      _ => None,
    }
  }

  pub fn as_value(&self) -> Option<&Instance> {
    match self {
      Content::Value(value) => Some(value),
      _ => None,
    }
  }

  pub fn is_factory(&self) -> bool {
    matches!(self, Content::Factory(_))
  }
}

impl fmt::Debug for Content {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Content::Value(_) => write!(f, "Content::Value(..)"),
      Content::Factory(_) => write!(f, "Content::Factory(..)"),
      Content::Path(path) => write!(f, "Content::Path({:?})", path),
    }
  }
}

/// Names the provider a registration or mapping applies to, optionally
/// recording an alias for it at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderRef {
  Name(String),
  Aliased { alias: String, provider: String },
}

impl ProviderRef {
  /// The canonical provider identifier.
  pub fn provider(&self) -> &str {
    match self {
      ProviderRef::Name(name) => name,
      ProviderRef::Aliased { provider, .. } => provider,
    }
  }

  pub fn alias(&self) -> Option<&str> {
    match self {
      ProviderRef::Name(_) => None,
      ProviderRef::Aliased { alias, .. } => Some(alias),
    }
  }
}

impl From<&str> for ProviderRef {
  fn from(name: &str) -> Self {
    ProviderRef::Name(name.to_owned())
  }
}

impl From<String> for ProviderRef {
  fn from(name: String) -> Self {
    ProviderRef::Name(name)
  }
}

impl From<&String> for ProviderRef {
  fn from(name: &String) -> Self {
    ProviderRef::Name(name.clone())
  }
}

/// Builds a descriptor that registers `provider` and points `alias` at it.
///
/// ```
/// use fibre_container::{alias, Container, Content};
///
/// let container = Container::new();
/// container.register(alias("nawa", "name"), Content::value("Robin"));
/// assert_eq!(container.resolve_alias("nawa").unwrap(), "name");
/// ```
pub fn alias(alias: impl Into<String>, provider: impl Into<String>) -> ProviderRef {
  ProviderRef::Aliased {
    alias: alias.into(),
    provider: provider.into(),
  }
}
