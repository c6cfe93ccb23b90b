//! The implementation loader seam: turning an identifier into something the
//! container can construct.

use crate::core::Instance;
use crate::error::{Error, LoadError, Result};
use dashmap::DashMap;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Something the container can instantiate with a parameter list.
pub trait Constructible: Send + Sync {
  fn construct(&self, params: &[Instance]) -> Result<Instance>;
}

impl<F> Constructible for F
where
  F: Fn(&[Instance]) -> Result<Instance> + Send + Sync,
{
  fn construct(&self, params: &[Instance]) -> Result<Instance> {
    self(params)
  }
}

/// Resolves an identifier to a constructible implementation.
///
/// The container consults its loader only when a provider's content is a
/// [`Content::Path`](crate::Content::Path) or when the requested name is not
/// registered at all. Any failure is reported to the caller of `resolve` as
/// [`Error::UnknownProvider`].
pub trait ImplementationLoader: Send + Sync {
  fn load(&self, identifier: &str) -> Result<Arc<dyn Constructible>, LoadError>;
}

/// An in-memory [`ImplementationLoader`] keyed by normalized identifier.
///
/// Identifiers are resolved relative to the table's root: `.` and empty
/// segments are dropped and `..` steps up one segment, never above the top.
/// `"./services/../db"` under root `"app"` therefore names `"app/db"`.
pub struct ConstructorTable {
  root: String,
  constructors: DashMap<String, Arc<dyn Constructible>>,
}

impl ConstructorTable {
  pub fn new() -> Self {
    Self::with_root("")
  }

  /// Creates a table whose identifiers are resolved relative to `root`.
  pub fn with_root(root: impl Into<String>) -> Self {
    let root = normalize("", &root.into());
    Self {
      root,
      constructors: DashMap::new(),
    }
  }

  pub fn root(&self) -> &str {
    &self.root
  }

  /// The key `identifier` is stored and looked up under.
  pub fn resolve_identifier(&self, identifier: &str) -> String {
    normalize(&self.root, identifier)
  }

  /// Registers a typed constructor. The returned value is wrapped into an
  /// [`Instance`] on every call.
  pub fn define<T, F>(&self, identifier: &str, constructor: F)
  where
    T: Any + Send + Sync,
    F: Fn(&[Instance]) -> Result<T> + Send + Sync + 'static,
  {
    let constructor = move |params: &[Instance]| -> Result<Instance> {
      constructor(params).map(|value| Arc::new(value) as Instance)
    };
    self.insert(identifier, Arc::new(constructor));
  }

  /// Registers an arbitrary [`Constructible`].
  pub fn insert(&self, identifier: &str, constructor: Arc<dyn Constructible>) {
    let key = self.resolve_identifier(identifier);
    tracing::debug!(identifier = %key, "defining constructor");
    self.constructors.insert(key, constructor);
  }

  pub fn remove(&self, identifier: &str) -> bool {
    self
      .constructors
      .remove(&self.resolve_identifier(identifier))
      .is_some()
  }

  pub fn contains(&self, identifier: &str) -> bool {
    self
      .constructors
      .contains_key(&self.resolve_identifier(identifier))
  }

  pub fn len(&self) -> usize {
    self.constructors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.constructors.is_empty()
  }
}

impl Default for ConstructorTable {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for ConstructorTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConstructorTable")
      .field("root", &self.root)
      .field("constructors", &self.constructors.len())
      .finish()
  }
}

impl ImplementationLoader for ConstructorTable {
  fn load(&self, identifier: &str) -> Result<Arc<dyn Constructible>, LoadError> {
    let target = self.resolve_identifier(identifier);
    if target.is_empty() {
      return Err(LoadError::Rejected {
        target,
        reason: "identifier is empty".to_string(),
      });
    }
    match self.constructors.get(&target) {
      Some(entry) => Ok(entry.value().clone()),
      None => Err(LoadError::NotFound { target }),
    }
  }
}

fn normalize(root: &str, identifier: &str) -> String {
  let mut segments: Vec<&str> = Vec::new();
  for segment in root.split('/').chain(identifier.split('/')) {
    match segment {
      "" | "." => {}
      ".." => {
        segments.pop();
      }
      other => segments.push(other),
    }
  }
  segments.join("/")
}

/// Fetches constructor parameter `index` as a `T`.
///
/// ```
/// use fibre_container::{param, Instance};
/// use std::sync::Arc;
///
/// let params: Vec<Instance> = vec![Arc::new(8080_u16)];
/// assert_eq!(*param::<u16>(&params, 0).unwrap(), 8080);
/// assert!(param::<u16>(&params, 1).is_err());
/// ```
pub fn param<T: Any + Send + Sync>(params: &[Instance], index: usize) -> Result<Arc<T>> {
  params
    .get(index)
    .cloned()
    .and_then(|value| value.downcast::<T>().ok())
    .ok_or_else(|| Error::BadParameter {
      index,
      expected: type_name::<T>(),
    })
}
