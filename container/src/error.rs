use thiserror::Error;

/// The main error type for `fibre_container`.
#[derive(Debug, Error)]
pub enum Error {
  /// The requested provider had to be constructed by identifier and the
  /// implementation loader could not find it.
  #[error("Provider for '{name}' not found at '{target}'")]
  UnknownProvider { name: String, target: String },

  /// An alias chain loops back onto itself.
  #[error("Circular alias chain while resolving '{name}': {}", .chain.join(" -> "))]
  CircularAlias { name: String, chain: Vec<String> },

  /// A factory or constructor requested a provider that is already being
  /// resolved further up the same call stack.
  #[error("Circular dependency detected while resolving '{provider}': {}", .chain.join(" -> "))]
  CircularDependency { provider: String, chain: Vec<String> },

  /// The resolved instance is not of the requested type.
  #[error("Provider '{provider}' does not resolve to {expected}")]
  TypeMismatch {
    provider: String,
    expected: &'static str,
  },

  /// A constructor parameter was missing or had an unexpected type.
  #[error("Constructor parameter #{index} is missing or is not {expected}")]
  BadParameter {
    index: usize,
    expected: &'static str,
  },

  /// A factory or constructor failed for its own reasons.
  #[error("Failed to construct provider: {0}")]
  Construction(String),
}

impl Error {
  /// Wraps any displayable failure raised inside a factory or constructor.
  pub fn construction(reason: impl std::fmt::Display) -> Self {
    Error::Construction(reason.to_string())
  }
}

/// A specialized `Result` type for `fibre_container` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors reported by an [`ImplementationLoader`](crate::ImplementationLoader).
///
/// The container never surfaces these directly; a failed load becomes
/// [`Error::UnknownProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
  #[error("no implementation registered at '{target}'")]
  NotFound { target: String },

  #[error("cannot load '{target}': {reason}")]
  Rejected { target: String, reason: String },
}

impl LoadError {
  /// The normalized load target the loader looked at.
  pub fn target(&self) -> &str {
    match self {
      LoadError::NotFound { target } | LoadError::Rejected { target, .. } => target,
    }
  }
}
