//! The main `Container` struct and its associated methods.

use crate::builder::ContainerBuilder;
use crate::core::{Content, Instance, ProviderRef, ResolutionGuard};
use crate::error::{Error, Result};
use crate::loader::ImplementationLoader;
use dashmap::DashMap;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Clone)]
struct Binding {
  content: Content,
  singleton: bool,
}

/// The dependency-injection registry.
///
/// Providers are plain string identifiers. Each one may carry a binding (its
/// [`Content`] and singleton flag), any number of aliases may point at it, and
/// a cached instance may be mapped for it, either because a singleton was
/// resolved or because an instance was injected with [`Container::map`].
///
/// All methods take `&self`, so factories receive the container by reference
/// and may register, map or resolve further providers while running.
pub struct Container {
  id: u64,
  bindings: DashMap<String, Binding>,
  aliases: DashMap<String, String>,
  instances: DashMap<String, Instance>,
  loader: Arc<dyn ImplementationLoader>,
}

impl Default for Container {
  fn default() -> Self {
    ContainerBuilder::new().build()
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("id", &self.id)
      .field("bindings", &self.bindings.len())
      .field("aliases", &self.aliases.len())
      .field("instances", &self.instances.len())
      .finish_non_exhaustive()
  }
}

impl Container {
  /// Creates a new, empty `Container` with an empty constructor table.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::new()
  }

  pub(crate) fn with_loader(loader: Arc<dyn ImplementationLoader>) -> Self {
    Self {
      id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
      bindings: DashMap::new(),
      aliases: DashMap::new(),
      instances: DashMap::new(),
      loader,
    }
  }

  pub fn loader(&self) -> &Arc<dyn ImplementationLoader> {
    &self.loader
  }

  // --- PRIVATE HELPERS ---

  /// Records the alias carried by `provider`, if any, and returns the
  /// canonical identifier.
  fn record_alias(&self, provider: ProviderRef) -> String {
    match provider {
      ProviderRef::Name(name) => name,
      ProviderRef::Aliased { alias, provider } => {
        debug!(alias = %alias, provider = %provider, "recording alias");
        self.aliases.insert(alias, provider.clone());
        provider
      }
    }
  }

  fn cached(&self, provider: &str) -> Option<Instance> {
    self
      .instances
      .get(provider)
      .map(|entry| entry.value().clone())
  }

  fn binding(&self, provider: &str) -> Option<Binding> {
    self
      .bindings
      .get(provider)
      .map(|entry| entry.value().clone())
  }

  fn construct(&self, name: &str, target: &str, params: &[Instance]) -> Result<Instance> {
    let constructor = self.loader.load(target).map_err(|err| {
      debug!(name = %name, error = %err, "implementation loader failed");
      Error::UnknownProvider {
        name: name.to_owned(),
        target: err.target().to_owned(),
      }
    })?;
    constructor.construct(params)
  }

  // --- PUBLIC API ---

  // --- Registration ---

  /// Binds `provider` to `content`, replacing any previous binding and
  /// dropping any instance cached for it.
  ///
  /// With no content the provider is bound to its own identifier as a
  /// [`Content::Path`], so resolving it asks the loader for that name.
  pub fn bind(
    &self,
    provider: impl Into<ProviderRef>,
    content: impl Into<Option<Content>>,
    singleton: bool,
  ) {
    let provider = self.record_alias(provider.into());
    let content = content
      .into()
      .unwrap_or_else(|| Content::Path(provider.clone()));
    debug!(provider = %provider, singleton, content = ?content, "registering provider");
    self.instances.remove(&provider);
    self
      .bindings
      .insert(provider, Binding { content, singleton });
  }

  /// Registers a non-singleton provider. See [`Container::bind`].
  pub fn register(&self, provider: impl Into<ProviderRef>, content: impl Into<Option<Content>>) {
    self.bind(provider, content, false);
  }

  /// Registers a provider whose first resolved value is cached and reused.
  pub fn singleton(&self, provider: impl Into<ProviderRef>, content: impl Into<Option<Content>>) {
    self.bind(provider, content, true);
  }

  /// Removes the binding and cached instance for exactly `provider`.
  ///
  /// Aliases are left alone; one that pointed here now leads to a bare,
  /// unregistered identifier.
  pub fn unregister(&self, provider: &str) {
    debug!(provider = %provider, "unregistering provider");
    self.bindings.remove(provider);
    self.instances.remove(provider);
  }

  /// Stores `instance` as the cached value of `provider`, bypassing its
  /// binding entirely. Later resolutions return this value until the provider
  /// is registered again or unregistered.
  pub fn map<T: Any + Send + Sync>(&self, provider: impl Into<ProviderRef>, instance: T) {
    self.map_instance(provider, Arc::new(instance));
  }

  /// Like [`Container::map`], for a value that is already an [`Instance`].
  pub fn map_instance(&self, provider: impl Into<ProviderRef>, instance: Instance) {
    let provider = self.record_alias(provider.into());
    debug!(provider = %provider, "mapping instance");
    self.instances.insert(provider, instance);
  }

  // --- Introspection ---

  /// True if a binding exists for exactly this identifier.
  pub fn is_registered(&self, provider: &str) -> bool {
    self.bindings.contains_key(provider)
  }

  /// True if an instance is cached for exactly this identifier.
  pub fn is_mapped(&self, provider: &str) -> bool {
    self.instances.contains_key(provider)
  }

  /// True if the identifier is registered as a singleton. Unknown identifiers
  /// are simply not singletons.
  pub fn is_singleton(&self, provider: &str) -> bool {
    self
      .bindings
      .get(provider)
      .is_some_and(|binding| binding.singleton)
  }

  /// Follows the alias chain starting at `name` to its canonical provider.
  /// A name without an alias is returned unchanged.
  pub fn resolve_alias(&self, name: &str) -> Result<String> {
    let mut current = name.to_owned();
    let mut chain = vec![current.clone()];
    while let Some(target) = self.aliases.get(&current).map(|t| t.value().clone()) {
      trace!(alias = %current, target = %target, "following alias");
      if chain.contains(&target) {
        chain.push(target);
        return Err(Error::CircularAlias {
          name: name.to_owned(),
          chain,
        });
      }
      chain.push(target.clone());
      current = target;
    }
    Ok(current)
  }

  /// The content bound to `provider`, or the identifier itself as a
  /// [`Content::Path`] if nothing is registered under it.
  pub fn get_content(&self, provider: &str) -> Content {
    self
      .binding(provider)
      .map(|binding| binding.content)
      .unwrap_or_else(|| Content::Path(provider.to_owned()))
  }

  /// All registered provider identifiers, sorted.
  pub fn providers(&self) -> Vec<String> {
    let mut providers: Vec<String> = self.bindings.iter().map(|e| e.key().clone()).collect();
    providers.sort();
    providers
  }

  /// All `(alias, target)` pairs, sorted by alias.
  pub fn aliases(&self) -> Vec<(String, String)> {
    let mut aliases: Vec<(String, String)> = self
      .aliases
      .iter()
      .map(|e| (e.key().clone(), e.value().clone()))
      .collect();
    aliases.sort();
    aliases
  }

  /// Forgets every binding, alias and cached instance.
  pub fn clear(&self) {
    debug!("clearing container");
    self.bindings.clear();
    self.aliases.clear();
    self.instances.clear();
  }

  // --- Resolution ---

  /// Resolves `name` with no constructor parameters.
  pub fn resolve(&self, name: &str) -> Result<Instance> {
    self.resolve_with(name, &[])
  }

  /// Resolves `name` to an instance.
  ///
  /// Aliases are followed first and a cached instance is returned untouched.
  /// Otherwise the content decides: a value is returned, a factory is called
  /// with this container, and a path is loaded and constructed with `params`.
  /// Singletons cache the result under the canonical identifier.
  ///
  /// # Errors
  ///
  /// [`Error::UnknownProvider`] when a path cannot be loaded,
  /// [`Error::CircularAlias`] and [`Error::CircularDependency`] on cycles, and
  /// whatever a factory or constructor returns.
  pub fn resolve_with(&self, name: &str, params: &[Instance]) -> Result<Instance> {
    let provider = self.resolve_alias(name)?;
    if let Some(instance) = self.cached(&provider) {
      trace!(provider = %provider, "returning mapped instance");
      return Ok(instance);
    }

    let _guard = ResolutionGuard::enter(self.id, &provider)?;

    // No map guard may be held past this point: factories re-enter the container.
    let content = self.get_content(&provider);

    let instance = match content {
      Content::Value(value) => value,
      Content::Factory(factory) => factory(self)?,
      Content::Path(target) => self.construct(name, &target, params)?,
    };

    // Read the flag only now: the factory may have re-registered or
    // unregistered its own provider.
    if self.is_singleton(&provider) {
      trace!(provider = %provider, "caching singleton instance");
      self.instances.insert(provider, instance.clone());
    }
    Ok(instance)
  }

  /// Resolves `name`, passing `params` positionally to its constructor. The
  /// [`inject!`](crate::inject) macro builds the parameter list from plain values.
  pub fn inject(&self, name: &str, params: Vec<Instance>) -> Result<Instance> {
    self.resolve_with(name, &params)
  }

  /// Resolves `name` and downcasts the instance to `T`.
  pub fn resolve_as<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self
      .resolve(name)?
      .downcast::<T>()
      .map_err(|_| Error::TypeMismatch {
        provider: name.to_owned(),
        expected: type_name::<T>(),
      })
  }

  // --- Process-wide instance ---

  /// The process-wide container, created on first use. See [`crate::global`].
  pub fn instance() -> Arc<Container> {
    crate::global::global()
  }

  /// Replaces the process-wide container. `None` clears it so the next call
  /// to [`Container::instance`] creates a fresh one. Returns what was set.
  pub fn set_instance(instance: Option<Arc<Container>>) -> Option<Arc<Container>> {
    crate::global::set_global(instance)
  }
}
