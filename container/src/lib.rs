//! # Fibre Container
//!
//! A string-keyed dependency-injection registry for Rust.
//!
//! Providers are named by plain identifiers and bound at runtime to a value,
//! a factory, or a loadable implementation path. Aliases may point at
//! providers, transitively, and singleton providers cache the first value
//! they resolve to.
//!
//! ## Core Concepts
//!
//! - **Container**: holds bindings, aliases and cached instances.
//! - **Content**: what a provider is bound to: [`Content::Value`],
//!   [`Content::Factory`] or [`Content::Path`].
//! - **Implementation loader**: the [`ImplementationLoader`] a container asks
//!   to construct path-bound and unregistered providers. [`ConstructorTable`]
//!   is the built-in one.
//! - **Global Container**: a process-wide default, reachable via [`global()`]
//!   and replaceable via [`set_global`].
//!
//! ## Quick Start
//!
//! ```
//! use fibre_container::{alias, Container, Content};
//! use std::sync::Arc;
//!
//! struct Greeter {
//!   name: Arc<String>,
//! }
//!
//! let container = Container::new();
//! container.register(alias("nawa", "name"), Content::factory(|_| Ok(String::from("Robin"))));
//!
//! // Factories resolve their own dependencies through the container.
//! container.singleton(
//!   "greeter",
//!   Content::factory(|c| Ok(Greeter { name: c.resolve_as::<String>("nawa")? })),
//! );
//!
//! let greeter = container.resolve_as::<Greeter>("greeter").unwrap();
//! assert_eq!(*greeter.name, "Robin");
//! assert!(container.is_mapped("greeter"));
//! ```

mod builder;
mod container;
mod core;
mod error;
mod global;
mod loader;
mod macros;

pub use builder::ContainerBuilder;
pub use container::Container;
pub use crate::core::{alias, Content, Factory, Instance, ProviderRef};
pub use error::{Error, LoadError, Result};
pub use global::{global, set_global};
pub use loader::{param, Constructible, ConstructorTable, ImplementationLoader};
