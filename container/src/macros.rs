//! Public macros for ergonomic resolution.

/// Resolves a provider from the global container.
///
/// `resolve!(name)` yields the raw [`Instance`](crate::Instance);
/// `resolve!(Type, name)` downcasts it to `Arc<Type>`.
///
/// # Panics
///
/// Panics if the provider cannot be resolved or has another type. For a
/// non-panicking version, use `global().resolve(...)` directly.
///
/// # Examples
///
/// ```
/// use fibre_container::{global, resolve, Content};
///
/// global().singleton("macro_doc_message", Content::value(String::from("hello")));
///
/// let message = resolve!(String, "macro_doc_message");
/// assert_eq!(*message, "hello");
/// ```
#[macro_export]
macro_rules! resolve {
    // resolve!("name"), or any expression yielding a name. Tried first so
    // that a call such as `resolve!(key("k"))` never reaches the type arm.
    ($name:expr) => {{
        let name = $name;
        $crate::global()
            .resolve(&name)
            .unwrap_or_else(|err| {
                panic!("Failed to resolve required provider '{}': {}", name, err)
            })
    }};

    // resolve!(MyService, "name")
    ($type:ty, $name:expr) => {{
        let name = $name;
        $crate::global()
            .resolve_as::<$type>(&name)
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required provider '{}' as {}: {}",
                    name,
                    std::any::type_name::<$type>(),
                    err
                )
            })
    }};
}

/// Resolves `name` on `container`, passing each trailing argument as a
/// constructor parameter.
///
/// Every argument is moved into its own `Arc`. To forward an instance that is
/// already shared, call [`Container::inject`](crate::Container::inject) with
/// the parameter list directly.
///
/// ```
/// use fibre_container::{inject, param, Container, ConstructorTable};
/// use std::sync::Arc;
///
/// let table = Arc::new(ConstructorTable::new());
/// table.define("greeting", |params| {
///   let name = param::<&'static str>(params, 0)?;
///   Ok(format!("Hello, {}!", name))
/// });
/// let container = Container::builder().loader(table).build();
///
/// let greeting = inject!(container, "greeting", "Robin").unwrap();
/// assert_eq!(*greeting.downcast::<String>().unwrap(), "Hello, Robin!");
/// ```
#[macro_export]
macro_rules! inject {
    ($container:expr, $name:expr $(, $param:expr)* $(,)?) => {
        $container.inject(
            $name,
            vec![$(::std::sync::Arc::new($param) as $crate::Instance),*],
        )
    };
}
