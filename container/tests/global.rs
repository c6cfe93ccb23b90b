//! Tests for the process-wide container and the `resolve!` macro.
//! Every test here swaps the global instance, so they run serially.

use fibre_container::{global, resolve, set_global, Container, Content};
use serial_test::serial;
use std::panic;
use std::sync::Arc;

#[test]
#[serial]
fn test_set_instance_then_get_instance() {
  let container = Arc::new(Container::new());
  let returned = Container::set_instance(Some(container.clone())).unwrap();

  assert!(Arc::ptr_eq(&returned, &container));
  assert!(Arc::ptr_eq(&container, &Container::instance()));
  assert!(Arc::ptr_eq(&container, &global()));

  assert!(Container::set_instance(None).is_none());
  let fresh = Container::instance();

  assert!(!Arc::ptr_eq(&container, &fresh));
  assert!(Arc::ptr_eq(&fresh, &Container::instance()));
}

#[test]
#[serial]
fn test_global_is_created_lazily_and_kept() {
  set_global(None);

  let first = global();
  first.map("lazy_marker", 1_u8);

  let second = global();
  assert!(Arc::ptr_eq(&first, &second));
  assert!(second.is_mapped("lazy_marker"));
}

#[test]
#[serial]
fn test_reset_discards_registrations() {
  set_global(None);
  global().singleton("reset_marker", Content::value(1_u8));
  assert!(global().is_registered("reset_marker"));

  set_global(None);
  assert!(!global().is_registered("reset_marker"));
}

#[test]
#[serial]
fn test_resolve_macro_uses_global() {
  set_global(Some(Arc::new(Container::new())));
  global().singleton("color", Content::factory(|_| Ok(String::from("Black"))));

  let typed = resolve!(String, "color");
  let raw = resolve!("color");

  assert_eq!(*typed, "Black");
  assert!(Arc::ptr_eq(&raw.downcast::<String>().unwrap(), &typed));
}

#[test]
#[serial]
fn test_resolve_macro_panics_on_missing_provider() {
  set_global(Some(Arc::new(Container::new())));

  let result = panic::catch_unwind(|| {
    resolve!("missing_service");
  });
  assert!(result.is_err());

  let result = panic::catch_unwind(|| {
    resolve!(String, "missing_service");
  });
  assert!(result.is_err());
}

#[test]
#[serial]
fn test_factories_see_the_global_container() {
  set_global(Some(Arc::new(Container::new())));
  global().map("db_url", String::from("postgres://localhost"));
  global().register(
    "dsn",
    Content::factory(|_| {
      let url = resolve!(String, "db_url");
      Ok(format!("{}/app", url))
    }),
  );

  assert_eq!(*resolve!(String, "dsn"), "postgres://localhost/app");
}

#[test]
#[serial]
fn test_resolve_macro_accepts_name_expressions() {
  fn key(name: &str) -> String {
    format!("services/{}", name)
  }

  set_global(Some(Arc::new(Container::new())));
  global().map("services/clock", 7_u64);

  let raw = resolve!(key("clock"));
  assert_eq!(*raw.downcast::<u64>().unwrap(), 7);

  let typed = resolve!(u64, key("clock"));
  assert_eq!(*typed, 7);

  let name = String::from("services/clock");
  assert_eq!(*resolve!(u64, &name), 7);
  assert!(resolve!(name.as_str()).downcast::<u64>().is_ok());
}
