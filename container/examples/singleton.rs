use fibre_container::{global, resolve, Content};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  // --- Singleton Registration ---
  // This factory will only be called ONCE.
  global().singleton(
    "singleton_tracker",
    Content::factory(|_| {
      println!("Creating SINGLETON RequestTracker...");
      Ok(RequestTracker {
        id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
      })
    }),
  );

  // --- Transient Registration ---
  // This factory will be called EVERY time the provider is resolved.
  global().register(
    "transient_tracker",
    Content::factory(|_| {
      println!("Creating TRANSIENT RequestTracker...");
      Ok(RequestTracker {
        id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
      })
    }),
  );

  println!("--- Resolving Singletons ---");
  let s1 = resolve!(RequestTracker, "singleton_tracker");
  let s2 = resolve!(RequestTracker, "singleton_tracker");
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");
  assert!(global().is_mapped("singleton_tracker"));

  println!("--- Resolving Transients ---");
  let t1 = resolve!(RequestTracker, "transient_tracker");
  let t2 = resolve!(RequestTracker, "transient_tracker");
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert!(!Arc::ptr_eq(&t1, &t2), "Transient instances should be different");
  assert!(!global().is_mapped("transient_tracker"));
}
