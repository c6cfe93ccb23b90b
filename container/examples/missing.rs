use fibre_container::{global, resolve, Error};
use std::panic;

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a provider that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!("services/unregistered");
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `resolve()` method ---
  println!("\nNow, attempting to resolve using the fallible `resolve()` method...");

  match global().resolve("services/unregistered") {
    Ok(_) => panic!("Should not have found the provider!"),
    Err(Error::UnknownProvider { name, target }) => {
      println!("Correctly received UnknownProvider for '{}' (looked at '{}').", name, target)
    }
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
