use fibre_container::{alias, inject, param, Container, ConstructorTable, Content, Instance};
use std::sync::Arc;

struct Database {
  url: String,
}

struct UserRepository {
  db: Arc<Database>,
  table: &'static str,
}

fn main() {
  // Implementations the container can build by identifier.
  let constructors = Arc::new(ConstructorTable::with_root("app"));
  constructors.define("drivers/postgres", |params| {
    let url = param::<String>(params, 0)?;
    Ok(Database { url: (*url).clone() })
  });
  constructors.define("repositories/users", |params| {
    Ok(UserRepository {
      db: param::<Database>(params, 0)?,
      table: *param::<&'static str>(params, 1)?,
    })
  });

  let container = Container::builder().loader(constructors).build();

  // "db" is reachable through the "database" alias and built once.
  container.singleton(
    alias("database", "db"),
    Content::instance_factory(|c| {
      inject!(c, "./drivers/postgres", String::from("postgres://localhost/app"))
    }),
  );

  container.register(
    "users",
    Content::instance_factory(|c| {
      let db = c.resolve("database")?;
      c.inject("repositories/users", vec![db, Arc::new("users") as Instance])
    }),
  );

  let users = container.resolve_as::<UserRepository>("users").unwrap();
  println!("Repository for '{}' at {}", users.table, users.db.url);

  let db = container.resolve_as::<Database>("db").unwrap();
  assert!(Arc::ptr_eq(&users.db, &db));
}
