mod commands;
mod user;

pub use commands::{AdminCommands, UserCommands};
pub use user::{run_user_add, run_user_list};

use crate::config::database_path;
use crate::store::{SqliteStore, Store};

/// Creates the database file and schema if needed.
pub fn run_init(database_url: &str) -> anyhow::Result<()> {
    let db_path = database_path(database_url)?;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;

    println!("Database ready at {}", db_path.display());
    Ok(())
}

/// Opens an existing database, checking it has been initialized
pub fn init_store(database_url: &str) -> anyhow::Result<SqliteStore> {
    let db_path = database_path(database_url)?;

    if !db_path.exists() {
        anyhow::bail!(
            "Database not found at {}. Run 'jotter admin init' first.",
            db_path.display()
        );
    }

    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;
    Ok(store)
}
