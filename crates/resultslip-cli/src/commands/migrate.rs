//! Migrate command
//!
//! Usage: resultslip migrate

use resultslip_core::{AppConfig, Result};
use resultslip_store::{db, migrations, ResultStore};

/// Execute migrate command
pub fn execute(config: &AppConfig) -> Result<()> {
    // Opening the store applies anything pending.
    ResultStore::open(&config.database)?;

    let conn = db::connect(&config.database)?;
    let applied = migrations::applied_migrations(&conn)?;

    println!("Database ready at {}", config.database.path.display());
    for id in applied {
        println!("  applied {}", id);
    }
    Ok(())
}
