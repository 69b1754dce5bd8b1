// src/main.rs
//
// filmorate command-line entry point:
// 1. logging
// 2. configuration
// 3. store + services
// 4. one command, JSON on stdout

use std::sync::Arc;

use anyhow::Context;
use filmorate::application::AppState;
use filmorate::cli::execute;
use filmorate::config::Config;
use filmorate::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();

    let config = Config::from_args();

    let state = if config.memory {
        log::info!("Using in-memory store");
        AppState::in_memory()
    } else {
        let db_path = config.database_path()?;
        log::info!("Database: {:?}", db_path);

        let pool = create_connection_pool(&db_path)
            .with_context(|| format!("opening database {:?}", db_path))?;
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
            verify_database_integrity(&conn)?;
            log::debug!("Database stats: {:?}", get_database_stats(&conn)?);
        }
        AppState::sqlite(Arc::new(pool))
    };

    let output = execute(&state, config.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
