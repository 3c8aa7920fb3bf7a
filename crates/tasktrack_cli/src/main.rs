//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tasktrack_core` linkage with deterministic output.
//! - With a database path argument, load persisted state and print the
//!   export document.
//! - When `TASKTRACK_LOG_DIR` is set, write rolling logs there.

use std::process::ExitCode;
use tasktrack_core::db::open_db;
use tasktrack_core::{PersistenceGateway, SqliteBlobStore, SystemClock, TaskStore, UuidIdGenerator};

const LOG_DIR_ENV: &str = "TASKTRACK_LOG_DIR";

fn main() -> ExitCode {
    if let Err(err) = init_cli_logging(std::env::var(LOG_DIR_ENV).ok().as_deref()) {
        eprintln!("logging disabled: {err}");
    }
    println!("tasktrack_core ping={}", tasktrack_core::ping());
    println!("tasktrack_core version={}", tasktrack_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match export_from(&db_path) {
        Ok(document) => {
            println!("{document}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("event=cli_export module=cli status=error error={err}");
            eprintln!("export failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn export_from(db_path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let gateway = PersistenceGateway::new(SqliteBlobStore::try_new(&conn)?);
    let store = TaskStore::init(gateway, UuidIdGenerator, SystemClock)?;
    Ok(store.export_data()?)
}

/// Starts file logging when a directory is configured; `Ok(false)` when not.
fn init_cli_logging(log_dir: Option<&str>) -> Result<bool, String> {
    let Some(log_dir) = log_dir else {
        return Ok(false);
    };
    tasktrack_core::init_logging(tasktrack_core::default_log_level(), log_dir)?;
    log::info!("event=cli_start module=cli status=ok log_dir={log_dir}");
    Ok(true)
}
