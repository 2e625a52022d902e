mod config;
mod db;
mod error;
mod import;
mod logging;
mod models;
mod run;
mod services;
mod store;

use anyhow::{Context, Result};

use crate::error::AppError;

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    config.ensure_directories()?;
    let db_path = config.db_path();
    let mut db = db::Database::open(&db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
    tracing::debug!(
        data_dir = %config.data_dir().display(),
        upload_dir = %config.upload_dir().display(),
        "configuration loaded"
    );

    match run::as_cli(&args, &mut db, &config) {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<AppError>() {
            Some(app) if app.is_user_facing() => {
                eprintln!("Error ({}): {}", app.status_code(), app.message());
                std::process::exit(1);
            }
            _ => Err(err),
        },
    }
}
