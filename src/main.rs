mod budget;
mod calendar;
mod config;
mod dashboard;
mod db;
mod error;
mod filter;
mod import;
mod ledger;
mod logging;
mod models;
mod recurring;
mod run;
mod store;
mod ui;

use anyhow::Result;

use crate::config::Config;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load()?;
    let db_path = config.database_path()?;

    if args.len() > 1 {
        logging::init_stderr(&config.log_level);
        let mut db = db::Database::open(&db_path)?;
        return run::as_cli(&args, &mut db, &config);
    }

    if let Err(e) = logging::init_file(&config.log_level, &config.log_path()?) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    let mut db = db::Database::open(&db_path)?;
    run::as_tui(&mut db, &config)
}
