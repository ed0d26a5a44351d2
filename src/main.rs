use std::{io, process};

use tracing_subscriber::EnvFilter;

use biosync::cli;
use biosync::config::Config;
use biosync::plan::TemplateRegistry;
use biosync::storage::{PlanRepository, SqliteStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let path = config.resolve_store_path().unwrap_or_else(|| {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    });

    let store = match SqliteStore::open(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open store at {}: {e}", path.display());
            process::exit(1);
        }
    };

    let registry = match TemplateRegistry::builtin() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to load templates: {e}");
            process::exit(1);
        }
    };

    let repo = PlanRepository::new(store);
    if let Err(e) = cli::run(&config, &registry, &repo) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
