use clap::Parser;
use contract_desk::cli::{execute_command, get_log_level, App, Cli};
use contract_desk::config::AppConfig;
use tracing::{debug, error, trace, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match AppConfig::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let config = loaded.config;

    let log_level = match (cli.verbose, config.log_level.as_deref()) {
        (0, Some(level)) => level.to_string(),
        (verbose, _) => get_log_level(verbose).to_string(),
    };
    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(cli.verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(cli.verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("contract-desk started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
    match &loaded.source {
        Some(path) => debug!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file, using defaults"),
    }
    for warning in &loaded.warnings {
        warn!("{warning}");
    }

    let result = match App::from_config(&config, cli.ephemeral) {
        Ok(app) => execute_command(&app, cli.command).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
