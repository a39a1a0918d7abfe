use std::process::ExitCode;
use std::sync::Arc;

use statik::config::{Config, Settings};
use statik::server;
use tracing::Level;

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cfg = match Config::load(std::env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(e) => {
            init_logging(Settings::default().log_level());
            tracing::error!("Unable to load configuration, aborting: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(cfg.settings.log_level());
    cfg.settings.log_summary();

    tokio::select! {
        res = server::listener::run(Arc::new(cfg)) => {
            if let Err(e) = res {
                tracing::error!("Unable to start server, aborting: {:#}", e);
                return ExitCode::FAILURE;
            }
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    ExitCode::SUCCESS
}
