//! SkyAngel alert service
//!
//! Serves the alert API, the real-time alert channel and the expiry scheduler

#![allow(missing_docs)]

use clap::Parser;
use skyangel_alerts::{Config, server, utils::logging};
use std::path::PathBuf;
use std::process::ExitCode;

/// SkyAngel alert service
#[derive(Parser, Debug)]
#[command(name = "skyangel-server")]
#[command(version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "SKYANGEL_CONFIG", default_value = "config/server.yaml")]
    config: PathBuf,

    /// Validate the configuration, print it and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = match Config::load(Some(&cli.config)).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.check {
        return match config.to_yaml() {
            Ok(yaml) => {
                println!("{}", yaml);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    if let Err(e) = logging::init_tracing(&config.logging) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
