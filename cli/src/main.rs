//! Toll service CLI server
//!
//! ```sh
//! # Run with default config (~/.config/toll-service/config.toml)
//! toll-service
//!
//! # Custom config path
//! toll-service --config /etc/toll-service/config.toml
//!
//! # Override the listen port
//! toll-service --port 9090
//!
//! # Validate config and data files without starting
//! toll-service --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use toll_calculator::config::AppConfig;
use toll_calculator::server::{build_toll_service, init_tracing, ServerHandle};

/// Daily congestion toll calculator served over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "toll-service",
    version,
    about = "Congestion toll fee service",
    long_about = "REST API that computes the daily congestion toll for a vehicle \
                  from its passage timestamps.\n\n\
                  Default config: ~/.config/toll-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "TOLL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the HTTP listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate configuration and data files, print a summary and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(toll_calculator::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging);
    match &load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if cli.check {
        return check(&config_path, &config, load_error.is_none());
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let handle = match ServerHandle::start(config).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start toll service: {}", e);
            return ExitCode::FAILURE;
        }
    };

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");
    handle.wait().await;

    ExitCode::SUCCESS
}

/// `--check`: validate, load the data tables and report what would be served.
fn check(config_path: &std::path::Path, config: &AppConfig, file_loaded: bool) -> ExitCode {
    if let Err(e) = config.validate() {
        println!("❌ {}", e);
        return ExitCode::FAILURE;
    }
    let service = match build_toll_service(config) {
        Ok(service) => service,
        Err(e) => {
            println!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    let schedule = service.calculator().fee_schedule();
    let types = service.vehicle_types();

    println!("✅ Configuration is valid");
    println!(
        "   Config file   : {}{}",
        config_path.display(),
        if file_loaded { "" } else { " (not loaded, defaults used)" }
    );
    println!("   HTTP address  : {}:{}", config.server.host, config.server.port);
    println!(
        "   Fee schedule  : {} ({} ranges)",
        config.toll.fee_schedule_path.display(),
        schedule.len()
    );
    if types.is_available() {
        println!(
            "   Vehicle types : {} ({})",
            config.toll.vehicle_types_path.display(),
            types.names().join(", ")
        );
    } else {
        println!(
            "   Vehicle types : {} (unavailable)",
            config.toll.vehicle_types_path.display()
        );
    }
    println!(
        "   Daily cap     : {} {}",
        service.calculator().daily_cap(),
        service.currency()
    );
    println!("   Time zone     : {}", service.zone());
    println!(
        "   Calendar      : {} (exempt months {:?}, {} extra holidays)",
        config.calendar.jurisdiction,
        config.calendar.exempt_months,
        config.calendar.extra_holidays.len()
    );
    println!("   Log level     : {}", config.logging.level);

    if schedule.is_empty() || !types.is_available() {
        println!("⚠️  Data tables incomplete; every request will be charged 0 or rejected");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
