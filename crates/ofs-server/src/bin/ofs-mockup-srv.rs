//! The OFS mockup server binary.
//!
//! Starts the mock fiscal device with the availability, PIN, and bearer
//! key taken from CLI flags or the `OFS_MOCKUP_*` environment variables.

use std::net::Ipv4Addr;

use clap::Parser;

use tracing::info;

use tracing_subscriber::EnvFilter;

use ofs_server::config::{MockHookPolicy, ServerConfig};
use ofs_server::error::Result;
use ofs_server::server::Server;

#[derive(Parser)]
#[command(name = "ofs-mockup-srv")]
#[command(about = "Mock server mimicking the HTTP surface of an OFS fiscal device")]
#[command(version)]
struct Cli {
    /// Host to bind the server.
    #[arg(long, default_value_t = Ipv4Addr::UNSPECIFIED, env = "OFS_MOCKUP_HOST")]
    host: Ipv4Addr,

    /// Port to bind the server.
    #[arg(long, default_value_t = 8200, env = "OFS_MOCKUP_PORT")]
    port: u16,

    /// Start with the service available (default: unavailable).
    ///
    /// The falsey parser keeps `OFS_MOCKUP_AVAILABLE=false` from
    /// enabling the flag by mere presence.
    #[arg(
        long,
        env = "OFS_MOCKUP_AVAILABLE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    available: bool,

    /// PIN for device authentication.
    #[arg(long, default_value = "4321", env = "OFS_MOCKUP_PIN")]
    pin: String,

    /// Custom API key for authentication.
    #[arg(long, env = "OFS_MOCKUP_API_KEY")]
    api_key: Option<String>,

    /// Enable request/response debug logging.
    #[arg(
        long,
        env = "OFS_MOCKUP_DEBUG",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    debug: bool,

    /// Simulate an invoice error, i.e. "Out of paper:-10".
    #[arg(long, value_name = "MESSAGE:CODE", env = "OFS_MOCKUP_INVOICE_ERROR")]
    return_invoice_error: Option<String>,

    /// Require the bearer key on the /mock test hooks.
    #[arg(
        long,
        env = "OFS_MOCKUP_SECURE_MOCK_HOOKS",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    secure_mock_hooks: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = ServerConfig::new()
        .host(cli.host)
        .port(cli.port)
        .available(cli.available)
        .pin(cli.pin);

    if let Some(api_key) = cli.api_key {
        config = config.api_key(api_key);
    }

    if let Some(fault) = cli.return_invoice_error {
        config = config.invoice_fault(fault.parse()?);
    }

    if cli.secure_mock_hooks {
        config = config.hook_policy(MockHookPolicy::Bearer);
    }

    info!("Starting OFS mockup server");
    info!(
        "Status: {}",
        if config.is_available() {
            "Available"
        } else {
            "Unavailable"
        }
    );
    if cli.debug {
        info!("PIN: {}", config.device_pin());
    }

    Server::new(config)
        .with_graceful_shutdown(shutdown_signal())
        .run()
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Server stopped");
    }
}
