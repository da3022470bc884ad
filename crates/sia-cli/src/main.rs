//! `sia-receiver` binary.
//!
//! Loads a TOML configuration, starts the receiver and logs every event until
//! interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use sia_receiver::{Event, ReceiverConfig, ReceiverEvent, SiaServer};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// SIA DC-09 alarm receiver.
#[derive(Debug, Parser)]
#[command(name = "sia-receiver", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "SIA_CONFIG")]
    config: PathBuf,

    /// Override `server.bind_addr`
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Log filter, used when `RUST_LOG` is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print events to stdout as JSON lines
    #[arg(long)]
    json: bool,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut config = ReceiverConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }

    if cli.check {
        info!(
            accounts = config.accounts.len(),
            "Configuration {} is valid",
            cli.config.display()
        );
        return Ok(());
    }

    let mut server = SiaServer::bind(config)
        .await
        .context("starting receiver")?;
    let mut events = server
        .take_events()
        .context("event channel already taken")?;
    server.start()?;

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("waiting for Ctrl-C")?;
                info!("Interrupted");
                break;
            }
            event = events.recv() => match event {
                Some(event) => report(&event, cli.json)?,
                None => break,
            },
        }
    }

    server.stop().await;
    Ok(())
}

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

fn report(event: &ReceiverEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }

    match event {
        ReceiverEvent::Event(event) => log_event(event),
        ReceiverEvent::Availability(change) => match (&change.device, change.available) {
            (None, true) => info!(account = %change.account, "Account available"),
            (None, false) => warn!(account = %change.account, "Account unavailable"),
            (Some(device), available) => debug!(
                account = %change.account,
                device = %device,
                available,
                "Device availability"
            ),
        },
    }
    Ok(())
}

fn log_event(event: &Event) {
    info!(
        account = %event.account,
        zone = event.zone,
        code = event.code.as_deref().unwrap_or("-"),
        kind = event.kind().unwrap_or("unknown"),
        message = %event.message,
        timestamp = %event.timestamp,
        encrypted = event.encrypted,
        "SIA event"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "sia-receiver",
            "--config",
            "receiver.toml",
            "--bind",
            "127.0.0.1:9000",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("receiver.toml"));
        assert_eq!(cli.bind, Some("127.0.0.1:9000".parse().unwrap()));
        assert!(cli.json);
        assert!(!cli.check);
        assert_eq!(cli.log_level, "info");
    }
}
