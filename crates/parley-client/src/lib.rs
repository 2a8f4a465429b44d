pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod layout;
pub mod navigator;
pub mod remote;
pub mod resolver;
pub mod room_types;
pub mod routes;
pub mod session;
pub mod single_flight;
pub mod state;

#[cfg(test)]
mod testing;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::Client;
use crate::config::ClientConfig;

#[derive(Debug, Parser)]
#[command(name = "parley", about = "Parley chat client", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Navigate to a client URL, e.g. `/channel/general?msg=abc`.
    Open { url: String },
    /// Open a room by its id.
    Room { room_id: String },
    /// List the cached subscriptions.
    Subscriptions,
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("parley_client=debug,parley_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!("Starting Parley client v{}", env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::from_env();
    tracing::info!(?config, "Loaded configuration");

    let client = Client::from_config(&config)?;

    // The local store is the subscription source, so it is ready as soon
    // as it is open.
    client.mark_subscriptions_ready()?;

    match cli.command {
        Command::Open { url } => print_json(&commands::navigation::open(&client, &url)?),
        Command::Room { room_id } => {
            print_json(&commands::navigation::open_room(&client, &room_id).await?)
        }
        Command::Subscriptions => {
            print_json(&commands::subscriptions::list_subscriptions(&client)?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{json}");
    Ok(())
}
