use anyhow::Context;
use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use tokio::net::TcpListener;

mod api;
mod catalog;
mod db;
mod seed;
mod synth;
mod utils;

use crate::db::Storage;

const DEFAULT_DATABASE_URL: &str = "sqlite://fleetreport.db?mode=rwc";
const DEFAULT_LISTEN: &str = "0.0.0.0:8000";
const DEFAULT_CUSTOMERS: usize = 10;
const DEFAULT_DEVICES_PER_CUSTOMER: usize = 15;

#[derive(Clone, Debug, Parser, Serialize, Deserialize)]
#[command(version, about = "Device inventory reporting backend")]
struct Config {
    /// Database connection string
    #[arg(short, long, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    database_url: Option<String>,

    /// Address for the HTTP server
    #[arg(short, long, value_name = "ADDR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    listen: Option<String>,

    /// Seed the database with a synthetic fleet, print a report and exit
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    seed: bool,

    /// Number of customers to seed with --seed
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    customers: Option<usize>,

    /// Devices created for each customer with --seed
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    devices_per_customer: Option<usize>,

    /// Increase logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    #[serde(default, skip_serializing_if = "is_zero")]
    verbose: u8,
}

fn is_zero(value: &u8) -> bool {
    *value == 0
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Start with toml configuration file.
    let config: Config = Figment::from(Toml::file("fleetreport.toml"))
        // Override with anything set in environment variables.
        .merge(Env::prefixed("FLEETREPORT_"))
        .merge(Env::raw().only(&["DATABASE_URL"]))
        // Override with anything set via flags.
        .merge(Serialized::defaults(Config::parse()))
        .extract()
        .context("invalid configuration")?;

    TermLogger::init(
        utils::log_level(config.verbose),
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let database_url = config
        .database_url
        .clone()
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
    let storage = Storage::connect(&database_url)
        .await
        .with_context(|| format!("failed to connect to {}", database_url))?;
    storage
        .ensure_schema()
        .await
        .context("failed to create database schema")?;

    if config.seed {
        let summary = seed::seed_database(
            &storage,
            config.customers.unwrap_or(DEFAULT_CUSTOMERS),
            config
                .devices_per_customer
                .unwrap_or(DEFAULT_DEVICES_PER_CUSTOMER),
        )
        .await?;
        let per_customer = storage.devices_per_customer().await?;
        utils::display_seed_summary(&summary, &per_customer);
        storage.close().await?;
        return Ok(());
    }

    log::info!(
        "inventory holds {} devices",
        storage.count_all().await.context("failed to count devices")?
    );

    let listen = config.listen.as_deref().unwrap_or(DEFAULT_LISTEN);
    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to listen on {}", listen))?;
    log::info!("listening on {}", listen);

    axum::serve(listener, api::router(storage.clone()))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("failed to wait for Ctrl+C: {}", e);
            }
            log::info!("shutting down");
        })
        .await?;

    storage.close().await?;
    Ok(())
}
