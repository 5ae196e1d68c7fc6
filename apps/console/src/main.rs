use std::{path::PathBuf, process::ExitCode};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{FlowOutcome, InputField, MemoryPage, OrderConsole, Page, Region};
use tracing::info;

mod config;

use config::{load_settings, normalize_api_base};

#[derive(Parser, Debug)]
#[command(name = "order-console", about = "Inspect and publish orders on the order service")]
struct Args {
    /// TOML settings file; defaults to ./order-console.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Order service base URL, e.g. http://localhost:8081.
    #[arg(long)]
    api_base: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one order as an HTML card.
    Order { order_uid: String },
    /// List all orders as an HTML table.
    Orders,
    /// Publish an order payload and print the acknowledgement.
    Publish {
        json: Option<String>,
        #[arg(long, conflicts_with = "json")]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_base) = args.api_base {
        settings.api_base = api_base;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let api_base = normalize_api_base(&settings.api_base)?;
    info!(%api_base, "using order service");

    let console = OrderConsole::new(api_base, MemoryPage::new());
    let (outcome, region) = match args.command {
        Command::Order { order_uid } => (console.show_order(&order_uid).await, Region::Order),
        Command::Orders => (console.get_orders().await, Region::OrderList),
        Command::Publish { json, file } => {
            let payload = publish_payload(json, file).await?;
            console.page().fill_field(InputField::OrderJson, &payload);
            (console.publish_order().await, Region::Publish)
        }
    };

    println!("{}", console.page().content(region).as_str());
    Ok(match outcome {
        FlowOutcome::Rendered => ExitCode::SUCCESS,
        FlowOutcome::ShortCircuited | FlowOutcome::ErrorDisplayed => ExitCode::FAILURE,
    })
}

async fn publish_payload(json: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (json, file) {
        (Some(json), None) => Ok(json),
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read order payload '{}'", path.display())),
        (None, None) => bail!("provide an order JSON argument or --file"),
        (Some(_), Some(_)) => bail!("an order JSON argument and --file are mutually exclusive"),
    }
}
