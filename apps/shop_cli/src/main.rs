use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{HttpTransport, Orchestrator};
use shared::domain::OrderId;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod console;

use config::{load_settings, DEFAULT_CONFIG_FILE};
use console::{render_session, ConsoleNotifier};

#[derive(Parser, Debug)]
#[command(name = "shop", about = "Manage a shop account and its orders")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    account_service_url: Option<String>,
    #[arg(long)]
    order_service_url: Option<String>,
    #[arg(long)]
    user_id: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load balance and orders, then print them.
    Status,
    CreateAccount,
    Deposit {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    CreateOrder {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        description: String,
    },
    /// Print the order list loaded at startup.
    Orders,
    /// Re-fetch a single order.
    Order {
        order_id: String,
    },
    /// Print the balance loaded at startup.
    Balance,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(v) = args.account_service_url {
        settings.account_service_url = v;
    }
    if let Some(v) = args.order_service_url {
        settings.order_service_url = v;
    }
    if let Some(v) = args.user_id {
        settings.user_id = v;
    }
    debug!(?settings, "resolved settings");

    let orchestrator = Orchestrator::from_transport(
        Arc::new(HttpTransport::new()),
        settings.account_service_url()?,
        settings.order_service_url()?,
        Arc::new(ConsoleNotifier),
    );
    orchestrator.set_user_id(settings.user_id).await;
    orchestrator.initialize().await;

    let succeeded = run_command(&orchestrator, args.command).await;

    print!("{}", render_session(&orchestrator.snapshot().await));
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Runs one command against an initialized session. Status, Balance and Orders
/// are fully served by the startup load and issue no further requests.
async fn run_command(orchestrator: &Orchestrator, command: Command) -> bool {
    match command {
        Command::Status | Command::Balance | Command::Orders => true,
        Command::CreateAccount => orchestrator.create_account_for_current_user().await.is_ok(),
        Command::Deposit { amount } => {
            orchestrator
                .update_pending(|pending| pending.deposit_amount = amount)
                .await;
            orchestrator.submit_deposit().await.is_ok()
        }
        Command::CreateOrder {
            amount,
            description,
        } => {
            orchestrator
                .update_pending(|pending| {
                    pending.order_amount = amount;
                    pending.order_description = description;
                })
                .await;
            orchestrator.submit_order().await.is_ok()
        }
        Command::Order { order_id } => orchestrator
            .refresh_order(&OrderId::new(order_id))
            .await
            .is_ok(),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
