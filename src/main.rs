//! Fresh Name Service client (v1)
//!
//! Connects a wallet, checks the network, and mints names on the Domains
//! contract: `register(name)` paid by name length, then `setRecord(name, record)`.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────┐     ┌───────────────────┐     ┌─────────────────────┐
//!   │  cli / shell │────▶│ ConnectionManager │────▶│   WalletProvider    │
//!   │  (ui, main)  │     │ (session)         │     │ (LocalKeyWallet)    │
//!   └──────┬───────┘     └─────────▲─────────┘     └──────────▲──────────┘
//!          │                       │ signer                   │ send / receipt
//!          │             ┌─────────┴──────────────┐           │
//!          └────────────▶│ TransactionOrchestrator│───────────┘
//!                        │ (registration)         │
//!                        └────────────────────────┘
//!
//!   chainChanged / config change ──▶ lifecycle::runtime ──▶ rebuild Client
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use fresh_name_service::client::Client;
use fresh_name_service::config::load_or_default;
use fresh_name_service::lifecycle::{approver_for, run_shell, run_until_chain_change, start, Shutdown};
use fresh_name_service::observability::init_logging;
use fresh_name_service::registration::compute_price;
use fresh_name_service::ui::display::full_name;
use fresh_name_service::ui::{Command, ConsoleNotifier, LineSource, Notifier};

/// Exit status when the network changed before a registration finished.
const EXIT_CHAIN_CHANGED: u8 = 2;

#[derive(Parser)]
#[command(name = "fns")]
#[command(about = "Mint names on the Fresh Name Service", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Watched for changes in shell mode.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Approve wallet requests without asking.
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive shell (default)
    Shell,
    /// Show account and network
    Status,
    /// Show the price of a name
    Price { name: String },
    /// Ask the wallet for account access
    Connect,
    /// Move the wallet to the target network
    SwitchNetwork,
    /// Register a name and attach a record to it
    Register {
        name: String,
        #[arg(short, long, default_value = "")]
        record: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability);

    tracing::info!(
        target_chain_id = config.network.chain_id,
        contract = %config.contract.address,
        "fns v0.1.0 starting"
    );

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let input = LineSource::stdin();
    let approver = approver_for(config.wallet.approval, cli.yes, &input);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let shutdown = Shutdown::new();
            shutdown.trigger_on_ctrl_c();
            run_shell(config, cli.config, input, approver, notifier, shutdown.subscribe()).await?;
        }
        Commands::Price { name } => match compute_price(&name) {
            Ok(tier) => println!(
                "{} costs {} {}",
                full_name(&name, &config.contract.tld),
                tier.as_decimal(),
                config.network.native_currency.symbol
            ),
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Status => {
            let (_, client) = start(&config, approver, notifier).await;
            println!("{}", client.header());
        }
        Commands::Connect => {
            let (_, mut client) = start(&config, approver, notifier).await;
            client.execute(Command::Connect).await;
        }
        Commands::SwitchNetwork => {
            let (_, mut client) = start(&config, approver, notifier).await;
            client.execute(Command::SwitchNetwork).await;
        }
        Commands::Register { name, record } => {
            let (_, mut client) = start(&config, approver, notifier).await;
            return Ok(register(&mut client, name, record).await);
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn register(client: &mut Client, name: String, record: String) -> ExitCode {
    if !client.session().is_connected() {
        client.execute(Command::Connect).await;
    }
    client.execute(Command::Name(name)).await;
    client.execute(Command::Record(record)).await;

    let mut chain_rx = client.connection().chain_changes();
    let outcome = run_until_chain_change(client.execute(Command::Mint), &mut chain_rx).await;
    if let Err(chain_id) = outcome {
        tracing::warn!(
            chain_id = chain_id,
            "Network changed while registering; the outcome will not be tracked"
        );
    }

    // A completed registration clears the form.
    let cleared = client.request().name.is_empty();
    ExitCode::from(registration_status(outcome.map(|_| cleared)))
}

fn registration_status(outcome: Result<bool, u64>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => EXIT_CHAIN_CHANGED,
    }
}
