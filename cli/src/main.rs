//! cep wallet CLI: drives the wallet session from the terminal.

mod config;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use cep_qr::{generate_qr_payment_data, parse_qr_payment_data};
use cep_store::{FileStore, KeyValueStore};
use cep_types::{Amount, IntentKind};
use cep_utils::{format_amount, format_compact_currency};
use cep_wallet_core::WalletSession;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "cep", about = "cep wallet: balance, transfers, and QR payments")]
struct Cli {
    /// Directory holding the wallet data slot.
    #[arg(long, env = "CEP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to a TOML configuration file. CLI flags and env vars
    /// override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Falls back to the config file value, then "info".
    #[arg(long, env = "CEP_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the current balance.
    Balance {
        /// Abbreviate large balances ("1,5M" style).
        #[arg(long)]
        compact: bool,
    },
    /// List recorded transfers, oldest first.
    History,
    /// Transfer money to a phone number or contact handle.
    Send {
        /// Recipient phone number or handle.
        #[arg(long)]
        to: String,
        /// Amount in lira, e.g. "150" or "49.99".
        #[arg(long)]
        amount: String,
    },
    /// Clear the transaction log and restore the baseline balance.
    Reset,
    /// Parse or generate QR payment payloads.
    Qr {
        #[command(subcommand)]
        action: QrAction,
    },
}

#[derive(Subcommand)]
enum QrAction {
    /// Parse raw scanned text into a payment intent.
    Parse { raw: String },
    /// Generate the URI payload for a payment request.
    Generate {
        /// Recipient phone number.
        #[arg(long)]
        to: String,
        /// Requested amount in lira.
        #[arg(long)]
        amount: Option<String>,
        /// Free-text description.
        #[arg(long)]
        desc: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config is loaded before tracing comes up, since it can carry the log
    // level; its diagnostics are deferred until a subscriber exists.
    let mut config_warning = None;
    let file_config = if let Some(ref path) = cli.config {
        match CliConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                config_warning = Some(format!(
                    "Failed to load config file {}: {e}, using defaults",
                    path.display()
                ));
                CliConfig::default()
            }
        }
    } else {
        CliConfig::default()
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| file_config.log_level.clone());
    cep_utils::init_tracing_with(&log_level);

    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    } else if let Some(ref path) = cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let data_dir = cli.data_dir.unwrap_or(file_config.data_dir);

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&data_dir));
    let mut session = WalletSession::load(store).await;

    match cli.command {
        Command::Balance { compact } => {
            let balance = session.balance();
            if compact {
                println!("{}", format_compact_currency(balance.to_f64()));
            } else {
                println!("{}", format_amount(balance));
            }
        }

        Command::History => {
            if session.transactions().is_empty() {
                println!("No transactions yet.");
            }
            for tx in session.transactions() {
                println!(
                    "{}  {:<14}  {}",
                    tx.date.format("%Y-%m-%d %H:%M"),
                    tx.receiver,
                    format_amount(tx.amount)
                );
            }
        }

        Command::Send { to, amount } => {
            let parsed = Amount::parse(&amount)
                .with_context(|| format!("amount {amount:?} is not a number"))?;
            if !parsed.is_positive() {
                bail!("amount must be positive");
            }
            // Overdraft is blocked here, before the ledger transition;
            // the ledger itself does not own this business rule.
            if parsed > session.balance() {
                bail!(
                    "insufficient balance: have {}, need {}",
                    format_amount(session.balance()),
                    format_amount(parsed)
                );
            }

            // The local variant plus an awaited persist: one writer, and
            // the command only reports success once the write landed.
            let tx = session.add_transaction_local(&to, &amount)?;
            session.persist().await?;
            println!("Sent {} to {}", format_amount(tx.amount), tx.receiver);
            println!("New balance: {}", format_amount(session.balance()));
        }

        Command::Reset => {
            session.reset_local();
            session.persist().await?;
            println!("Wallet reset. Balance: {}", format_amount(session.balance()));
        }

        Command::Qr { action } => match action {
            QrAction::Parse { raw } => match parse_qr_payment_data(&raw) {
                Some(intent) if intent.is_valid() => {
                    let kind = match intent.kind {
                        IntentKind::Payment => "payment",
                        IntentKind::Contact => "contact",
                    };
                    println!("kind:      {kind}");
                    println!("recipient: {}", intent.recipient);
                    if let Some(amount) = intent.amount {
                        println!("amount:    {}", format_amount(amount));
                    }
                    if let Some(desc) = intent.description {
                        println!("desc:      {desc}");
                    }
                }
                Some(_) => bail!("payload recognized but no recipient could be extracted"),
                None => bail!("not a recognized payment code"),
            },

            QrAction::Generate { to, amount, desc } => {
                let amount = match amount {
                    Some(text) => Some(
                        Amount::parse(&text)
                            .with_context(|| format!("amount {text:?} is not a number"))?,
                    ),
                    None => None,
                };
                println!("{}", generate_qr_payment_data(&to, amount, desc.as_deref()));
            }
        },
    }

    Ok(())
}
