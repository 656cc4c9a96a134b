//! Account Keystore CLI
//!
//! Create and use a single password-protected account keystore.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod storage;

#[derive(Parser)]
#[command(name = "acct-keystore")]
#[command(about = "Single-account keystore - derive, encrypt and sign")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Custom keystore file path
    #[arg(short, long, global = true)]
    keystore: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new keystore
    Init {
        /// Recover from existing mnemonic
        #[arg(long)]
        recover: bool,

        /// Extra caller entropy mixed into key generation
        #[arg(long, conflicts_with = "recover")]
        entropy: Option<String>,
    },

    /// Show the account address
    Address {
        /// Show the EIP-55 mixed-case form
        #[arg(long)]
        checksum: bool,
    },

    /// Export the recovery phrase or private key
    Export {
        /// Export the private key instead of the recovery phrase
        #[arg(long)]
        private_key: bool,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Sign a 32-byte message hash
    Sign {
        /// Hex-encoded message hash, with or without 0x prefix
        message_hash: String,
    },

    /// Change the keystore password
    Passwd,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Determine keystore path
    let keystore_path = match cli.keystore {
        Some(path) => PathBuf::from(path),
        None => storage::default_path()?,
    };

    match cli.command {
        Commands::Init { recover, entropy } => {
            commands::init::run(&keystore_path, recover, entropy)
        }
        Commands::Address { checksum } => commands::address::run(&keystore_path, checksum),
        Commands::Export {
            private_key,
            output,
        } => commands::export::run(&keystore_path, private_key, output),
        Commands::Sign { message_hash } => commands::sign::run(&keystore_path, &message_hash),
        Commands::Passwd => commands::passwd::run(&keystore_path),
    }
}
