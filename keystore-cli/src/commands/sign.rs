//! Message hash signing command

use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::{load_existing, prompt_password};

/// Run the sign command
pub fn run(keystore_path: &Path, message_hash: &str) -> Result<()> {
    let keystore = load_existing(keystore_path)?;
    let password = prompt_password("Enter keystore password: ")?;

    let signature = keystore.sign_message_hash(message_hash, &password)?;
    info!(address = %keystore.address(), "Signed message hash");

    println!("{}", signature.encode());
    Ok(())
}
