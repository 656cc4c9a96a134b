//! Password rotation command

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::storage;

use super::{load_existing, print_success, prompt_new_password, prompt_password};

/// Run the passwd command
pub fn run(keystore_path: &Path) -> Result<()> {
    let keystore = load_existing(keystore_path)?;

    let old_password = prompt_password("Enter current password: ")?;
    // Fail before asking for a new password if the old one is wrong
    keystore.get_private_key(&old_password)?;

    println!();
    let new_password = prompt_new_password()?;

    let rotated = keystore.with_new_password(&old_password, &new_password)?;
    storage::save(&rotated, keystore_path)?;
    info!(address = %rotated.address(), "Keystore password changed");

    println!();
    print_success("Password changed.");
    Ok(())
}
