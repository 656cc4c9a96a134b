//! Address display command

use anyhow::Result;
use std::path::Path;

use super::load_existing;

/// Run the address command
pub fn run(keystore_path: &Path, checksum: bool) -> Result<()> {
    // The address is stored in the clear; no password needed
    let keystore = load_existing(keystore_path)?;

    let address = if checksum {
        keystore.checksum_address()?
    } else {
        keystore.address().to_string()
    };

    println!("{}", address);
    Ok(())
}
