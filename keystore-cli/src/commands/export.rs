//! Keystore export/backup command

use anyhow::Result;
use std::path::Path;
use zeroize::Zeroizing;

use acct_keystore::{mnemonic, Keystore};

use crate::storage;

use super::{load_existing, print_success, print_warning, print_words, prompt_confirm, prompt_password};

/// Run the export command
pub fn run(keystore_path: &Path, private_key: bool, output: Option<String>) -> Result<()> {
    let keystore = load_existing(keystore_path)?;
    let password = prompt_password("Enter keystore password: ")?;

    // Decrypt up front so a wrong password fails before any prompt
    let secret = if private_key {
        keystore.get_private_key(&password)?
    } else {
        keystore.get_mnemonic(&password)?
    };
    let label = if private_key {
        "private key"
    } else {
        "recovery phrase"
    };

    if let Some(output_path) = output {
        let output_path = Path::new(&output_path);

        if output_path.exists() && !prompt_confirm("Output file exists. Overwrite?")? {
            println!("Aborted.");
            return Ok(());
        }

        let backup = backup_contents(&keystore, label, &secret)?;
        storage::write_private(output_path, backup.as_bytes())?;

        println!();
        print_success(&format!("Backup saved to: {}", output_path.display()));
        print_warning("Keep this file safe and secret!");
    } else {
        println!();
        print_warning(&format!("IMPORTANT: Keep your {} secret!", label));
        print_warning("Anyone with it can access your account.");
        println!();

        if !prompt_confirm(&format!("Show {} on screen?", label))? {
            println!("Aborted.");
            return Ok(());
        }

        println!();
        if private_key {
            println!("Your private key:");
            println!();
            println!("  {}", secret.as_str());
        } else {
            println!(
                "Your recovery phrase ({} words):",
                mnemonic::word_count(&secret)
            );
            println!();
            print_words(&secret);
        }
        println!();
        println!("Address: {}", keystore.checksum_address()?);
    }

    Ok(())
}

/// Plain-text backup file body
fn backup_contents(keystore: &Keystore, label: &str, secret: &str) -> Result<Zeroizing<String>> {
    Ok(Zeroizing::new(format!(
        "# Account Keystore Backup\n\
         # Created: {}\n\
         # Address: {}\n\
         # Contents: {}\n\
         #\n\
         # KEEP THIS FILE SAFE AND SECRET!\n\
         # Anyone with it can access your account.\n\
         #\n\
         \n\
         {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        keystore.checksum_address()?,
        label,
        secret
    )))
}
