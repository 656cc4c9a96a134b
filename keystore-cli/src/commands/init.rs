//! Keystore initialization command

use acct_keystore::{mnemonic, Keystore};
use anyhow::{anyhow, Result};
use std::path::Path;
use tracing::info;
use zeroize::Zeroizing;

use crate::storage;

use super::{
    print_error, print_success, print_warning, print_words, prompt_confirm, prompt_line,
    prompt_new_password,
};

/// Run the init command
pub fn run(keystore_path: &Path, recover: bool, entropy: Option<String>) -> Result<()> {
    // Check if keystore already exists
    if storage::exists(keystore_path) {
        print_error("Keystore already exists at this location");
        println!("Path: {}", keystore_path.display());

        if !prompt_confirm("Overwrite existing keystore?")? {
            println!("Aborted.");
            return Ok(());
        }

        print_warning("Existing keystore will be overwritten!");
    }

    let keystore = if recover {
        let phrase = prompt_mnemonic()?;
        println!();
        let password = prompt_new_password()?;
        Keystore::from_mnemonic(&phrase, &password)?
    } else {
        let entropy = match entropy {
            Some(entropy) => Zeroizing::new(entropy),
            None => prompt_line("Type some random characters for extra entropy: ")?,
        };
        println!();
        let password = prompt_new_password()?;
        let keystore = Keystore::initialize(&entropy, &password)?;
        show_new_mnemonic(&keystore, &password)?;
        keystore
    };

    storage::save(&keystore, keystore_path)?;
    info!(address = %keystore.address(), "Keystore created");

    // Show success
    println!();
    print_success("Keystore created successfully!");
    println!();
    println!("Your address:");
    println!("  {}", keystore.checksum_address()?);
    println!();
    println!("Keystore saved to: {}", keystore_path.display());

    if !recover {
        println!();
        print_warning("IMPORTANT: Write down your recovery phrase and store it safely!");
        print_warning("Anyone with this phrase can access your account.");
        print_warning("If you lose it, you cannot recover your account.");
    }

    Ok(())
}

/// Display the freshly generated recovery phrase
fn show_new_mnemonic(keystore: &Keystore, password: &str) -> Result<()> {
    let phrase = keystore.get_mnemonic(password)?;

    println!();
    println!(
        "Your recovery phrase ({} words):",
        mnemonic::word_count(&phrase)
    );
    println!();
    print_words(&phrase);

    println!();
    if !prompt_confirm("Have you written down your recovery phrase?")? {
        return Err(anyhow!(
            "Please write down your recovery phrase before continuing"
        ));
    }

    Ok(())
}

/// Prompt user to enter their recovery phrase
fn prompt_mnemonic() -> Result<Zeroizing<String>> {
    println!();
    println!("Enter your recovery phrase:");
    println!("(All words on one line, separated by spaces)");
    println!();

    let input = prompt_line("> ")?;
    let phrase = Zeroizing::new(
        input
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" "),
    );

    if !mnemonic::validate(&phrase) {
        return Err(anyhow!(
            "Invalid recovery phrase ({} words)",
            mnemonic::word_count(&phrase)
        ));
    }

    Ok(phrase)
}
