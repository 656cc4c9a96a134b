//! CLI Commands
//!
//! Implementation of all keystore CLI commands.

pub mod address;
pub mod export;
pub mod init;
pub mod passwd;
pub mod sign;

use acct_keystore::Keystore;
use anyhow::{anyhow, Result};
use std::io::{self, Write};
use std::path::Path;
use zeroize::Zeroizing;

use crate::storage;

/// Minimum accepted length for a new password
pub const MIN_PASSWORD_LEN: usize = 8;

/// Prompt for password input (hidden)
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let password = rpassword::read_password()?;
    Ok(Zeroizing::new(password))
}

/// Prompt for a new password with confirmation
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    loop {
        let password = prompt_password("Enter keystore password: ")?;

        if let Err(e) = check_new_password(&password) {
            print_error(&e.to_string());
            continue;
        }

        let confirm = prompt_password("Confirm password: ")?;

        if password.as_str() != confirm.as_str() {
            print_error("Passwords do not match");
            continue;
        }

        return Ok(password);
    }
}

/// Reject passwords too short to be worth stretching
pub fn check_new_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(anyhow!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

/// Prompt for confirmation
pub fn prompt_confirm(message: &str) -> Result<bool> {
    print!("{} [y/N]: ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y") || input.trim().eq_ignore_ascii_case("yes"))
}

/// Read one line from stdin, without the trailing newline
pub fn prompt_line(prompt: &str) -> Result<Zeroizing<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = Zeroizing::new(String::new());
    io::stdin().read_line(&mut input)?;
    Ok(Zeroizing::new(input.trim().to_string()))
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("\x1b[31mError:\x1b[0m {}", message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("\x1b[32m{}\x1b[0m", message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("\x1b[33mWarning:\x1b[0m {}", message);
}

/// Load the keystore at `path`, failing with a hint if there is none.
pub fn load_existing(path: &Path) -> Result<Keystore> {
    if !storage::exists(path) {
        return Err(anyhow!(
            "No keystore found at {}. Run 'acct-keystore init' first.",
            path.display()
        ));
    }
    storage::load(path)
}

/// Print mnemonic words in numbered columns
pub fn print_words(phrase: &str) {
    for (i, word) in phrase.split_whitespace().enumerate() {
        print!("{:>2}. {:<12}", i + 1, word);
        if (i + 1) % 4 == 0 {
            println!();
        }
    }
    println!();
}
