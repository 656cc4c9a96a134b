//! Keystore File Storage
//!
//! Persists the serialized keystore as pretty-printed JSON. The file only
//! ever holds ciphertexts and the public address; it is still written with
//! owner-only permissions.

use acct_keystore::Keystore;
use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory under the home directory holding the default keystore
const DEFAULT_DIR: &str = ".acct-keystore";

/// Default keystore file name
const DEFAULT_FILE: &str = "keystore.json";

/// Default keystore location: `~/.acct-keystore/keystore.json`
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(DEFAULT_DIR).join(DEFAULT_FILE))
}

/// Save a keystore to a file
pub fn save(keystore: &Keystore, path: &Path) -> Result<()> {
    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&keystore.to_serialized())?;
    write_private(path, json.as_bytes())?;

    debug!(path = %path.display(), "Saved keystore");
    Ok(())
}

/// Load a keystore from a file
pub fn load(path: &Path) -> Result<Keystore> {
    let json = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read keystore file: {}", e))?;

    Keystore::from_serialized(&json).map_err(|e| anyhow!("Failed to parse keystore file: {}", e))
}

/// Check if a keystore file exists
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Write a file readable only by its owner (on unix).
///
/// Contents go to a sibling temp file that is renamed over `path`, so an
/// existing file is replaced whole (mode included) and never left half
/// written.
pub fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp_path = temp_sibling(path)?;

    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&tmp_path)?;
        // mode() only applies on creation; a stale temp file keeps its own
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(contents)?;
        file.sync_all()?;
    }

    #[cfg(not(unix))]
    {
        fs::write(&tmp_path, contents)?;
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        anyhow!("Failed to replace {}: {}", path.display(), e)
    })?;

    Ok(())
}

/// `<dir>/.<name>.tmp` next to `path`
fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("Not a file path: {}", path.display()))?;

    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}
