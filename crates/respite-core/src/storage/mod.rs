mod config;
mod store;

pub use config::Config;
pub use store::{Store, DEFAULT_CLIENT_ID};

use std::io;
use std::path::PathBuf;

/// Returns `~/.config/respite[-dev]/`, creating it if needed.
///
/// Set RESPITE_ENV=dev to use a development data directory.
pub fn data_dir() -> io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RESPITE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("respite-dev")
    } else {
        base_dir.join("respite")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
