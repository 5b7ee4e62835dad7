mod config;
pub mod state;

pub use config::{ChatbotConfig, Config, MatchingConfig, ProtectionConfig};
pub use state::{load_state, reset_state, save_state, state_path, CAREER_FILE, NETWORKING_FILE};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the config directory, creating it if needed.
///
/// `BALANCEHUB_CONFIG_DIR` wins when set. Otherwise `~/.config/balancehub/`,
/// or `~/.config/balancehub-dev/` when `BALANCEHUB_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("BALANCEHUB_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("BALANCEHUB_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("balancehub-dev")
            } else {
                base_dir.join("balancehub")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DirUnavailable {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
