//! Dashboard state kept as JSON files next to the config.
//!
//! A missing file means the user has not touched that dashboard yet, so the
//! caller's starter state is used instead.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::data_dir;
use crate::error::Result;

pub const CAREER_FILE: &str = "career.json";
pub const NETWORKING_FILE: &str = "networking.json";

/// Path of a state file in the config directory.
pub fn state_path(file: &str) -> Result<PathBuf> {
    Ok(data_dir()?.join(file))
}

/// Read `path`, or build the starter state when it does not exist.
pub fn load_state<T: DeserializeOwned>(path: &Path, starter: impl FnOnce() -> T) -> Result<T> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no saved state, using starter data");
            Ok(starter())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn save_state<T: Serialize>(path: &Path, state: &T) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(state)?)?;
    tracing::debug!(path = %path.display(), "state saved");
    Ok(())
}

/// Remove a state file so the next load starts over.
pub fn reset_state(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::CareerTracker;

    #[test]
    fn missing_file_uses_starter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CAREER_FILE);
        let tracker = load_state(&path, CareerTracker::sample).unwrap();
        assert_eq!(tracker, CareerTracker::sample());
        assert!(!path.exists());
    }

    #[test]
    fn saved_state_survives_reload_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CAREER_FILE);
        let mut tracker = CareerTracker::sample();
        tracker.toggle_goal("goal-1").unwrap();
        save_state(&path, &tracker).unwrap();

        let loaded: CareerTracker = load_state(&path, CareerTracker::new).unwrap();
        assert_eq!(loaded.progress().completed_goals, 2);

        reset_state(&path).unwrap();
        reset_state(&path).unwrap();
        assert_eq!(load_state(&path, CareerTracker::sample).unwrap(), CareerTracker::sample());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(NETWORKING_FILE);
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_state(&path, crate::networking::NetworkingHub::sample),
            Err(crate::CoreError::Json(_))
        ));
    }
}
