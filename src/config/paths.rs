//! Path resolution for quicktask configuration files.
//!
//! quicktask keeps its settings in `~/.quicktask/`:
//! - `config.yaml` - Main configuration file

use std::path::PathBuf;

use crate::error::QuicktaskError;

/// Paths to quicktask configuration files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.quicktask/`
    pub root: PathBuf,
    /// Config file: `~/.quicktask/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, QuicktaskError> {
        let home = std::env::var("HOME").map_err(|_| {
            QuicktaskError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".quicktask")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            root,
        }
    }
}
