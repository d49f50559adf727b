//! Configuration source adapters.
//!
//! Both implement [`ConfigPort`] and validate before returning:
//!
//! | Adapter          | Format   | Used by                          |
//! |------------------|----------|----------------------------------|
//! | [`JsonConfigFile`] | JSON     | `porter-sim`, bench bring-up     |
//! | [`ConfigBlob`]     | postcard | persisted blobs, fuzzing         |

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::PorterConfig;

// ───────────────────────────────────────────────────────────────
// JSON file
// ───────────────────────────────────────────────────────────────

/// A human-editable JSON config on the local filesystem.
///
/// Missing fields take their defaults.
pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<PorterConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound
            } else {
                warn!("config: cannot read {}: {}", self.path.display(), e);
                ConfigError::IoError
            }
        })?;

        let config: PorterConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("config: {} is not valid JSON: {}", self.path.display(), e);
            ConfigError::Corrupted
        })?;
        config.validate()?;

        info!("config: loaded {}", self.path.display());
        Ok(config)
    }
}

// ───────────────────────────────────────────────────────────────
// postcard blob
// ───────────────────────────────────────────────────────────────

/// A postcard-encoded config held in memory.
pub struct ConfigBlob<'a> {
    bytes: &'a [u8],
}

impl<'a> ConfigBlob<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl ConfigPort for ConfigBlob<'_> {
    fn load(&self) -> Result<PorterConfig, ConfigError> {
        if self.bytes.is_empty() {
            return Err(ConfigError::NotFound);
        }
        let config: PorterConfig =
            postcard::from_bytes(self.bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}

/// Encode a validated config for persistence.
pub fn encode_blob(config: &PorterConfig) -> Result<Vec<u8>, ConfigError> {
    config.validate()?;
    postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)
}
