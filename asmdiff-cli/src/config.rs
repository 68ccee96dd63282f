//! asmdiff configuration loading from `.asmdiff.toml`.
//!
//! Configuration is optional. Missing sections and keys fall back to the
//! built-in defaults, and command-line flags override anything set here.
//!
//! # Example Configuration
//!
//! ```toml
//! [discovery]
//! extension = "dll"
//! recursive = true
//!
//! [batch]
//! threads = 4
//!
//! [output]
//! format = "table"
//! color = false
//! ```

use serde::Deserialize;
use std::path::Path;

use asmdiff_core::batch::DEFAULT_EXTENSION;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = ".asmdiff.toml";

/// Root configuration structure loaded from `.asmdiff.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct AsmdiffConfig {
    /// Which files count as modules in directory mode.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Batch execution settings.
    #[serde(default)]
    pub batch: BatchConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Module discovery settings for directory mode.
#[derive(Debug, Deserialize, Default)]
pub struct DiscoveryConfig {
    /// Module file extension, with or without the leading dot.
    ///
    /// Default: `json`
    #[serde(default)]
    pub extension: Option<String>,

    /// Descend into subdirectories when pairing modules.
    ///
    /// Default: `false`
    #[serde(default)]
    pub recursive: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BatchConfig {
    /// Worker threads for diffing module pairs. Unset uses one per core.
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Output formatting preferences.
///
/// Distinct from the runtime `OutputConfig`, which is resolved from these
/// settings plus command-line flags.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Valid values: `table`, `json`, `csv`
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Auto-detected from the terminal when unset.
    #[serde(default)]
    pub color: Option<bool>,
}

impl AsmdiffConfig {
    /// Load configuration from `.asmdiff.toml` in the given directory.
    ///
    /// Read and parse errors are logged as warnings and yield defaults.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Configured module extension, or the default.
    pub fn extension(&self) -> &str {
        self.discovery
            .extension
            .as_deref()
            .unwrap_or(DEFAULT_EXTENSION)
    }

    pub fn recursive(&self) -> bool {
        self.discovery.recursive.unwrap_or(false)
    }

    pub fn threads(&self) -> Option<usize> {
        self.batch.threads
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}
