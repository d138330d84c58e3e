use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TOLERANCE: f64 = 0.15;
pub const DEFAULT_FIRST_NUMBER: u32 = 1;
pub const DEFAULT_FILE_TYPES: &[&str] = &["jpg", "png", "gif", "bmp", "webp", "tif"];

/// How a spread's slot count is derived from `single_max_ratio / ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotRounding {
    #[default]
    Round,
    Ceil,
}

impl SlotRounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            SlotRounding::Round => value.round(),
            SlotRounding::Ceil => value.ceil(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("tolerance must be a positive finite number, got {0}")]
    InvalidTolerance(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenumberConfig {
    /// Image types (by sniffed content) that count as pages.
    pub file_types: Vec<String>,
    /// Half-width of the ratio band used by every classification check.
    pub tolerance: f64,
    pub first_number: u32,
    pub slot_rounding: SlotRounding,
    /// Delete non-image files instead of warning about them.
    pub clean: bool,
    pub zip: bool,
    /// Skip renumbering and only build the archive.
    pub archive_only: bool,
    pub dry_run: bool,
}

impl Default for RenumberConfig {
    fn default() -> Self {
        Self {
            file_types: DEFAULT_FILE_TYPES.iter().map(|s| s.to_string()).collect(),
            tolerance: DEFAULT_TOLERANCE,
            first_number: DEFAULT_FIRST_NUMBER,
            slot_rounding: SlotRounding::Round,
            clean: false,
            zip: false,
            archive_only: false,
            dry_run: false,
        }
    }
}

impl RenumberConfig {
    /// Location of the per-user config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cbrn").join("config.toml"))
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RenumberConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the per-user config file when it exists, defaults otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }

    /// Whether a sniffed image type is one of the configured page types.
    pub fn recognizes(&self, extension: &str) -> bool {
        let wanted = canonical_extension(extension);
        self.file_types
            .iter()
            .any(|ext| canonical_extension(ext) == wanted)
    }
}

fn canonical_extension(extension: &str) -> String {
    let lower = extension.trim_start_matches('.').to_ascii_lowercase();
    match lower.as_str() {
        "jpeg" => "jpg".to_string(),
        "tiff" => "tif".to_string(),
        _ => lower,
    }
}
