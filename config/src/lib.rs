//! Session configuration for Playoff.
//!
//! Configuration is optional: a session runs fine without any file on disk.
//! When present, `~/.playoff/config.toml` supplies the organizational
//! reference principles used by the alignment analyzer, plus session
//! defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// The alignment analyzer compares against at most this many reference
/// principles.
pub const MAX_REFERENCE_PRINCIPLES: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionConfigError {
    #[error("organization lists {0} principles; at most 10 are supported")]
    TooManyReferencePrinciples(usize),
    #[error("organization principle at index {0} is empty")]
    EmptyReferencePrinciple(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ── Shapes ───────────────────────────────────────────────────

/// Organizational values to compare the personal ranking against.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawOrganization")]
pub struct Organization {
    name: Option<String>,
    context: Option<String>,
    principles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawOrganization {
    name: Option<String>,
    context: Option<String>,
    #[serde(default)]
    principles: Vec<String>,
}

impl TryFrom<RawOrganization> for Organization {
    type Error = SessionConfigError;

    fn try_from(raw: RawOrganization) -> Result<Self, Self::Error> {
        if raw.principles.len() > MAX_REFERENCE_PRINCIPLES {
            return Err(SessionConfigError::TooManyReferencePrinciples(
                raw.principles.len(),
            ));
        }
        if let Some(index) = raw.principles.iter().position(|p| p.trim().is_empty()) {
            return Err(SessionConfigError::EmptyReferencePrinciple(index));
        }
        Ok(Self {
            name: raw.name,
            context: raw.context,
            principles: raw.principles,
        })
    }
}

impl Organization {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    #[must_use]
    pub fn principles(&self) -> &[String] {
        &self.principles
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SessionDefaults {
    #[serde(default)]
    pub quick_start: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    pub organization: Option<Organization>,
    #[serde(default)]
    pub session: SessionDefaults,
}

// ── Loading ──────────────────────────────────────────────────

impl SessionConfig {
    /// Load from the default location. `Ok(None)` when no file exists or
    /// the home directory cannot be resolved.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            tracing::debug!("no home directory; skipping config");
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load and validate a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded session config");
        Ok(config)
    }
}

/// `~/.playoff/config.toml`, or `None` when the home directory is unknown.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".playoff").join("config.toml"))
}

// ── Tests ────────────────────────────────────────────────────
