//! Generation configuration (handlegen.toml format).

use crate::tables::Tables;
use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Target package metadata.
    pub package: PackageConfig,

    /// Headers to read.
    pub input: InputConfig,

    /// Where and how artifacts are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Curated mapping tables.
    #[serde(default)]
    pub tables: Tables,
}

/// Target package metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Go package name written at the top of every artifact.
    pub name: String,

    /// Header named in the cgo `#include` preamble.
    pub include: String,
}

/// Header input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Header files, parsed in order and merged into one translation unit.
    pub headers: Vec<PathBuf>,

    /// Macro tokens removed from the header text before parsing
    /// (calling-convention or deprecation markers).
    #[serde(default)]
    pub strip_tokens: Vec<String>,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Write one `<type>_gen.go` per handle instead of a single file.
    #[serde(default = "default_split")]
    pub split: bool,

    /// Formatter command run on every artifact, e.g. `["goimports", "-w"]`.
    /// The artifact path is appended as the last argument.
    #[serde(default)]
    pub formatter: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            split: default_split(),
            formatter: Vec::new(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_split() -> bool {
    true
}

impl GenConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative header and output paths are resolved against the directory
    /// containing the config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_str(&content)?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for header in &mut self.input.headers {
            if header.is_relative() {
                *header = base.join(&*header);
            }
        }
        if self.output.dir.is_relative() {
            self.output.dir = base.join(&self.output.dir);
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.package.name.trim().is_empty() {
            return Err(ConfigError::Validation("package.name must not be empty".to_string()));
        }
        if self.input.headers.is_empty() {
            return Err(ConfigError::Validation(
                "input.headers must list at least one header".to_string(),
            ));
        }
        for (i, header) in self.input.headers.iter().enumerate() {
            if self.input.headers[..i].contains(header) {
                return Err(ConfigError::Validation(format!(
                    "input.headers lists {} more than once",
                    header.display()
                )));
            }
        }
        if let Some(program) = self.output.formatter.first() {
            if program.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "output.formatter program must not be empty".to_string(),
                ));
            }
        }
        self.tables.validate()
    }
}
