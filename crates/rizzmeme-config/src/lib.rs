use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const FILE_NAME: &str = "rizzmeme.toml";

/// Rizzmeme configuration, read from `rizzmeme.toml`
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MemeConfig {
    /// Where template images are looked up
    #[serde(default)]
    pub assets: AssetOptions,

    /// Font discovery overrides
    #[serde(default)]
    pub fonts: FontOptions,

    /// Where rendered memes are written
    #[serde(default)]
    pub output: OutputOptions,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssetOptions {
    /// Base directory that template image paths are resolved against.
    /// Unset means the directory of the running executable.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FontOptions {
    /// Font files tried before the platform defaults
    #[serde(default)]
    pub candidates: Vec<PathBuf>,

    /// Never load font files, always use the builtin bitmap font
    #[serde(default)]
    pub builtin_only: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputOptions {
    /// Default output directory for rendered memes
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("memes")
}

impl MemeConfig {
    /// Read and parse a config file
    pub fn read(path: &Path) -> Result<Self> {
        let config_str = fs_err::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&config_str).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Read a config file, falling back to defaults when it does not exist
    pub fn read_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::read(path)
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }
}
