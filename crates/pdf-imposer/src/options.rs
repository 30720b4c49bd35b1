use crate::constants::{DEFAULT_LAYOUT, DEFAULT_PAPER_FORMAT};
use crate::layout::{Layout, PaperFormat};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// User-facing conversion settings, as read from the command line or a
/// JSON config file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionOptions {
    pub input_file: Option<PathBuf>,
    /// Defaults to the input path with a `-conv.pdf` suffix
    pub output_file: Option<PathBuf>,

    pub conversion_type: ConversionType,
    /// Tiles per output page, as `WxH`
    pub layout: String,
    /// Output paper format name, `R` suffix for landscape
    pub paper_format: String,
    /// Repeat source pages instead of tiling distinct ones
    pub copy_pages: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            input_file: None,
            output_file: None,
            conversion_type: ConversionType::Bookletize,
            layout: DEFAULT_LAYOUT.to_string(),
            paper_format: DEFAULT_PAPER_FORMAT.to_string(),
            copy_pages: false,
        }
    }
}

impl ConversionOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Parse the layout and paper format into an immutable configuration
    pub fn validate(&self) -> Result<ConversionConfig> {
        ConversionConfig::new(
            self.conversion_type,
            &self.layout,
            &self.paper_format,
            self.copy_pages,
        )
    }
}

/// Validated conversion parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    pub conversion_type: ConversionType,
    pub layout: Layout,
    pub paper: PaperFormat,
    pub copy_pages: bool,
}

impl ConversionConfig {
    pub fn new(
        conversion_type: ConversionType,
        layout: &str,
        paper_format: &str,
        copy_pages: bool,
    ) -> Result<Self> {
        Ok(Self {
            conversion_type,
            layout: layout.parse()?,
            paper: PaperFormat::lookup(paper_format)?,
            copy_pages,
        })
    }
}
