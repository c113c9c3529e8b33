//! Plot settings, loadable from TOML.
//!
//! ```toml
//! function = "sin"
//! resolution = 2000
//! x_min = -1.0
//! x_max = 1.0
//! width = 1024
//! height = 768
//! title = "sin(πx)"
//! shader_dir = "./shaders"
//! vsync = true
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::loader::{self, LoadError};
use crate::types::{Domain, PlotFunction};

/// Default window width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default window height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;
/// Default number of samples along the curve.
pub const DEFAULT_RESOLUTION: usize = 1000;
/// Default shader directory, relative to the working directory.
pub const DEFAULT_SHADER_DIR: &str = "./shaders";

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The config file is not valid TOML for [`PlotConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Window width or height is zero.
    #[error("window size must be non-zero, got {width}x{height}")]
    ZeroWindowSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Fewer than two samples cannot form a line.
    #[error("resolution must be at least 2, got {0}")]
    ResolutionTooLow(usize),
    /// A domain edge is NaN or infinite.
    #[error("domain bounds must be finite, got [{min}, {max}]")]
    NonFiniteDomain {
        /// Left edge.
        min: f32,
        /// Right edge.
        max: f32,
    },
    /// The domain is empty or reversed.
    #[error("x_min ({min}) must be less than x_max ({max})")]
    EmptyDomain {
        /// Left edge.
        min: f32,
        /// Right edge.
        max: f32,
    },
    /// `x_max - x_min` does not fit in an `f32`.
    #[error("domain [{min}, {max}] is wider than an f32 can represent")]
    DomainTooWide {
        /// Left edge.
        min: f32,
        /// Right edge.
        max: f32,
    },
}

/// Everything needed to open the window and build the plot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Number of samples along the curve.
    pub resolution: usize,
    /// Left edge of the sampled domain.
    pub x_min: f32,
    /// Right edge of the sampled domain.
    pub x_max: f32,
    /// Function to plot.
    pub function: PlotFunction,
    /// Directory holding `vert.glsl` and `frag.glsl`. `None` uses the
    /// sources compiled into the crate.
    pub shader_dir: Option<PathBuf>,
    /// Synchronize buffer swaps with the display refresh.
    pub vsync: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: "Function Plot".to_owned(),
            resolution: DEFAULT_RESOLUTION,
            x_min: -1.0,
            x_max: 1.0,
            function: PlotFunction::default(),
            shader_dir: Some(PathBuf::from(DEFAULT_SHADER_DIR)),
            vsync: true,
        }
    }
}

impl PlotConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys. The
    /// result is not validated; call [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = loader::read_text_file(path)?;
        Self::from_toml_str(&text)
    }

    /// The sampled x range.
    #[must_use]
    pub fn domain(&self) -> Domain {
        Domain::new(self.x_min, self.x_max)
    }

    /// Check the settings describe a drawable plot.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroWindowSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.resolution < 2 {
            return Err(ConfigError::ResolutionTooLow(self.resolution));
        }
        if !self.x_min.is_finite() || !self.x_max.is_finite() {
            return Err(ConfigError::NonFiniteDomain {
                min: self.x_min,
                max: self.x_max,
            });
        }
        if self.x_min >= self.x_max {
            return Err(ConfigError::EmptyDomain {
                min: self.x_min,
                max: self.x_max,
            });
        }
        if !self.domain().span().is_finite() {
            return Err(ConfigError::DomainTooWide {
                min: self.x_min,
                max: self.x_max,
            });
        }
        Ok(())
    }
}
