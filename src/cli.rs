use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glow_function_plot::{PlotConfig, PlotFunction};

#[derive(Parser, Debug)]
#[command(
    name = "function-plot",
    author,
    version,
    about = "Draw an animated line plot of a function with OpenGL"
)]
pub struct Cli {
    /// TOML file with plot settings; flags override its values.
    #[arg(long, value_name = "FILE", env = "FUNCTION_PLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Function to plot: identity, sin, cos, square, cube, tanh, abs.
    #[arg(long, short, value_name = "NAME")]
    pub function: Option<PlotFunction>,

    /// Number of samples along the curve (at least 2).
    #[arg(long, short, value_name = "N")]
    pub resolution: Option<usize>,

    /// Left edge of the sampled domain.
    #[arg(long, value_name = "X", allow_negative_numbers = true)]
    pub x_min: Option<f32>,

    /// Right edge of the sampled domain.
    #[arg(long, value_name = "X", allow_negative_numbers = true)]
    pub x_max: Option<f32>,

    /// Window width in pixels.
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Window height in pixels.
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Window title.
    #[arg(long)]
    pub title: Option<String>,

    /// Directory containing `vert.glsl` and `frag.glsl`.
    #[arg(long, value_name = "DIR", conflicts_with = "builtin_shaders")]
    pub shader_dir: Option<PathBuf>,

    /// Use the shaders compiled into the binary instead of reading files.
    #[arg(long)]
    pub builtin_shaders: bool,

    /// Present frames as fast as possible instead of waiting for vsync.
    #[arg(long)]
    pub no_vsync: bool,
}

impl Cli {
    /// Resolve the final config: defaults, then the config file, then flags.
    pub fn into_config(self) -> Result<PlotConfig> {
        let mut config = match &self.config {
            Some(path) => PlotConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => PlotConfig::default(),
        };

        if let Some(function) = self.function {
            config.function = function;
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(x_min) = self.x_min {
            config.x_min = x_min;
        }
        if let Some(x_max) = self.x_max {
            config.x_max = x_max;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(title) = self.title {
            config.title = title;
        }
        if self.builtin_shaders {
            config.shader_dir = None;
        } else if let Some(dir) = self.shader_dir {
            config.shader_dir = Some(dir);
        }
        if self.no_vsync {
            config.vsync = false;
        }

        Ok(config)
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn no_flags_is_default_config() {
        let cli = Cli::try_parse_from(["function-plot"]).unwrap();
        assert_eq!(cli.into_config().unwrap(), PlotConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "function-plot",
            "--function",
            "tanh",
            "--resolution",
            "64",
            "--x-min",
            "-2.5",
            "--x-max",
            "2.5",
            "--no-vsync",
            "--builtin-shaders",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();

        assert_eq!(config.function, PlotFunction::Tanh);
        assert_eq!(config.resolution, 64);
        assert_eq!(config.x_min, -2.5);
        assert_eq!(config.x_max, 2.5);
        assert!(!config.vsync);
        assert_eq!(config.shader_dir, None);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plot.toml");
        fs::write(&path, "function = \"sin\"\nwidth = 640\n").unwrap();

        let cli = Cli::try_parse_from([
            "function-plot",
            "--config",
            path.to_str().unwrap(),
            "--width",
            "1280",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();

        assert_eq!(config.function, PlotFunction::Sin);
        assert_eq!(config.width, 1280);
    }

    #[test]
    fn unknown_function_is_a_parse_error() {
        assert!(Cli::try_parse_from(["function-plot", "--function", "sinh"]).is_err());
    }

    #[test]
    fn shader_dir_conflicts_with_builtin() {
        assert!(Cli::try_parse_from([
            "function-plot",
            "--shader-dir",
            "shaders",
            "--builtin-shaders"
        ])
        .is_err());
    }
}
