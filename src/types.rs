//! Plain data types shared by the sampler, renderer and configuration.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::Deserialize;

/// A sampled point on the plotted curve, ready for the GPU.
///
/// Three tightly packed `f32`s, so a `&[Vertex]` is the flat coordinate
/// sequence `x0, y0, z0, x1, y1, z1, ...` that vertex attribute 0 reads.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// `[x, y, z]` in normalized device coordinates. `z` is always `0.0`.
    pub position: [f32; 3],
}

/// Closed interval `[min, max]` of x values to sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Domain {
    /// Left edge, the first sampled x.
    pub min: f32,
    /// Right edge, the last sampled x.
    pub max: f32,
}

impl Domain {
    /// Build a domain from its two edges.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Distance between the edges.
    #[must_use]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(-1.0, 1.0)
    }
}

/// Built-in functions the plot can display.
///
/// | Name       | `f(x)`       |
/// |------------|--------------|
/// | `identity` | `x`          |
/// | `sin`      | `sin(πx)`    |
/// | `cos`      | `cos(πx)`    |
/// | `square`   | `x²`         |
/// | `cube`     | `x³`         |
/// | `tanh`     | `tanh(3x)`   |
/// | `abs`      | `abs(x)`     |
///
/// The trigonometric and `tanh` variants are scaled so that one interesting
/// period fits the default `[-1, 1]` domain.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFunction {
    /// `f(x) = x`.
    #[default]
    Identity,
    /// `f(x) = sin(πx)`.
    Sin,
    /// `f(x) = cos(πx)`.
    Cos,
    /// `f(x) = x²`.
    Square,
    /// `f(x) = x³`.
    Cube,
    /// `f(x) = tanh(3x)`.
    Tanh,
    /// `f(x) = abs(x)`.
    Abs,
}

impl PlotFunction {
    /// Every variant, in table order.
    pub const ALL: [PlotFunction; 7] = [
        PlotFunction::Identity,
        PlotFunction::Sin,
        PlotFunction::Cos,
        PlotFunction::Square,
        PlotFunction::Cube,
        PlotFunction::Tanh,
        PlotFunction::Abs,
    ];

    /// Evaluate the function at `x`.
    #[must_use]
    pub fn eval(self, x: f32) -> f32 {
        use std::f32::consts::PI;

        match self {
            PlotFunction::Identity => x,
            PlotFunction::Sin => (PI * x).sin(),
            PlotFunction::Cos => (PI * x).cos(),
            PlotFunction::Square => x * x,
            PlotFunction::Cube => x * x * x,
            PlotFunction::Tanh => (3.0 * x).tanh(),
            PlotFunction::Abs => x.abs(),
        }
    }

    /// The name accepted by [`FromStr`] and config files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PlotFunction::Identity => "identity",
            PlotFunction::Sin => "sin",
            PlotFunction::Cos => "cos",
            PlotFunction::Square => "square",
            PlotFunction::Cube => "cube",
            PlotFunction::Tanh => "tanh",
            PlotFunction::Abs => "abs",
        }
    }
}

impl fmt::Display for PlotFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlotFunction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|function| function.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                format!(
                    "unknown function '{trimmed}' (expected one of: {})",
                    names.join(", ")
                )
            })
    }
}
