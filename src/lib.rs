//! An animated line plot of a sampled function, rendered with OpenGL via
//! [glow].
//!
//! The pipeline is small:
//!
//! 1. [`generate_vertices`] samples a function at evenly spaced points over a
//!    [`Domain`], producing packed `[x, y, 0]` [`Vertex`] data.
//! 2. [`ShaderSources`] reads `vert.glsl` / `frag.glsl` through the
//!    [`loader`], and [`compile_program`] builds the GL program, reporting
//!    compile and link logs as [`ShaderError`]s.
//! 3. [`PlotRenderer`] uploads the vertices once and draws them as a line
//!    strip each frame, feeding elapsed time to the `u_time` uniform.
//! 4. [`window::run`] opens a window with an OpenGL 3.3 core context and
//!    drives the renderer until the window is closed.
//!
//! # Safety
//!
//! [`PlotRenderer`] and [`compile_program`] require a valid, current OpenGL
//! context. Their methods are `unsafe` because they issue raw GL calls.
//!
//! [glow]: https://docs.rs/glow

pub mod config;
pub mod loader;
mod render;
mod shaders;
mod types;
mod vertices;
pub mod window;

pub use config::{ConfigError, PlotConfig};
pub use loader::{load_binary_file, load_text_file, LoadError};
pub use render::{PlotRenderer, RenderError};
pub use shaders::{
    compile_program, ShaderError, ShaderSources, ShaderStage, DEFAULT_FRAGMENT_SRC,
    DEFAULT_VERTEX_SRC, FRAGMENT_FILE, VERTEX_FILE,
};
pub use types::{Domain, PlotFunction, Vertex};
pub use vertices::{as_floats, generate_vertices};
