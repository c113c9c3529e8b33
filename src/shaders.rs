//! GLSL sources for the plot line and program compilation helpers.
//!
//! Sources normally come from `vert.glsl` / `frag.glsl` in a shader
//! directory, read through the [loader](crate::loader). The bundled defaults
//! below mirror the files shipped in `shaders/` and target GLSL 3.30 core.

use std::fmt;
use std::path::Path;

use glow::HasContext;
use thiserror::Error;

use crate::loader;

/// File name of the vertex stage inside a shader directory.
pub const VERTEX_FILE: &str = "vert.glsl";
/// File name of the fragment stage inside a shader directory.
pub const FRAGMENT_FILE: &str = "frag.glsl";

/// Bundled vertex shader.
///
/// Passes the sampled position through unchanged. Attribute 0 is the
/// `vec3` position written by [`generate_vertices`](crate::generate_vertices).
pub const DEFAULT_VERTEX_SRC: &str = r"#version 330 core

layout (location = 0) in vec3 a_position;

out float v_x;

void main() {
    v_x = a_position.x;
    gl_Position = vec4(a_position, 1.0);
}
";

/// Bundled fragment shader.
///
/// # Uniforms
///
/// | Name     | Type    | Description                         |
/// |----------|---------|-------------------------------------|
/// | `u_time` | `float` | Seconds since the render loop began |
///
/// A bright band sweeps along the curve from left to right, once every two
/// seconds across the default `[-1, 1]` domain.
pub const DEFAULT_FRAGMENT_SRC: &str = r"#version 330 core

in float v_x;

uniform float u_time;

out vec4 frag_color;

void main() {
    float phase = fract(u_time * 0.5) * 2.0 - 1.0;
    float glow = exp(-40.0 * (v_x - phase) * (v_x - phase));
    vec3 base = vec3(0.2, 0.8, 1.0);
    frag_color = vec4(mix(base, vec3(1.0), glow), 1.0);
}
";

/// Pipeline stage a shader source belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    /// Per-vertex stage.
    Vertex,
    /// Per-fragment stage.
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failure to turn shader text into a linked program.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// The source was empty, usually because the file failed to load.
    #[error("{0} shader source is empty")]
    EmptySource(ShaderStage),
    /// The driver refused to create a shader or program object.
    #[error("failed to create GL object: {0}")]
    Create(String),
    /// A stage failed to compile.
    #[error("{stage} shader compilation failed:\n{log}")]
    Compile {
        /// Stage that failed.
        stage: ShaderStage,
        /// Driver info log.
        log: String,
    },
    /// The stages compiled but the program failed to link.
    #[error("shader linking failed:\n{0}")]
    Link(String),
}

/// Vertex and fragment source text for one program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderSources {
    /// Vertex stage GLSL.
    pub vertex: String,
    /// Fragment stage GLSL.
    pub fragment: String,
}

impl ShaderSources {
    /// The sources compiled into the crate.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            vertex: DEFAULT_VERTEX_SRC.to_owned(),
            fragment: DEFAULT_FRAGMENT_SRC.to_owned(),
        }
    }

    /// Load [`VERTEX_FILE`] and [`FRAGMENT_FILE`] from `dir`.
    ///
    /// A file that cannot be read yields an empty source (and a logged
    /// error); [`compile_program`] then rejects it with
    /// [`ShaderError::EmptySource`].
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vertex: loader::load_text_file(dir.join(VERTEX_FILE)),
            fragment: loader::load_text_file(dir.join(FRAGMENT_FILE)),
        }
    }

    /// Check both stages are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::EmptySource`] for the first blank stage.
    pub fn validate(&self) -> Result<(), ShaderError> {
        if self.vertex.trim().is_empty() {
            return Err(ShaderError::EmptySource(ShaderStage::Vertex));
        }
        if self.fragment.trim().is_empty() {
            return Err(ShaderError::EmptySource(ShaderStage::Fragment));
        }
        Ok(())
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Compile a shader program from vertex and fragment source strings.
///
/// The shader objects are released before returning, whether linking
/// succeeded or not, so only the program handle needs cleaning up by the
/// caller.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns [`ShaderError`] describing the empty source, failed stage, or
/// link failure along with the driver's info log.
pub unsafe fn compile_program(
    gl: &glow::Context,
    sources: &ShaderSources,
) -> Result<glow::Program, ShaderError> {
    sources.validate()?;

    let vs = unsafe { compile_shader(gl, ShaderStage::Vertex, &sources.vertex) }?;
    let fs = match unsafe { compile_shader(gl, ShaderStage::Fragment, &sources.fragment) } {
        Ok(fs) => fs,
        Err(err) => {
            unsafe { gl.delete_shader(vs) };
            return Err(err);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(err) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(ShaderError::Create(err));
            }
        };

        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);
        let linked = gl.get_program_link_status(program);

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        if !linked {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(ShaderError::Link(log));
        }

        Ok(program)
    }
}

/// Compile a single shader stage from source.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_enum())
            .map_err(ShaderError::Create)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }

        Ok(shader)
    }
}
