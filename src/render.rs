//! The plot renderer: owns the GL program and geometry, and issues the
//! per-frame draw call.

use std::sync::Arc;

use glow::HasContext;
use thiserror::Error;

use crate::shaders::{self, ShaderError, ShaderSources};
use crate::types::Vertex;

/// Failure while creating the renderer's GL resources.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The shader program could not be built.
    #[error(transparent)]
    Shader(#[from] ShaderError),
    /// The driver refused to create a buffer or vertex array.
    #[error("failed to create GL object: {0}")]
    Create(String),
    /// More vertices than a single GL draw call can address.
    #[error("{0} vertices exceed the GL draw count limit")]
    TooManyVertices(usize),
}

/// Convert a `u32` to `i32` for GL API calls, saturating at `i32::MAX`.
fn gl_size(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Draws one sampled function as a line strip.
///
/// The vertices are uploaded once at creation; each [`render`](Self::render)
/// call is a single `glDrawArrays(GL_LINE_STRIP, ...)`.
///
/// # Example
///
/// ```no_run
/// # use glow_function_plot::{generate_vertices, Domain, PlotRenderer, ShaderSources};
/// # use std::sync::Arc;
/// # fn example(gl: Arc<glow::Context>) -> Result<(), glow_function_plot::RenderError> {
/// let vertices = generate_vertices(|x| x * x, 1000, Domain::default());
///
/// // During setup (with a current GL context):
/// let renderer = unsafe { PlotRenderer::new(gl, &ShaderSources::bundled(), &vertices) }?;
///
/// // Each frame:
/// unsafe { renderer.render(0.016, [800, 600]) };
///
/// // Before the context goes away:
/// unsafe { renderer.destroy() };
/// # Ok(())
/// # }
/// ```
pub struct PlotRenderer {
    gl: Arc<glow::Context>,

    /// Linked program from the vertex and fragment sources.
    program: glow::Program,
    /// `u_time`, if the program declares and uses it.
    time_uniform: Option<glow::UniformLocation>,

    /// Vertex array describing attribute 0 as a packed `vec3`.
    vao: glow::VertexArray,
    /// Static vertex buffer holding the sampled curve.
    vbo: glow::Buffer,
    /// Number of vertices in [`vbo`](Self::vbo).
    vertex_count: i32,
}

impl PlotRenderer {
    /// Compile the program and upload `vertices`.
    ///
    /// # Safety
    ///
    /// The `gl` context must be current and valid. The caller must call
    /// [`destroy`](Self::destroy) before the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the program fails to build, a GL object
    /// cannot be created, or the vertex count does not fit a draw call.
    pub unsafe fn new(
        gl: Arc<glow::Context>,
        sources: &ShaderSources,
        vertices: &[Vertex],
    ) -> Result<Self, RenderError> {
        let vertex_count = i32::try_from(vertices.len())
            .map_err(|_| RenderError::TooManyVertices(vertices.len()))?;

        let program = unsafe { shaders::compile_program(&gl, sources)? };
        let time_uniform = unsafe { gl.get_uniform_location(program, "u_time") };
        if time_uniform.is_none() {
            tracing::debug!("shader program has no active u_time uniform; plot will be static");
        }

        let buffers = unsafe {
            gl.create_vertex_array()
                .and_then(|vao| match gl.create_buffer() {
                    Ok(vbo) => Ok((vao, vbo)),
                    Err(err) => {
                        gl.delete_vertex_array(vao);
                        Err(err)
                    }
                })
        };
        let (vao, vbo) = match buffers {
            Ok(pair) => pair,
            Err(err) => {
                unsafe { gl.delete_program(program) };
                return Err(RenderError::Create(err));
            }
        };

        unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );
            gl.vertex_attrib_pointer_f32(
                0,
                3,
                glow::FLOAT,
                false,
                // Vertex is 12 bytes.
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                {
                    std::mem::size_of::<Vertex>() as i32
                },
                0,
            );
            gl.enable_vertex_attrib_array(0);
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }

        tracing::debug!(
            vertices = vertex_count,
            bytes = std::mem::size_of_val(vertices),
            "uploaded plot vertices"
        );

        Ok(Self {
            gl,
            program,
            time_uniform,
            vao,
            vbo,
            vertex_count,
        })
    }

    /// Number of vertices drawn per frame.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        usize::try_from(self.vertex_count).unwrap_or(0)
    }

    /// Set the viewport to `[width, height]` pixels.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    pub unsafe fn resize(&self, [width, height]: [u32; 2]) {
        unsafe { self.gl.viewport(0, 0, gl_size(width), gl_size(height)) };
    }

    /// Clear the framebuffer and draw the curve.
    ///
    /// `elapsed` is the time in seconds since the loop began and is written
    /// to `u_time` when the program has it.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    pub unsafe fn render(&self, elapsed: f32, size: [u32; 2]) {
        let gl = &self.gl;
        unsafe {
            self.resize(size);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(self.program));
            if let Some(location) = &self.time_uniform {
                gl.uniform_1_f32(Some(location), elapsed);
            }

            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::LINE_STRIP, 0, self.vertex_count);
            gl.bind_vertex_array(None);
        }
    }

    /// Release all GL resources owned by the renderer.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new). The renderer must not be used afterwards.
    pub unsafe fn destroy(&self) {
        let gl = &self.gl;
        unsafe {
            gl.delete_program(self.program);
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl_size_passes_small_values() {
        assert_eq!(gl_size(0), 0);
        assert_eq!(gl_size(800), 800);
    }

    #[test]
    fn gl_size_saturates() {
        assert_eq!(gl_size(u32::MAX), i32::MAX);
    }

    #[test]
    fn too_many_vertices_message() {
        assert_eq!(
            RenderError::TooManyVertices(3_000_000_000).to_string(),
            "3000000000 vertices exceed the GL draw count limit"
        );
    }
}
