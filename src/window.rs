//! Window, GL context and the frame loop.
//!
//! Uses winit for the event loop and glutin for an OpenGL 3.3 core context
//! on the window's surface. Frames are drawn continuously until the window
//! is closed.

use std::ffi::CString;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context as _, Result};
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use glow::HasContext;
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::config::PlotConfig;
use crate::render::PlotRenderer;
use crate::shaders::ShaderSources;
use crate::vertices::generate_vertices;

/// Requested OpenGL version (major, minor).
pub const GL_VERSION: (u8, u8) = (3, 3);

/// A window with a current GL context on its surface.
struct GlWindowState {
    window: Window,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: Arc<glow::Context>,
}

impl GlWindowState {
    fn size(&self) -> [u32; 2] {
        let size = self.window.inner_size();
        [size.width, size.height]
    }

    /// Resize the surface to match the window. Zero-sized (minimized)
    /// windows are ignored.
    fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.surface.resize(&self.context, width, height);
        }
    }
}

/// Pick the config with the most MSAA samples.
///
/// # Panics
///
/// Panics if glutin offers no configs, which glutin-winit reports as an
/// error before calling the picker.
#[allow(clippy::expect_used)]
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .max_by_key(GlConfig::num_samples)
        .expect("glutin offered no GL configs")
}

fn create_gl_window(event_loop: &EventLoop<()>, config: &PlotConfig) -> Result<GlWindowState> {
    let window_builder = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(PhysicalSize::new(config.width, config.height));

    let template = ConfigTemplateBuilder::new();
    let (window, gl_config) = DisplayBuilder::new()
        .with_window_builder(Some(window_builder))
        .build(event_loop, template, pick_config)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = window.context("display builder returned no window")?;

    let gl_display = gl_config.display();
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(
            GL_VERSION.0,
            GL_VERSION.1,
        ))))
        .with_profile(GlProfile::Core)
        .build(Some(window.raw_window_handle()));

    let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
        .context("failed to create OpenGL context")?;

    let surface_attributes = window.build_surface_attributes(Default::default());
    let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
        .context("failed to create window surface")?;

    let context = not_current
        .make_current(&surface)
        .context("failed to make OpenGL context current")?;

    if config.vsync {
        if let Err(err) =
            surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
        {
            tracing::warn!(error = %err, "failed to enable vsync");
        }
    }

    let gl = unsafe {
        glow::Context::from_loader_function(|symbol| {
            CString::new(symbol)
                .map(|symbol| gl_display.get_proc_address(&symbol).cast())
                .unwrap_or(std::ptr::null())
        })
    };
    let version = unsafe { gl.get_parameter_string(glow::VERSION) };
    tracing::info!(
        gl_version = %version,
        samples = gl_config.num_samples(),
        "created OpenGL context"
    );

    Ok(GlWindowState {
        window,
        surface,
        context,
        gl: Arc::new(gl),
    })
}

/// Open a window and draw the configured plot until it is closed.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the window or GL
/// context cannot be created, the shader program fails to build, or a
/// buffer swap fails.
pub fn run(config: &PlotConfig) -> Result<()> {
    config.validate()?;

    let vertices = generate_vertices(
        |x| config.function.eval(x),
        config.resolution,
        config.domain(),
    );
    let sources = match &config.shader_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "loading shaders");
            ShaderSources::from_dir(dir)
        }
        None => ShaderSources::bundled(),
    };

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let state = create_gl_window(&event_loop, config)?;

    let renderer = unsafe { PlotRenderer::new(state.gl.clone(), &sources, &vertices) }
        .context("failed to initialise plot renderer")?;
    tracing::info!(
        function = %config.function,
        vertices = renderer.vertex_count(),
        x_min = config.x_min,
        x_max = config.x_max,
        "plot ready"
    );

    let start = Instant::now();
    let mut result = Ok(());
    event_loop.set_control_flow(ControlFlow::Poll);
    let run_result = event_loop.run(|event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                state.resize(size);
                unsafe { renderer.resize([size.width, size.height]) };
            }
            WindowEvent::RedrawRequested => {
                unsafe { renderer.render(start.elapsed().as_secs_f32(), state.size()) };
                if let Err(err) = state.surface.swap_buffers(&state.context) {
                    tracing::error!(error = %err, "failed to swap buffers");
                    result = Err(anyhow!("failed to swap buffers: {err}"));
                    elwt.exit();
                }
            }
            _ => {}
        },
        Event::AboutToWait => state.window.request_redraw(),
        _ => {}
    });

    unsafe { renderer.destroy() };
    tracing::info!("window closed");

    run_result.context("event loop terminated with an error")?;
    result
}
