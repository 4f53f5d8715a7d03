//! Desktop host for the orrery scene.
//!
//! Owns everything the renderer deliberately does not: window and GL
//! context creation, the event loop, resize plumbing, vsync, and teardown
//! ordering. The renderer only sees the [`orrery_render::Gl`] facade and
//! its three surface callbacks.

mod logging;

use anyhow::{Context, Result, anyhow};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::VideoSubsystem;
use sdl2::video::{GLProfile, Window};

use orrery_render::gl::glow_backend::GlowContext;
use orrery_render::{CubeGeometry, RendererConfig, SceneRenderer, ShaderSet, SurfaceRenderer};

const WINDOW_TITLE: &str = "Orrery";
const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

fn main() -> Result<()> {
    logging::init();
    run()
}

fn run() -> Result<()> {
    let sdl = sdl2::init().map_err(|err| anyhow!("failed to init SDL2: {err}"))?;
    let video = sdl
        .video()
        .map_err(|err| anyhow!("failed to init SDL2 video: {err}"))?;

    let (window, _gl_guard) = create_window_and_context(&video)?;
    let _ = video.gl_set_swap_interval(1);

    let gl = unsafe {
        glow::Context::from_loader_function(|name| video.gl_get_proc_address(name) as *const _)
    };
    let gl = GlowContext::new(gl);

    let geometry = CubeGeometry::bundled().context("bundled cube geometry is invalid")?;
    let mut renderer = SceneRenderer::with_system_clock(
        geometry,
        ShaderSet::bundled(),
        RendererConfig {
            log_diagnostics: log::log_enabled!(log::Level::Debug),
        },
    );

    renderer.on_surface_created(&gl);
    let (width, height) = window.drawable_size();
    renderer.on_surface_changed(&gl, width, height);
    log::info!("surface ready at {width}x{height}");

    let mut events = sdl
        .event_pump()
        .map_err(|err| anyhow!("failed to get SDL event pump: {err}"))?;

    'main_loop: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main_loop,
                Event::KeyDown { keycode: Some(Keycode::Escape), .. } => break 'main_loop,
                Event::Window { win_event: WindowEvent::SizeChanged(..), .. } => {
                    let (width, height) = window.drawable_size();
                    renderer.on_surface_changed(&gl, width, height);
                }
                _ => {}
            }
        }

        renderer.on_draw_frame(&gl);
        window.gl_swap_window();
    }

    // The context is still current here; release GPU objects before it goes.
    renderer.on_surface_destroyed(&gl);
    Ok(())
}

/// Builds the window and a current GL context.
///
/// A GL ES 2.0 context is requested first since the shaders are GLSL ES;
/// when the driver cannot provide one, the default profile is used instead
/// (desktop compatibility contexts accept the same shading dialect).
fn create_window_and_context(
    video: &VideoSubsystem,
) -> Result<(Window, sdl2::video::GLContext)> {
    {
        let attr = video.gl_attr();
        attr.set_context_profile(GLProfile::GLES);
        attr.set_context_version(2, 0);
        attr.set_depth_size(24);
        attr.set_double_buffer(true);
    }

    let window = build_window(video)?;
    match window.gl_create_context() {
        Ok(ctx) => return Ok((window, ctx)),
        Err(err) => {
            log::warn!("GL ES 2.0 context unavailable ({err}); using the driver default");
        }
    }

    {
        let attr = video.gl_attr();
        attr.set_context_profile(GLProfile::Compatibility);
        attr.set_context_version(2, 1);
    }
    let window = build_window(video)?;
    let ctx = window
        .gl_create_context()
        .map_err(|err| anyhow!("failed to create a GL context: {err}"))?;
    Ok((window, ctx))
}

fn build_window(video: &VideoSubsystem) -> Result<Window> {
    video
        .window(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT)
        .opengl()
        .resizable()
        .position_centered()
        .build()
        .context("failed to create the window")
}
