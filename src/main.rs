use anyhow::{anyhow, bail, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{info, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{ffi::CString, num::NonZeroU32};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

use glimt::{
    scene::{self, Scene, SCENE_NAMES},
    AppConfig, GlowBackend, RenderingContext, SurfaceSize,
};

const CONFIG_PATH: &str = "glimt.toml";

struct App {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    context: Option<RenderingContext<GlowBackend>>,
    surface_size: SurfaceSize,
    scene: Box<dyn Scene<GlowBackend>>,
}

impl App {
    fn new(
        config: &AppConfig,
        scene: Box<dyn Scene<GlowBackend>>,
    ) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title("glimt")
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            })
            .map_err(|e| anyhow!("failed to pick a GL config: {e}"))?;

        let window = window.ok_or_else(|| anyhow!("display builder produced no window"))?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .map_err(|e| anyhow!("failed to create OpenGL context: {e}"))?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .map_err(|e| anyhow!("failed to create GL surface: {e}"))?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .map_err(|e| anyhow!("failed to make context current: {e}"))?;

        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                let symbol = CString::new(symbol).unwrap();
                gl_display.get_proc_address(symbol.as_c_str()) as *const _
            })
        };
        let backend =
            GlowBackend::new(gl).map_err(|e| anyhow!("failed to initialize backend state: {e}"))?;

        let scale_factor = window.scale_factor();
        let logical = window.inner_size().to_logical::<f64>(scale_factor);
        let surface_size = SurfaceSize::new(
            logical.width.round() as u32,
            logical.height.round() as u32,
            scale_factor,
        );

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
                context: Some(RenderingContext::new(backend)),
                surface_size,
                scene,
            },
            event_loop,
        ))
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => true,
            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<f64>(self.window.scale_factor());
                self.surface_size
                    .set_logical(logical.width.round() as u32, logical.height.round() as u32);
                false
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.surface_size.set_scale_factor(*scale_factor);
                false
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                false
            }
            _ => false,
        }
    }

    fn redraw(&mut self) {
        let Some(context) = &self.context else {
            return;
        };

        // Re-derive the backing resolution before every frame; the GL surface
        // is reallocated only when it actually changed.
        if self.surface_size.resize() {
            let (width, height) = self.surface_size.backing();
            if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
                self.gl_surface.resize(&self.gl_context, width, height);
            }
        }

        self.scene.render(context, &self.surface_size);

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            log::error!("swap_buffers failed: {e}");
        }
    }

    fn cleanup(&mut self) {
        if let Some(context) = self.context.take() {
            self.scene.teardown(&context);
            context.teardown();
        }
    }
}

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = AppConfig::load_or_default(CONFIG_PATH)?;
    let scene_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.scene.clone());
    let Some(scene) = scene::by_name::<GlowBackend>(&scene_name, &config) else {
        bail!("unknown scene '{scene_name}', expected one of {SCENE_NAMES:?}");
    };
    info!("running scene '{}'", scene.name());

    let (mut app, event_loop) = App::new(&config, scene)?;

    let context = app.context.as_ref().expect("context is live until cleanup");
    app.scene.init(context)?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => {
            if app.handle_window_event(&event) {
                app.cleanup();
                elwt.exit();
            }
        }
        Event::AboutToWait => {
            app.window.request_redraw();
        }
        _ => (),
    })?;

    Ok(())
}
