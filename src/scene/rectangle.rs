//! src/scene/rectangle.rs
//! A solid rectangle given in surface-pixel coordinates; the vertex shader
//! converts to clip space using the resolution uniform.

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::geometry::rect_vertices;
use crate::render::{
    AttributeBinding, BufferUsage, BuildError, DrawCall, DrawSpec, FrameRenderer, GeometryBuffer,
    LinkedProgram, ProgramBuilder, RenderBackend, RenderingContext, Rgba, ShaderSource,
    ShaderStage, SurfaceSize, UniformBinding, UniformValue, VertexLayout,
};

use super::Scene;

const FILL_COLOR: Rgba = Rgba::opaque(1.0, 0.0, 0.5);

struct Gpu<B: RenderBackend> {
    program: LinkedProgram<B>,
    buffer: GeometryBuffer<B>,
    attribute: AttributeBinding,
    u_resolution: UniformBinding<B>,
    u_color: UniformBinding<B>,
}

pub struct RectangleScene<B: RenderBackend> {
    shader_dir: PathBuf,
    clear_color: Rgba,
    gpu: Option<Gpu<B>>,
}

impl<B: RenderBackend> RectangleScene<B> {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            shader_dir: config.shader_dir.clone(),
            clear_color: config.clear_color,
            gpu: None,
        }
    }
}

impl<B: RenderBackend> Scene<B> for RectangleScene<B> {
    fn name(&self) -> &'static str {
        "rectangle"
    }

    fn init(&mut self, ctx: &RenderingContext<B>) -> Result<(), BuildError> {
        let backend = ctx.backend();
        let vertex =
            ShaderSource::from_file(ShaderStage::Vertex, self.shader_dir.join("pixel_space.vert"))?;
        let fragment =
            ShaderSource::from_file(ShaderStage::Fragment, self.shader_dir.join("solid.frag"))?;

        let mut program = ProgramBuilder::build(backend, &vertex, &fragment)?;
        let attribute = program.attribute(backend, "a_position");
        let u_resolution = program.uniform(backend, "u_resolution");
        let u_color = program.uniform(backend, "u_color");
        let buffer = GeometryBuffer::with_vertices(
            backend,
            BufferUsage::Static,
            rect_vertices(10.0, 60.0, 290.0, 240.0),
        )?;

        self.gpu = Some(Gpu {
            program,
            buffer,
            attribute,
            u_resolution,
            u_color,
        });
        Ok(())
    }

    fn render(&mut self, ctx: &RenderingContext<B>, surface: &SurfaceSize) {
        let Some(gpu) = &self.gpu else {
            return;
        };
        FrameRenderer::new(ctx.backend()).draw_frame(
            &gpu.program,
            surface,
            self.clear_color,
            &[DrawSpec {
                buffer: &gpu.buffer,
                attribute: gpu.attribute,
                layout: VertexLayout::default(),
                uniforms: vec![
                    (
                        gpu.u_resolution.clone(),
                        UniformValue::Vec2(surface.logical_f32()),
                    ),
                    (gpu.u_color.clone(), FILL_COLOR.into()),
                ],
                call: DrawCall::triangles(6),
            }],
        );
    }

    fn teardown(&mut self, ctx: &RenderingContext<B>) {
        if let Some(gpu) = self.gpu.take() {
            gpu.buffer.release(ctx.backend());
            gpu.program.release(ctx.backend());
        }
    }
}
