//! src/scene/triangle.rs
//! A single solid triangle, positioned directly in clip space.

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::render::{
    AttributeBinding, BufferUsage, BuildError, DrawCall, DrawSpec, FrameRenderer, GeometryBuffer,
    LinkedProgram, ProgramBuilder, RenderBackend, RenderingContext, Rgba, ShaderSource,
    ShaderStage, SurfaceSize, UniformBinding, VertexLayout,
};

use super::Scene;

const TRIANGLE_VERTICES: [f32; 6] = [0.0, 0.0, 0.0, 0.5, 0.7, 0.0];
const FILL_COLOR: Rgba = Rgba::opaque(1.0, 0.0, 0.5);

struct Gpu<B: RenderBackend> {
    program: LinkedProgram<B>,
    buffer: GeometryBuffer<B>,
    attribute: AttributeBinding,
    u_color: UniformBinding<B>,
}

pub struct TriangleScene<B: RenderBackend> {
    shader_dir: PathBuf,
    clear_color: Rgba,
    gpu: Option<Gpu<B>>,
}

impl<B: RenderBackend> TriangleScene<B> {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            shader_dir: config.shader_dir.clone(),
            clear_color: config.clear_color,
            gpu: None,
        }
    }
}

impl<B: RenderBackend> Scene<B> for TriangleScene<B> {
    fn name(&self) -> &'static str {
        "triangle"
    }

    fn init(&mut self, ctx: &RenderingContext<B>) -> Result<(), BuildError> {
        let backend = ctx.backend();
        let vertex =
            ShaderSource::from_file(ShaderStage::Vertex, self.shader_dir.join("clip_space.vert"))?;
        let fragment =
            ShaderSource::from_file(ShaderStage::Fragment, self.shader_dir.join("solid.frag"))?;

        let mut program = ProgramBuilder::build(backend, &vertex, &fragment)?;
        let attribute = program.attribute(backend, "a_position");
        let u_color = program.uniform(backend, "u_color");
        let buffer = GeometryBuffer::with_vertices(backend, BufferUsage::Static, TRIANGLE_VERTICES)?;

        self.gpu = Some(Gpu {
            program,
            buffer,
            attribute,
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
                uniforms: vec![(gpu.u_color.clone(), FILL_COLOR.into())],
                call: DrawCall::triangles(3),
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
