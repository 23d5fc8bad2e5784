//! src/scene/random_rects.rs
//! Fifty rectangles at random positions in random colors, sharing one
//! dynamic buffer that is rewritten before every draw.

use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::config::AppConfig;
use crate::geometry::{random_color, random_rect};
use crate::render::{
    AttributeBinding, BufferUsage, BuildError, DrawCall, DrawSpec, FrameRenderer, GeometryBuffer,
    LinkedProgram, ProgramBuilder, RenderBackend, RenderingContext, Rgba, ShaderSource,
    ShaderStage, SurfaceSize, UniformBinding, UniformValue, VertexLayout,
};

use super::Scene;

struct Gpu<B: RenderBackend> {
    program: LinkedProgram<B>,
    buffer: GeometryBuffer<B>,
    attribute: AttributeBinding,
    u_resolution: UniformBinding<B>,
    u_color: UniformBinding<B>,
}

pub struct RandomRectsScene<B: RenderBackend> {
    shader_dir: PathBuf,
    clear_color: Rgba,
    seed: u64,
    rect_count: u32,
    gpu: Option<Gpu<B>>,
}

impl<B: RenderBackend> RandomRectsScene<B> {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            shader_dir: config.shader_dir.clone(),
            clear_color: config.clear_color,
            seed: config.seed,
            rect_count: config.rect_count,
            gpu: None,
        }
    }
}

impl<B: RenderBackend> Scene<B> for RandomRectsScene<B> {
    fn name(&self) -> &'static str {
        "random-rects"
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
        let buffer = GeometryBuffer::new(backend, BufferUsage::Dynamic)?;

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
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        let renderer = FrameRenderer::new(ctx.backend());
        renderer.begin_frame(&gpu.program, surface, self.clear_color);

        let (width, height) = surface.logical();
        // Reseeded every frame, so repeated redraws reproduce the same layout.
        let mut rng = ChaCha12Rng::seed_from_u64(self.seed);
        for _ in 0..self.rect_count {
            gpu.buffer
                .set_vertices(random_rect(&mut rng, width, height));
            let color = random_color(&mut rng);
            renderer.draw(&DrawSpec {
                buffer: &gpu.buffer,
                attribute: gpu.attribute,
                layout: VertexLayout::default(),
                uniforms: vec![
                    (
                        gpu.u_resolution.clone(),
                        UniformValue::Vec2(surface.logical_f32()),
                    ),
                    (gpu.u_color.clone(), color.into()),
                ],
                call: DrawCall::triangles(6),
            });
        }
    }

    fn teardown(&mut self, ctx: &RenderingContext<B>) {
        if let Some(gpu) = self.gpu.take() {
            gpu.buffer.release(ctx.backend());
            gpu.program.release(ctx.backend());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Op, RecordingBackend};
    use crate::render::Topology;

    fn context() -> RenderingContext<RecordingBackend> {
        RenderingContext::new(
            RecordingBackend::new()
                .with_attribute("a_position", 0)
                .with_uniform("u_resolution", 1)
                .with_uniform("u_color", 2),
        )
    }

    fn scene() -> RandomRectsScene<RecordingBackend> {
        RandomRectsScene::new(&AppConfig {
            scene: "random-rects".to_string(),
            ..AppConfig::default()
        })
    }

    #[test]
    fn each_rectangle_gets_one_six_vertex_draw() {
        let ctx = context();
        let mut scene = scene();
        scene.init(&ctx).unwrap();
        scene.render(&ctx, &SurfaceSize::new(640, 480, 1.0));

        let ops = ctx.backend().ops();
        let draws = ops
            .iter()
            .filter(|op| matches!(op, Op::DrawArrays(Topology::Triangles, 0, 6)))
            .count();
        assert_eq!(draws, 50);

        let uploads = ops
            .iter()
            .filter(|op| matches!(op, Op::BufferData(data, BufferUsage::Dynamic) if data.len() == 12))
            .count();
        assert_eq!(uploads, 50);

        scene.teardown(&ctx);
        assert_eq!(ctx.backend().live_objects(), (0, 0, 0));
    }

    #[test]
    fn colors_are_fresh_and_opaque_per_draw() {
        let ctx = context();
        let mut scene = scene();
        scene.init(&ctx).unwrap();
        scene.render(&ctx, &SurfaceSize::new(640, 480, 1.0));

        let colors: Vec<[f32; 4]> = ctx
            .backend()
            .ops()
            .iter()
            .filter_map(|op| match op {
                Op::SetUniformVec4(2, color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors.len(), 50);
        assert!(colors.iter().all(|c| c[3] == 1.0));
        // 50 independent samples collapsing to one color would mean the rng
        // is not advancing.
        assert!(colors.windows(2).any(|pair| pair[0] != pair[1]));

        scene.teardown(&ctx);
    }

    #[test]
    fn fixed_seed_reproduces_the_frame() {
        let surface = SurfaceSize::new(640, 480, 1.0);

        let ctx_a = context();
        let mut scene_a = scene();
        scene_a.init(&ctx_a).unwrap();
        ctx_a.backend().clear_ops();
        scene_a.render(&ctx_a, &surface);

        let ctx_b = context();
        let mut scene_b = scene();
        scene_b.init(&ctx_b).unwrap();
        ctx_b.backend().clear_ops();
        scene_b.render(&ctx_b, &surface);

        assert_eq!(ctx_a.backend().ops(), ctx_b.backend().ops());

        scene_a.teardown(&ctx_a);
        scene_b.teardown(&ctx_b);
    }
}
