//! src/render/frame.rs
//! The fixed per-frame draw sequence.

use glam::{Vec2, Vec4};

use super::backend::{RenderBackend, Rgba, Topology, VertexLayout};
use super::buffer::GeometryBuffer;
use super::shader::{AttributeBinding, LinkedProgram, UniformBinding};
use super::surface::SurfaceSize;

/// A vector-valued uniform to set on the active program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    F32(f32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::F32(value)
    }
}

impl From<Vec2> for UniformValue {
    fn from(value: Vec2) -> Self {
        UniformValue::Vec2(value.to_array())
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value.to_array())
    }
}

impl From<Rgba> for UniformValue {
    fn from(color: Rgba) -> Self {
        UniformValue::Vec4([color.r, color.g, color.b, color.a])
    }
}

/// Topology, starting vertex, vertex count. A value triple with no
/// persistent identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub topology: Topology,
    pub first: i32,
    pub count: i32,
}

impl DrawCall {
    pub fn triangles(count: i32) -> Self {
        Self {
            topology: Topology::Triangles,
            first: 0,
            count,
        }
    }
}

/// One draw's worth of state: the buffer to pull vertices from, the attribute
/// that reads them, the uniforms to set immediately before the call, and the
/// call itself.
pub struct DrawSpec<'a, B: RenderBackend> {
    pub buffer: &'a GeometryBuffer<B>,
    pub attribute: AttributeBinding,
    pub layout: VertexLayout,
    pub uniforms: Vec<(UniformBinding<B>, UniformValue)>,
    pub call: DrawCall,
}

/// Executes the strictly ordered frame sequence: viewport from the current
/// backing resolution, clear, activate program, then per draw: uniforms,
/// buffer bind/upload, vertex layout, draw call.
///
/// The layout step captures whatever buffer was bound immediately before it;
/// binding a different buffer afterwards does not retroactively change a
/// layout already described. Uniform state is global to the active program,
/// not per-draw scoped, so every draw sets its own values.
pub struct FrameRenderer<'a, B: RenderBackend> {
    backend: &'a B,
}

impl<'a, B: RenderBackend> FrameRenderer<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Viewport, clear, program activation. The viewport is derived from the
    /// surface's post-resize backing resolution, never a cached value.
    pub fn begin_frame(&self, program: &LinkedProgram<B>, surface: &SurfaceSize, clear: Rgba) {
        let (width, height) = surface.backing();
        self.backend.set_viewport(width, height);
        self.backend.clear(clear);
        self.backend.use_program(program.handle());
    }

    /// One draw against the active program.
    pub fn draw(&self, spec: &DrawSpec<'_, B>) {
        for (binding, value) in &spec.uniforms {
            let Some(location) = binding.location() else {
                continue;
            };
            match value {
                UniformValue::F32(v) => self.backend.set_uniform_f32(location, *v),
                UniformValue::Vec2(v) => self.backend.set_uniform_vec2(location, *v),
                UniformValue::Vec4(v) => self.backend.set_uniform_vec4(location, *v),
            }
        }

        spec.buffer.bind(self.backend);

        if let Some(location) = spec.attribute.location() {
            self.backend.enable_vertex_attribute(location);
            self.backend.vertex_attribute_layout(location, spec.layout);
        }

        self.backend
            .draw_arrays(spec.call.topology, spec.call.first, spec.call.count);
    }

    /// The whole frame in one call.
    pub fn draw_frame(
        &self,
        program: &LinkedProgram<B>,
        surface: &SurfaceSize,
        clear: Rgba,
        draws: &[DrawSpec<'_, B>],
    ) {
        self.begin_frame(program, surface, clear);
        for spec in draws {
            self.draw(spec);
        }
    }
}
