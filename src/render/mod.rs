pub mod backend;
pub mod buffer;
pub mod context;
pub mod frame;
pub mod glow_backend;
pub mod shader;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{BufferUsage, RenderBackend, Rgba, ShaderStage, Topology, VertexLayout};
pub use buffer::GeometryBuffer;
pub use context::RenderingContext;
pub use frame::{DrawCall, DrawSpec, FrameRenderer, UniformValue};
pub use glow_backend::GlowBackend;
pub use shader::{
    AttributeBinding, BuildError, LinkedProgram, ProgramBuilder, ShaderSource, UniformBinding,
};
pub use surface::SurfaceSize;
