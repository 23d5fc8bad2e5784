pub mod config;
pub mod geometry;
pub mod render;
pub mod scene;

// Re-export commonly used types
pub use config::AppConfig;
pub use render::backend::{BufferUsage, RenderBackend, Rgba, ShaderStage, Topology, VertexLayout};
pub use render::buffer::GeometryBuffer;
pub use render::context::RenderingContext;
pub use render::frame::{DrawCall, DrawSpec, FrameRenderer, UniformValue};
pub use render::glow_backend::GlowBackend;
pub use render::shader::{
    AttributeBinding, BuildError, LinkedProgram, ProgramBuilder, ShaderSource, UniformBinding,
};
pub use render::surface::SurfaceSize;
pub use scene::Scene;
