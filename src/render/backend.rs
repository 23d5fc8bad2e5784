//! src/render/backend.rs
//! The graphics capability surface the renderer runs against.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two programmable pipeline stages compiled and linked together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Usage hint handed to the backend when uploading vertex data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times.
    Static,
    /// Rewritten between draws.
    Dynamic,
}

/// Primitive topology for a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// How an attribute pulls its data out of the bound buffer. The element type
/// is always f32; missing components fall back to the default attribute fill
/// (z = 0, w = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    pub components: i32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self {
            components: 2,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Everything the shader build pipeline and the frame renderer need from a
/// graphics backend. `GlowBackend` implements it over a live GL context; the
/// test suite implements it with a recorder.
///
/// Buffer and program state behave like GL bind points: `bind_array_buffer`
/// and `use_program` set hidden globals that later calls read implicitly.
pub trait RenderBackend {
    type ShaderHandle: Copy + PartialEq + fmt::Debug;
    type ProgramHandle: Copy + PartialEq + fmt::Debug;
    type BufferHandle: Copy + PartialEq + fmt::Debug;
    type UniformLocation: Clone + PartialEq + fmt::Debug;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::ShaderHandle, String>;
    fn shader_source(&self, shader: Self::ShaderHandle, source: &str);
    fn compile_shader(&self, shader: Self::ShaderHandle);
    fn shader_compile_status(&self, shader: Self::ShaderHandle) -> bool;
    fn shader_info_log(&self, shader: Self::ShaderHandle) -> String;
    fn delete_shader(&self, shader: Self::ShaderHandle);

    fn create_program(&self) -> Result<Self::ProgramHandle, String>;
    fn attach_shader(&self, program: Self::ProgramHandle, shader: Self::ShaderHandle);
    fn link_program(&self, program: Self::ProgramHandle);
    fn program_link_status(&self, program: Self::ProgramHandle) -> bool;
    fn program_info_log(&self, program: Self::ProgramHandle) -> String;
    fn delete_program(&self, program: Self::ProgramHandle);
    fn use_program(&self, program: Self::ProgramHandle);

    fn attribute_location(&self, program: Self::ProgramHandle, name: &str) -> Option<u32>;
    fn uniform_location(
        &self,
        program: Self::ProgramHandle,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    fn create_buffer(&self) -> Result<Self::BufferHandle, String>;
    fn bind_array_buffer(&self, buffer: Self::BufferHandle);
    /// Uploads to whatever buffer is currently bound to the array-buffer
    /// bind point.
    fn array_buffer_data(&self, data: &[f32], usage: BufferUsage);
    fn delete_buffer(&self, buffer: Self::BufferHandle);

    fn enable_vertex_attribute(&self, location: u32);
    /// Captures the currently bound array buffer for `location`; re-binding
    /// afterwards does not affect a layout already described.
    fn vertex_attribute_layout(&self, location: u32, layout: VertexLayout);

    fn set_uniform_f32(&self, location: &Self::UniformLocation, value: f32);
    fn set_uniform_vec2(&self, location: &Self::UniformLocation, value: [f32; 2]);
    fn set_uniform_vec4(&self, location: &Self::UniformLocation, value: [f32; 4]);

    fn set_viewport(&self, width: u32, height: u32);
    fn clear(&self, color: Rgba);
    fn draw_arrays(&self, topology: Topology, first: i32, count: i32);
}
