//! src/render/testing.rs
//! A recording `RenderBackend` for exercising the build pipeline and frame
//! sequence without a GPU.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::backend::{BufferUsage, RenderBackend, Rgba, ShaderStage, Topology, VertexLayout};

/// Every backend call, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    AttributeLocation(String),
    UniformLocation(String),
    CreateBuffer(u32),
    BindArrayBuffer(u32),
    BufferData(Vec<f32>, BufferUsage),
    DeleteBuffer(u32),
    EnableVertexAttribute(u32),
    VertexAttributeLayout(u32, VertexLayout),
    SetUniformF32(u32, f32),
    SetUniformVec2(u32, [f32; 2]),
    SetUniformVec4(u32, [f32; 4]),
    SetViewport(u32, u32),
    Clear(Rgba),
    DrawArrays(Topology, i32, i32),
}

/// Records every call and tracks object liveness so tests can assert that
/// failure paths release everything they allocated. Handles are issued from a
/// single counter, so creation order is visible in the ops.
pub struct RecordingBackend {
    ops: RefCell<Vec<Op>>,
    next_handle: Cell<u32>,
    shader_stages: RefCell<HashMap<u32, ShaderStage>>,
    live_shaders: RefCell<HashSet<u32>>,
    live_programs: RefCell<HashSet<u32>>,
    live_buffers: RefCell<HashSet<u32>>,
    attributes: HashMap<String, u32>,
    uniforms: HashMap<String, u32>,
    fail_compile: Option<ShaderStage>,
    fail_link: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            ops: RefCell::new(Vec::new()),
            next_handle: Cell::new(0),
            shader_stages: RefCell::new(HashMap::new()),
            live_shaders: RefCell::new(HashSet::new()),
            live_programs: RefCell::new(HashSet::new()),
            live_buffers: RefCell::new(HashSet::new()),
            attributes: HashMap::new(),
            uniforms: HashMap::new(),
            fail_compile: None,
            fail_link: false,
        }
    }

    /// Declares an attribute the linked program exposes.
    pub fn with_attribute(mut self, name: &str, location: u32) -> Self {
        self.attributes.insert(name.to_string(), location);
        self
    }

    /// Declares a uniform the linked program exposes.
    pub fn with_uniform(mut self, name: &str, location: u32) -> Self {
        self.uniforms.insert(name.to_string(), location);
        self
    }

    /// Makes compilation of the given stage fail, as a syntax error would.
    pub fn failing_compile(mut self, stage: ShaderStage) -> Self {
        self.fail_compile = Some(stage);
        self
    }

    /// Makes linking fail, as mismatched stage interfaces would.
    pub fn failing_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    pub fn clear_ops(&self) {
        self.ops.borrow_mut().clear();
    }

    /// (live shaders, live programs, live buffers) still allocated.
    pub fn live_objects(&self) -> (usize, usize, usize) {
        (
            self.live_shaders.borrow().len(),
            self.live_programs.borrow().len(),
            self.live_buffers.borrow().len(),
        )
    }

    /// How many times a uniform location was queried by name.
    pub fn uniform_lookups(&self, name: &str) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, Op::UniformLocation(n) if n == name))
            .count()
    }

    fn record(&self, op: Op) {
        self.ops.borrow_mut().push(op);
    }

    fn issue_handle(&self) -> u32 {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        handle
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for RecordingBackend {
    type ShaderHandle = u32;
    type ProgramHandle = u32;
    type BufferHandle = u32;
    type UniformLocation = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let handle = self.issue_handle();
        self.shader_stages.borrow_mut().insert(handle, stage);
        self.live_shaders.borrow_mut().insert(handle);
        self.record(Op::CreateShader(stage, handle));
        Ok(handle)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.record(Op::ShaderSource(shader, source.to_string()));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Op::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let stage = self.shader_stages.borrow().get(&shader).copied();
        self.fail_compile != stage
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let stage = self.shader_stages.borrow().get(&shader).copied();
        format!("0:1: syntax error in {} shader", stage.unwrap())
    }

    fn delete_shader(&self, shader: u32) {
        self.live_shaders.borrow_mut().remove(&shader);
        self.record(Op::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let handle = self.issue_handle();
        self.live_programs.borrow_mut().insert(handle);
        self.record(Op::CreateProgram(handle));
        Ok(handle)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Op::AttachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Op::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _program: u32) -> String {
        "varying interfaces do not match".to_string()
    }

    fn delete_program(&self, program: u32) {
        self.live_programs.borrow_mut().remove(&program);
        self.record(Op::DeleteProgram(program));
    }

    fn use_program(&self, program: u32) {
        self.record(Op::UseProgram(program));
    }

    fn attribute_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.record(Op::AttributeLocation(name.to_string()));
        self.attributes.get(name).copied()
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.record(Op::UniformLocation(name.to_string()));
        self.uniforms.get(name).copied()
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let handle = self.issue_handle();
        self.live_buffers.borrow_mut().insert(handle);
        self.record(Op::CreateBuffer(handle));
        Ok(handle)
    }

    fn bind_array_buffer(&self, buffer: u32) {
        self.record(Op::BindArrayBuffer(buffer));
    }

    fn array_buffer_data(&self, data: &[f32], usage: BufferUsage) {
        self.record(Op::BufferData(data.to_vec(), usage));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.live_buffers.borrow_mut().remove(&buffer);
        self.record(Op::DeleteBuffer(buffer));
    }

    fn enable_vertex_attribute(&self, location: u32) {
        self.record(Op::EnableVertexAttribute(location));
    }

    fn vertex_attribute_layout(&self, location: u32, layout: VertexLayout) {
        self.record(Op::VertexAttributeLayout(location, layout));
    }

    fn set_uniform_f32(&self, location: &u32, value: f32) {
        self.record(Op::SetUniformF32(*location, value));
    }

    fn set_uniform_vec2(&self, location: &u32, value: [f32; 2]) {
        self.record(Op::SetUniformVec2(*location, value));
    }

    fn set_uniform_vec4(&self, location: &u32, value: [f32; 4]) {
        self.record(Op::SetUniformVec4(*location, value));
    }

    fn set_viewport(&self, width: u32, height: u32) {
        self.record(Op::SetViewport(width, height));
    }

    fn clear(&self, color: Rgba) {
        self.record(Op::Clear(color));
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        self.record(Op::DrawArrays(topology, first, count));
    }
}
