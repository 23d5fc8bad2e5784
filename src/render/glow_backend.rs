//! src/render/glow_backend.rs
//! `RenderBackend` over a live OpenGL context via glow.

use glow::HasContext;

use super::backend::{BufferUsage, RenderBackend, Rgba, ShaderStage, Topology, VertexLayout};

fn stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn usage_to_gl(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Static => glow::STATIC_DRAW,
        BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
    }
}

fn topology_to_gl(topology: Topology) -> u32 {
    match topology {
        Topology::Triangles => glow::TRIANGLES,
        Topology::TriangleStrip => glow::TRIANGLE_STRIP,
        Topology::TriangleFan => glow::TRIANGLE_FAN,
    }
}

/// Owns the glow context plus the single vertex array object a core profile
/// requires before any attribute layout can be described. The VAO stays bound
/// for the backend's whole lifetime.
pub struct GlowBackend {
    gl: glow::Context,
    vao: glow::VertexArray,
}

impl GlowBackend {
    pub fn new(gl: glow::Context) -> Result<Self, String> {
        let vao = unsafe { gl.create_vertex_array()? };
        unsafe {
            gl.bind_vertex_array(Some(vao));
        }
        Ok(Self { gl, vao })
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

impl Drop for GlowBackend {
    fn drop(&mut self) {
        unsafe {
            self.gl.bind_vertex_array(None);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

impl RenderBackend for GlowBackend {
    type ShaderHandle = glow::Shader;
    type ProgramHandle = glow::Program;
    type BufferHandle = glow::Buffer;
    type UniformLocation = glow::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader, String> {
        unsafe { self.gl.create_shader(stage_to_gl(stage)) }
    }

    fn shader_source(&self, shader: glow::Shader, source: &str) {
        unsafe {
            self.gl.shader_source(shader, source);
        }
    }

    fn compile_shader(&self, shader: glow::Shader) {
        unsafe {
            self.gl.compile_shader(shader);
        }
    }

    fn shader_compile_status(&self, shader: glow::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe {
            self.gl.delete_shader(shader);
        }
    }

    fn create_program(&self) -> Result<glow::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe {
            self.gl.attach_shader(program, shader);
        }
    }

    fn link_program(&self, program: glow::Program) {
        unsafe {
            self.gl.link_program(program);
        }
    }

    fn program_link_status(&self, program: glow::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe {
            self.gl.delete_program(program);
        }
    }

    fn use_program(&self, program: glow::Program) {
        unsafe {
            self.gl.use_program(Some(program));
        }
    }

    fn attribute_location(&self, program: glow::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: glow::Program, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn create_buffer(&self) -> Result<glow::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn bind_array_buffer(&self, buffer: glow::Buffer) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        }
    }

    fn array_buffer_data(&self, data: &[f32], usage: BufferUsage) {
        unsafe {
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                usage_to_gl(usage),
            );
        }
    }

    fn delete_buffer(&self, buffer: glow::Buffer) {
        unsafe {
            self.gl.delete_buffer(buffer);
        }
    }

    fn enable_vertex_attribute(&self, location: u32) {
        unsafe {
            self.gl.enable_vertex_attrib_array(location);
        }
    }

    fn vertex_attribute_layout(&self, location: u32, layout: VertexLayout) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                location,
                layout.components,
                glow::FLOAT,
                layout.normalized,
                layout.stride,
                layout.offset,
            );
        }
    }

    fn set_uniform_f32(&self, location: &glow::UniformLocation, value: f32) {
        unsafe {
            self.gl.uniform_1_f32(Some(location), value);
        }
    }

    fn set_uniform_vec2(&self, location: &glow::UniformLocation, value: [f32; 2]) {
        unsafe {
            self.gl.uniform_2_f32(Some(location), value[0], value[1]);
        }
    }

    fn set_uniform_vec4(&self, location: &glow::UniformLocation, value: [f32; 4]) {
        unsafe {
            self.gl
                .uniform_4_f32(Some(location), value[0], value[1], value[2], value[3]);
        }
    }

    fn set_viewport(&self, width: u32, height: u32) {
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    fn clear(&self, color: Rgba) {
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        unsafe {
            self.gl.draw_arrays(topology_to_gl(topology), first, count);
        }
    }
}
