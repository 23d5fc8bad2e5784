//! src/render/shader.rs
//! Shader program build pipeline: source retrieval, compile, link,
//! location introspection.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use super::backend::{RenderBackend, ShaderStage};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{stage} shader compilation failed: {log}")]
    CompileFailed { stage: ShaderStage, log: String },
    #[error("program linking failed: {log}")]
    LinkFailed { log: String },
    #[error("failed to read shader source {}: {source}", path.display())]
    SourceFetch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("backend refused to allocate {what}: {reason}")]
    Allocation { what: &'static str, reason: String },
}

/// A shader stage's source text. Immutable once read.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    stage: ShaderStage,
    text: String,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }

    /// Reads the source from disk. A read failure is fatal for the build
    /// attempt it was meant for.
    pub fn from_file(stage: ShaderStage, path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BuildError::SourceFetch {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { stage, text })
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Named attribute slot. `location` is `None` when the program does not
/// declare the attribute; drawing with an unresolved binding is a programming
/// error and the draw step skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBinding {
    location: Option<u32>,
}

impl AttributeBinding {
    pub fn location(&self) -> Option<u32> {
        self.location
    }

    pub fn is_resolved(&self) -> bool {
        self.location.is_some()
    }
}

/// Named uniform slot, same resolution contract as [`AttributeBinding`].
pub struct UniformBinding<B: RenderBackend> {
    location: Option<B::UniformLocation>,
}

// Derives would demand the bounds on the backend itself rather than on its
// location type, so these are spelled out.
impl<B: RenderBackend> Clone for UniformBinding<B> {
    fn clone(&self) -> Self {
        Self {
            location: self.location.clone(),
        }
    }
}

impl<B: RenderBackend> PartialEq for UniformBinding<B> {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl<B: RenderBackend> std::fmt::Debug for UniformBinding<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniformBinding")
            .field("location", &self.location)
            .finish()
    }
}

impl<B: RenderBackend> UniformBinding<B> {
    pub fn location(&self) -> Option<&B::UniformLocation> {
        self.location.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.location.is_some()
    }
}

/// A fully linked, usable shader program. Both stage handles are kept so the
/// explicit teardown path can release everything it owns; nothing here is
/// dropped implicitly.
pub struct LinkedProgram<B: RenderBackend> {
    program: B::ProgramHandle,
    vertex: B::ShaderHandle,
    fragment: B::ShaderHandle,
    attributes: HashMap<String, AttributeBinding>,
    uniforms: HashMap<String, UniformBinding<B>>,
}

// Derives would demand the bounds on the backend itself rather than on its
// handle types, so this is spelled out like the bindings above.
impl<B: RenderBackend> std::fmt::Debug for LinkedProgram<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedProgram")
            .field("program", &self.program)
            .field("vertex", &self.vertex)
            .field("fragment", &self.fragment)
            .field("attributes", &self.attributes)
            .field("uniforms", &self.uniforms)
            .finish()
    }
}

impl<B: RenderBackend> LinkedProgram<B> {
    pub fn handle(&self) -> B::ProgramHandle {
        self.program
    }

    /// Resolves an attribute location by name. Each name is queried against
    /// the backend exactly once and cached for the program's lifetime.
    pub fn attribute(&mut self, backend: &B, name: &str) -> AttributeBinding {
        if let Some(binding) = self.attributes.get(name) {
            return *binding;
        }
        let location = backend.attribute_location(self.program, name);
        if location.is_none() {
            warn!("attribute '{}' not found in program", name);
        }
        let binding = AttributeBinding { location };
        self.attributes.insert(name.to_string(), binding);
        binding
    }

    /// Resolves a uniform location by name, cached like [`Self::attribute`].
    pub fn uniform(&mut self, backend: &B, name: &str) -> UniformBinding<B> {
        if let Some(binding) = self.uniforms.get(name) {
            return binding.clone();
        }
        let location = backend.uniform_location(self.program, name);
        if location.is_none() {
            warn!("uniform '{}' not found in program", name);
        }
        let binding = UniformBinding { location };
        self.uniforms.insert(name.to_string(), binding.clone());
        binding
    }

    /// Deletes the program and both stage objects.
    pub fn release(self, backend: &B) {
        backend.delete_program(self.program);
        backend.delete_shader(self.vertex);
        backend.delete_shader(self.fragment);
    }
}

/// Compiles a vertex/fragment pair and links them into a [`LinkedProgram`].
/// Every failure path releases the backend objects allocated for that
/// attempt; a `LinkedProgram` is either fully usable or never returned.
pub struct ProgramBuilder;

impl ProgramBuilder {
    pub fn build<B: RenderBackend>(
        backend: &B,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<LinkedProgram<B>, BuildError> {
        let vs = Self::compile(backend, vertex)?;
        let fs = match Self::compile(backend, fragment) {
            Ok(fs) => fs,
            Err(err) => {
                backend.delete_shader(vs);
                return Err(err);
            }
        };

        let program = match backend.create_program() {
            Ok(program) => program,
            Err(reason) => {
                backend.delete_shader(vs);
                backend.delete_shader(fs);
                return Err(BuildError::Allocation {
                    what: "program",
                    reason,
                });
            }
        };

        backend.attach_shader(program, vs);
        backend.attach_shader(program, fs);
        backend.link_program(program);

        if !backend.program_link_status(program) {
            let log = backend.program_info_log(program);
            backend.delete_program(program);
            backend.delete_shader(vs);
            backend.delete_shader(fs);
            return Err(BuildError::LinkFailed { log });
        }

        Ok(LinkedProgram {
            program,
            vertex: vs,
            fragment: fs,
            attributes: HashMap::new(),
            uniforms: HashMap::new(),
        })
    }

    fn compile<B: RenderBackend>(
        backend: &B,
        source: &ShaderSource,
    ) -> Result<B::ShaderHandle, BuildError> {
        let stage = source.stage();
        let shader = backend
            .create_shader(stage)
            .map_err(|reason| BuildError::Allocation {
                what: "shader",
                reason,
            })?;
        backend.shader_source(shader, source.text());
        backend.compile_shader(shader);

        if !backend.shader_compile_status(shader) {
            let log = backend.shader_info_log(shader);
            backend.delete_shader(shader);
            return Err(BuildError::CompileFailed { stage, log });
        }

        Ok(shader)
    }
}
