//! src/render/buffer.rs

use std::cell::Cell;

use super::backend::{BufferUsage, RenderBackend};
use super::shader::BuildError;

/// An ordered sequence of f32 coordinate pairs plus the backend buffer that
/// mirrors it. Contents may be rewritten before each draw; the upload to the
/// backend happens lazily when the buffer is next bound.
pub struct GeometryBuffer<B: RenderBackend> {
    handle: B::BufferHandle,
    data: Vec<f32>,
    usage: BufferUsage,
    dirty: Cell<bool>,
}

impl<B: RenderBackend> GeometryBuffer<B> {
    pub fn new(backend: &B, usage: BufferUsage) -> Result<Self, BuildError> {
        let handle = backend
            .create_buffer()
            .map_err(|reason| BuildError::Allocation {
                what: "buffer",
                reason,
            })?;
        Ok(Self {
            handle,
            data: Vec::new(),
            usage,
            dirty: Cell::new(false),
        })
    }

    pub fn with_vertices(
        backend: &B,
        usage: BufferUsage,
        data: impl Into<Vec<f32>>,
    ) -> Result<Self, BuildError> {
        let mut buffer = Self::new(backend, usage)?;
        buffer.set_vertices(data);
        Ok(buffer)
    }

    /// Overwrites the CPU-side contents. The backend copy is refreshed on the
    /// next bind.
    pub fn set_vertices(&mut self, data: impl Into<Vec<f32>>) {
        self.data = data.into();
        self.dirty.set(true);
    }

    pub fn vertices(&self) -> &[f32] {
        &self.data
    }

    /// Number of coordinate pairs currently held.
    pub fn vertex_count(&self) -> usize {
        self.data.len() / 2
    }

    pub fn handle(&self) -> B::BufferHandle {
        self.handle
    }

    /// Binds the buffer to the array-buffer bind point and uploads the
    /// current contents if they changed since the last upload.
    pub fn bind(&self, backend: &B) {
        backend.bind_array_buffer(self.handle);
        if self.dirty.get() {
            backend.array_buffer_data(&self.data, self.usage);
            self.dirty.set(false);
        }
    }

    pub fn release(self, backend: &B) {
        backend.delete_buffer(self.handle);
    }
}
