//! src/render/context.rs

use super::backend::RenderBackend;

/// Explicitly constructed owner of the graphics backend. Replaces the
/// page-load-scoped globals of the original examples: everything that talks
/// to the backend receives this by reference, and `teardown` ends the
/// backend's lifetime after scene-owned objects have been released.
pub struct RenderingContext<B: RenderBackend> {
    backend: B,
}

impl<B: RenderBackend> RenderingContext<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the context, releasing backend-level state. Objects owned by
    /// scenes (programs, buffers) must have been released through their own
    /// teardown first.
    pub fn teardown(self) {
        drop(self.backend);
    }
}
