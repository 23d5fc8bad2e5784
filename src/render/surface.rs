//! src/render/surface.rs
//! Logical size, device pixel ratio, and the backing-resolution resize
//! policy.

/// Tracks the drawing surface's logical (display) size and the backing
/// resolution derived from it. The backing store must always be
/// `floor(logical * device_pixel_ratio)`; [`SurfaceSize::resize`] re-derives
/// it and reports whether the backing store actually changed, so callers can
/// skip redundant reallocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSize {
    logical: (u32, u32),
    scale_factor: f64,
    backing: (u32, u32),
}

impl SurfaceSize {
    pub fn new(logical_width: u32, logical_height: u32, scale_factor: f64) -> Self {
        let logical = (logical_width, logical_height);
        Self {
            logical,
            scale_factor,
            backing: Self::derive_backing(logical, scale_factor),
        }
    }

    fn derive_backing(logical: (u32, u32), scale_factor: f64) -> (u32, u32) {
        (
            (logical.0 as f64 * scale_factor).floor() as u32,
            (logical.1 as f64 * scale_factor).floor() as u32,
        )
    }

    pub fn set_logical(&mut self, width: u32, height: u32) {
        self.logical = (width, height);
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Recomputes the backing resolution from the current logical size and
    /// scale factor. Returns true when the backing store changed and needs
    /// reallocating.
    pub fn resize(&mut self) -> bool {
        let backing = Self::derive_backing(self.logical, self.scale_factor);
        if backing == self.backing {
            return false;
        }
        self.backing = backing;
        true
    }

    pub fn logical(&self) -> (u32, u32) {
        self.logical
    }

    /// Logical size as f32, the value fed to `u_resolution`.
    pub fn logical_f32(&self) -> [f32; 2] {
        [self.logical.0 as f32, self.logical.1 as f32]
    }

    pub fn backing(&self) -> (u32, u32) {
        self.backing
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }
}
