//! src/config.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::render::Rgba;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logical window size in device-independent pixels.
    pub window_width: u32,
    pub window_height: u32,
    /// Which scene to run: "triangle", "rectangle", or "random-rects".
    pub scene: String,
    pub clear_color: Rgba,
    /// Seed for the random-rectangles scene.
    pub seed: u64,
    /// How many rectangles the random-rectangles scene draws per frame.
    pub rect_count: u32,
    pub shader_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            scene: "triangle".to_string(),
            clear_color: Rgba::TRANSPARENT,
            seed: 12345,
            rect_count: 50,
            shader_dir: PathBuf::from("assets/shaders"),
        }
    }
}

impl AppConfig {
    /// Loads the config file, or falls back to defaults when it does not
    /// exist. A file that exists but fails to parse is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }
}
