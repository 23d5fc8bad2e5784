pub mod random_rects;
pub mod rectangle;
pub mod triangle;

pub use random_rects::RandomRectsScene;
pub use rectangle::RectangleScene;
pub use triangle::TriangleScene;

use crate::config::AppConfig;
use crate::render::{BuildError, RenderBackend, RenderingContext, SurfaceSize};

/// One example variant. `init` builds the scene's program and buffers,
/// `render` draws a full frame, `teardown` releases everything `init`
/// allocated. Rendering before `init` or after `teardown` draws nothing.
pub trait Scene<B: RenderBackend> {
    fn name(&self) -> &'static str;
    fn init(&mut self, ctx: &RenderingContext<B>) -> Result<(), BuildError>;
    fn render(&mut self, ctx: &RenderingContext<B>, surface: &SurfaceSize);
    fn teardown(&mut self, ctx: &RenderingContext<B>);
}

/// Looks a scene up by its config name.
pub fn by_name<B: RenderBackend + 'static>(name: &str, config: &AppConfig) -> Option<Box<dyn Scene<B>>> {
    match name {
        "triangle" => Some(Box::new(TriangleScene::new(config))),
        "rectangle" => Some(Box::new(RectangleScene::new(config))),
        "random-rects" | "random_rects" => Some(Box::new(RandomRectsScene::new(config))),
        _ => None,
    }
}

/// Names accepted by [`by_name`], for error reporting.
pub const SCENE_NAMES: &[&str] = &["triangle", "rectangle", "random-rects"];
