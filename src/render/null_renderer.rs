use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless backend used by tests and by hosts without a drawing surface.
///
/// It still validates frame content and keeps the last accepted frame so
/// callers can inspect exactly what a real backend would have painted.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    last_frame: Option<RenderFrame>,
}

impl NullRenderer {
    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
