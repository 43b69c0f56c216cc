use obsidian_core::{BarEvent, Result};
use obsidian_theme::Color;

/// Axis-aligned rectangle in bar-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Vertical font metrics, in pixels above/below the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontMetrics {
    pub ascent: i32,
    pub descent: i32,
}

/// The drawing primitives a frame needs.
///
/// Implemented by the display backend; the layout and redraw code never
/// touch the display directly.
pub trait Canvas {
    /// Current width of the bar surface.
    fn bar_width(&self) -> i32;

    fn font_metrics(&self) -> FontMetrics;

    /// Advance width of `text` in the bar font.
    fn measure_text(&mut self, text: &str) -> Result<i32>;

    fn fill_rectangle(&mut self, rect: Rect, color: Color) -> Result<()>;

    /// Draw `text` with its baseline starting at (`x`, `y`).
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) -> Result<()>;

    /// Push everything drawn so far to the screen.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A canvas that also owns the display resources behind it.
pub trait Backend: Canvas {
    /// Return every pending display event without blocking.
    fn drain_events(&mut self) -> Result<Vec<BarEvent>>;

    /// Release all display resources, in reverse order of acquisition.
    fn release(self) -> Result<()>
    where
        Self: Sized;
}
