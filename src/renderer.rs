// src/renderer.rs
use crate::outline::{FreehandOutline, OutlineGenerator, StyleConfig};
use crate::point::Point;
use crate::surface::Surface;
use log::debug;
use tiny_skia::{Color, Pixmap};

/// Paints stroke outlines onto the drawing surface.
///
/// Strokes in progress are painted provisionally: the committed raster is
/// saved when a stroke begins and restored before every repaint, so each
/// move redraws the whole stroke on top of committed content instead of
/// stacking overlapping fills.
pub struct Renderer {
    generator: Box<dyn OutlineGenerator>,
    ink_color: Color,
    /// Committed content underneath the stroke in progress
    baseline: Option<Pixmap>,
}

// Custom Debug implementation since the generator is a trait object
impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("ink_color", &self.ink_color)
            .field("provisional", &self.baseline.is_some())
            .finish()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new([0, 0, 0, 255])
    }
}

impl Renderer {
    /// Creates a renderer using the freehand outline generator
    ///
    /// Args:
    ///     ink_color ([u8; 4]): Unmultiplied RGBA ink color
    pub fn new(ink_color: [u8; 4]) -> Self {
        Self::with_generator(Box::new(FreehandOutline::new()), ink_color)
    }

    pub fn with_generator(generator: Box<dyn OutlineGenerator>, ink_color: [u8; 4]) -> Self {
        let [r, g, b, a] = ink_color;
        Self {
            generator,
            ink_color: Color::from_rgba8(r, g, b, a),
            baseline: None,
        }
    }

    pub fn ink_color(&self) -> Color {
        self.ink_color
    }

    pub fn set_ink_color(&mut self, color: Color) {
        self.ink_color = color;
    }

    /// True while a stroke has been painted but not committed
    pub fn is_provisional(&self) -> bool {
        self.baseline.is_some()
    }

    /// Save the committed content before the first fill of a stroke
    pub fn begin_provisional(&mut self, surface: &Surface) {
        if self.baseline.is_none() {
            self.baseline = Some(surface.raster().clone());
        }
    }

    /// Repaint the whole in-progress stroke over the committed content
    ///
    /// Returns:
    ///     bool: True if anything was filled
    pub fn paint_provisional(
        &mut self,
        surface: &mut Surface,
        points: &[Point],
        style: &StyleConfig,
    ) -> bool {
        match &self.baseline {
            Some(baseline) => surface.restore_raster(baseline),
            None => self.baseline = Some(surface.raster().clone()),
        }
        self.fill(surface, points, style)
    }

    /// Paint the final stroke and make it part of the committed content
    pub fn commit(&mut self, surface: &mut Surface, points: &[Point], style: &StyleConfig) -> bool {
        if let Some(baseline) = self.baseline.take() {
            surface.restore_raster(&baseline);
        }
        let painted = self.fill(surface, points, style);
        debug!("Committed stroke of {} points (painted: {})", points.len(), painted);
        painted
    }

    /// Forget the saved baseline without restoring it.
    ///
    /// Provisional pixels already on the surface stay visible until they are
    /// overdrawn or cleared.
    pub fn abort(&mut self) {
        if self.baseline.take().is_some() {
            debug!("Abandoned provisional stroke");
        }
    }

    fn fill(&self, surface: &mut Surface, points: &[Point], style: &StyleConfig) -> bool {
        let polygon = self.generator.outline(points, style);
        if polygon.is_empty() {
            return false;
        }
        surface.fill_polygon(&polygon, self.ink_color)
    }
}
