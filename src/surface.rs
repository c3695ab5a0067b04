//! The persistent drawing surface and its one-time sizing.

use crate::error::SnapshotResult;
use crate::snapshot::Snapshot;
use egui::{Pos2, Vec2};
use log::{debug, warn};
use tiny_skia::{
    Color, FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};

/// A raster the pad paints strokes onto
#[derive(Clone, PartialEq)]
pub struct Surface {
    pixmap: Pixmap,
    image_smoothing: bool,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("image_smoothing", &self.image_smoothing)
            .finish()
    }
}

impl Surface {
    /// Creates a blank surface. Returns `None` for a zero-sized backing store.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self {
            pixmap,
            image_smoothing: true,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn set_image_smoothing(&mut self, enabled: bool) {
        self.image_smoothing = enabled;
    }

    pub fn image_smoothing(&self) -> bool {
        self.image_smoothing
    }

    /// Fill a closed polygon. Degenerate polygons paint nothing and return false.
    pub fn fill_polygon(&mut self, polygon: &[Pos2], color: Color) -> bool {
        let [first, rest @ ..] = polygon else {
            return false;
        };
        if rest.len() < 2 {
            return false;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for p in rest {
            pb.line_to(p.x, p.y);
        }
        pb.close();

        let Some(path) = pb.finish() else {
            return false;
        };

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = self.image_smoothing;
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        true
    }

    /// Wipe every pixel to transparent
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    pub fn raster(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Replace the surface content with a previously saved raster
    pub fn restore_raster(&mut self, raster: &Pixmap) {
        if raster.width() == self.width() && raster.height() == self.height() {
            self.pixmap.data_mut().copy_from_slice(raster.data());
        } else {
            warn!(
                "Restoring {}x{} raster onto {}x{} surface, rescaling",
                raster.width(),
                raster.height(),
                self.width(),
                self.height()
            );
            self.clear();
            self.draw_image(raster);
        }
    }

    /// Draw an image stretched over the whole surface
    pub fn draw_image(&mut self, image: &Pixmap) {
        let sx = self.width() as f32 / image.width() as f32;
        let sy = self.height() as f32 / image.height() as f32;
        let paint = PixmapPaint {
            quality: if self.image_smoothing {
                FilterQuality::Bicubic
            } else {
                FilterQuality::Nearest
            },
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            image.as_ref(),
            &paint,
            Transform::from_scale(sx, sy),
            None,
        );
    }

    /// Export the current content as an encoded snapshot
    pub fn encode(&self) -> SnapshotResult<Snapshot> {
        Snapshot::capture(&self.pixmap)
    }

    /// Convert to an egui image for display
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_premultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixmap.data(),
        )
    }
}

/// Reconciles the backing resolution with the displayed size, once per mount
#[derive(Debug, Clone)]
pub struct SurfaceSizing {
    scale_factor: f32,
    resolved: Option<Option<(u32, u32)>>,
}

impl SurfaceSizing {
    pub fn new(scale_factor: f32) -> Self {
        Self {
            scale_factor,
            resolved: None,
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Backing size for a surface displayed at `display_size`.
    ///
    /// Only the first call computes anything; later calls return the first
    /// result even if the display size changed.
    pub fn resolve(&mut self, display_size: Vec2) -> Option<(u32, u32)> {
        if let Some(size) = self.resolved {
            debug!("Surface already sized to {:?}, ignoring {:?}", size, display_size);
            return size;
        }

        let width = (display_size.x * self.scale_factor).ceil();
        let height = (display_size.y * self.scale_factor).ceil();
        let size = if width >= 1.0 && height >= 1.0 && width.is_finite() && height.is_finite() {
            Some((width as u32, height as u32))
        } else {
            warn!("Cannot size surface for display size {:?}", display_size);
            None
        };

        self.resolved = Some(size);
        size
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}
