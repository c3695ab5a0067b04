//! The signature pad: pointer events in, painted surface and history out.
//!
//! [`SignaturePad`] owns every piece of mutable state (the stroke in
//! progress, the surface, the history) and exposes the transitions as plain
//! methods, so it can be driven from egui or directly from tests.

use crate::capture::{Capture, Transition};
use crate::config::PadConfig;
use crate::event::{ChangeBus, ChangeEvent, ChangeListener};
use crate::history::{History, UndoFloor};
use crate::input::PointerEvent;
use crate::outline::{OutlineGenerator, StyleConfig};
use crate::point::{Point, PointerSample};
use crate::renderer::Renderer;
use crate::snapshot;
use crate::surface::{Surface, SurfaceSizing};
use egui::{Pos2, Vec2};
use log::{debug, info, warn};
use std::cell::OnceCell;

#[derive(Debug)]
pub struct SignaturePad {
    config: PadConfig,
    sizing: SurfaceSizing,
    surface: Option<Surface>,
    /// On-screen position of the surface's top-left corner
    surface_origin: Option<Pos2>,
    /// Derived once from the surface size, never recomputed
    style: OnceCell<StyleConfig>,
    capture: Capture,
    renderer: Renderer,
    history: History,
    default_image: Option<String>,
    changes: ChangeBus,
    /// Bumped whenever the surface pixels change
    revision: u64,
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new(PadConfig::default())
    }
}

impl SignaturePad {
    pub fn new(config: PadConfig) -> Self {
        Self {
            sizing: SurfaceSizing::new(config.scale_factor),
            surface: None,
            surface_origin: None,
            style: OnceCell::new(),
            capture: Capture::new(config.min_point_distance),
            renderer: Renderer::new(config.ink_color),
            history: History::new(),
            default_image: None,
            changes: ChangeBus::new(),
            revision: 0,
            config,
        }
    }

    /// Use a custom outline generator instead of the freehand one
    pub fn with_outline_generator(mut self, generator: Box<dyn OutlineGenerator>) -> Self {
        self.renderer = Renderer::with_generator(generator, self.config.ink_color);
        self
    }

    /// Pre-existing signature, as a `data:` URL, drawn at mount and used as
    /// the undo floor
    pub fn with_default_image(mut self, data_url: impl Into<String>) -> Self {
        self.default_image = Some(data_url.into());
        self
    }

    /// Register the host's change callback
    pub fn on_change(&self, listener: impl ChangeListener + 'static) {
        self.changes.subscribe(Box::new(listener));
    }

    /// Place the surface on screen.
    ///
    /// The first call sizes the backing store from `display_size` and draws
    /// the default image. Later calls only move the origin; the backing
    /// store keeps its first size.
    pub fn mount(&mut self, origin: Pos2, display_size: Vec2) {
        self.surface_origin = Some(origin);
        if self.sizing.is_resolved() {
            return;
        }

        let Some((width, height)) = self.sizing.resolve(display_size) else {
            return;
        };
        let Some(mut surface) = Surface::new(width, height) else {
            warn!("Could not allocate a {}x{} surface", width, height);
            return;
        };
        info!("🖊️ Mounted {}x{} signature surface", width, height);

        let mut floor = UndoFloor {
            value: self.default_image.clone(),
            raster: None,
        };
        if let Some(default_image) = &self.default_image {
            match snapshot::decode_image(default_image) {
                Ok(image) => {
                    surface.draw_image(&image);
                    floor.raster = Some(surface.raster().clone());
                }
                Err(e) => warn!("Failed to load default image: {}", e),
            }
        }
        self.history.set_floor(floor);

        self.surface = Some(surface);
        self.revision += 1;
    }

    /// Feed one pointer event through the capture state machine
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { sample } => self.press(sample),
            PointerEvent::Enter {
                sample,
                primary_held: true,
            } => self.press(sample),
            PointerEvent::Enter { .. } => {}
            PointerEvent::Move { sample, .. } => self.move_to(sample),
            PointerEvent::Up { sample } => self.release(Some(sample)),
            PointerEvent::Leave { .. } => self.release(None),
        }
    }

    /// Start a stroke and paint its first point
    pub fn press(&mut self, sample: PointerSample) {
        let point = self.to_point(sample);
        if let Transition::Started { restarted: true } = self.capture.press(point) {
            self.renderer.abort();
        }
        self.paint_in_progress();
    }

    /// Extend the stroke if the sample is far enough from the last point
    pub fn move_to(&mut self, sample: PointerSample) {
        let point = self.to_point(sample);
        if self.capture.move_to(point).needs_repaint() {
            self.paint_in_progress();
        }
    }

    /// Finish the stroke. Pointer-up passes its sample as the final point;
    /// pointer-leave passes `None`.
    pub fn release(&mut self, final_sample: Option<PointerSample>) {
        let final_point = final_sample.map(|sample| self.to_point(sample));
        if let Transition::Commit(points) = self.capture.release(final_point) {
            self.commit_stroke(&points);
        }
    }

    /// Remove the last committed stroke and restore the surface before it
    pub fn undo(&mut self) {
        if self.capture.reset() {
            self.renderer.abort();
        }

        let Some(outcome) = self.history.undo() else {
            debug!("Nothing to undo");
            return;
        };

        if let Some(surface) = &mut self.surface {
            match &outcome.raster {
                Some(raster) => surface.restore_raster(raster),
                None => surface.clear(),
            }
            self.revision += 1;
        }

        self.changes.emit(ChangeEvent::Undone {
            data_url: outcome.value,
        });
    }

    /// Blank the surface and drop the stroke in progress. History is kept.
    pub fn clear(&mut self) {
        self.capture.reset();
        self.renderer.abort();
        if let Some(surface) = &mut self.surface {
            surface.clear();
            self.revision += 1;
        }
        info!("🧹 Cleared signature surface");
        self.changes.emit(ChangeEvent::Cleared);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// Points of the stroke in progress
    pub fn points(&self) -> &[Point] {
        self.capture.points()
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_pressed()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Brush style, available once the surface is mounted
    pub fn style(&self) -> Option<StyleConfig> {
        let surface = self.surface.as_ref()?;
        Some(*self.style.get_or_init(|| {
            StyleConfig::for_surface(surface.width(), surface.height(), &self.config)
        }))
    }

    fn to_point(&self, sample: PointerSample) -> Point {
        Point::from_sample_with_default(
            sample,
            self.config.scale_factor,
            self.surface_origin,
            self.config.default_pressure,
        )
    }

    fn paint_in_progress(&mut self) {
        let Some(style) = self.style() else {
            debug!("No surface mounted, skipping paint");
            return;
        };
        let Some(surface) = &mut self.surface else {
            return;
        };
        self.renderer.begin_provisional(surface);
        self.renderer
            .paint_provisional(surface, self.capture.points(), &style);
        self.revision += 1;
    }

    fn commit_stroke(&mut self, points: &[Point]) {
        let Some(style) = self.style() else {
            debug!("No surface mounted, dropping stroke of {} points", points.len());
            self.renderer.abort();
            return;
        };
        let Some(surface) = &mut self.surface else {
            return;
        };

        self.renderer.commit(surface, points, &style);
        self.revision += 1;

        match surface.encode() {
            Ok(snapshot) => {
                let data_url = snapshot.data_url().to_owned();
                self.history.commit(snapshot);
                info!("✅ Committed stroke of {} points", points.len());
                self.changes.emit(ChangeEvent::Committed { data_url });
            }
            Err(e) => warn!("Failed to encode surface: {}", e),
        }
    }
}
