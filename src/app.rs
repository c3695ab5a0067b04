use crate::config::PadConfig;
use crate::input::InputHandler;
use crate::pad::SignaturePad;
use egui::{Color32, Pos2, Rect, TextureHandle, TextureOptions};
use std::cell::RefCell;
use std::rc::Rc;

/// Value most recently reported by the pad, waiting to be picked up
type PendingValue = Rc<RefCell<Option<Option<String>>>>;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SignatureApp {
    config: PadConfig,
    /// Last signature reported by the pad, drawn as the default image on the next launch
    signature: Option<String>,

    #[serde(skip)]
    pad: Option<SignaturePad>,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    texture: Option<TextureHandle>,
    #[serde(skip)]
    texture_revision: u64,
    #[serde(skip)]
    pending: PendingValue,
}

impl SignatureApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<PadConfig>) -> Self {
        // Load previous app state (if any).
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        if let Some(config) = config {
            app.config = config;
        }
        app
    }

    /// The current signature as a `data:` URL, `None` when blank
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    fn build_pad(&self) -> SignaturePad {
        let mut pad = SignaturePad::new(self.config.clone());
        if let Some(signature) = &self.signature {
            pad = pad.with_default_image(signature.clone());
        }

        let pending = Rc::clone(&self.pending);
        pad.on_change(move |value: Option<&str>| {
            *pending.borrow_mut() = Some(value.map(str::to_owned));
        });
        pad
    }

    fn upload_texture(&mut self, ctx: &egui::Context) {
        let Some(pad) = &self.pad else {
            return;
        };
        let Some(surface) = pad.surface() else {
            return;
        };
        if self.texture.is_some() && self.texture_revision == pad.revision() {
            return;
        }

        let image = surface.to_color_image();
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("signature", image, TextureOptions::LINEAR));
            }
        }
        self.texture_revision = pad.revision();
    }
}

impl eframe::App for SignatureApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.pad.is_none() {
            self.pad = Some(self.build_pad());
        }

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(pad) = &mut self.pad {
                    // Undo is only offered while there is something to undo
                    if pad.can_undo() && ui.button("Undo").clicked() {
                        pad.undo();
                    }
                    if ui.button("Clear").clicked() {
                        pad.clear();
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Sign here");

            // Sense drags so egui doesn't treat strokes as panel gestures
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;

            if let Some(pad) = &mut self.pad {
                pad.mount(rect.min, rect.size());
                for event in self.input.process_input(ctx, rect) {
                    pad.handle_event(event);
                }
            }

            painter.rect_filled(rect, 0.0, Color32::WHITE);
            if let Some(texture) = &self.texture {
                painter.image(
                    texture.id(),
                    rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
        });

        self.upload_texture(ctx);
        if self.pad.as_ref().is_some_and(|pad| pad.is_drawing()) {
            ctx.request_repaint();
        }

        if let Some(value) = self.pending.borrow_mut().take() {
            self.signature = value;
        }
    }
}
