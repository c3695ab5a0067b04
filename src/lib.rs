#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod capture;
pub mod config;
pub mod error;
pub mod event;
pub mod history;
pub mod input;
pub mod outline;
pub mod pad;
pub mod point;
pub mod renderer;
pub mod snapshot;
pub mod surface;

pub use app::SignatureApp;
pub use capture::{Capture, CaptureState, Transition};
pub use config::{ConfigError, PadConfig};
pub use error::SnapshotError;
pub use event::{ChangeBus, ChangeEvent, ChangeListener};
pub use history::{History, UndoFloor, UndoOutcome};
pub use input::{InputHandler, PointerEvent, PointerFrame};
pub use outline::{FreehandOutline, OutlineGenerator, StyleConfig};
pub use pad::SignaturePad;
pub use point::{Point, PointerSample, DEFAULT_PRESSURE};
pub use renderer::Renderer;
pub use snapshot::Snapshot;
pub use surface::{Surface, SurfaceSizing};
