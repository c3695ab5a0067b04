use crate::snapshot::Snapshot;
use log::info;
use tiny_skia::Pixmap;

/// What the surface looks like once every committed stroke is undone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UndoFloor {
    /// The host's default image value, reported back on undo
    pub value: Option<String>,
    /// The surface content at mount, `None` for a blank surface
    pub raster: Option<Pixmap>,
}

/// Result of a successful undo step
#[derive(Debug, Clone, PartialEq)]
pub struct UndoOutcome {
    /// Content to restore, `None` means blank
    pub raster: Option<Pixmap>,
    /// Value to report to the host
    pub value: Option<String>,
}

/// Linear history of committed surface snapshots, one per stroke
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Snapshot>,
    floor: UndoFloor,
}

impl History {
    /// Creates an empty history whose undo floor is a blank surface
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floor(floor: UndoFloor) -> Self {
        Self {
            entries: Vec::new(),
            floor,
        }
    }

    pub fn set_floor(&mut self, floor: UndoFloor) {
        self.floor = floor;
    }

    pub fn floor(&self) -> &UndoFloor {
        &self.floor
    }

    /// Record the surface right after a stroke commits
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
        info!("📜 History now holds {} entries", self.entries.len());
    }

    /// Remove the last entry and report what the surface should show now.
    ///
    /// Returns `None` on empty history. There is no redo: a removed entry
    /// is gone for good.
    pub fn undo(&mut self) -> Option<UndoOutcome> {
        self.entries.pop()?;

        let outcome = match self.entries.last() {
            Some(previous) => UndoOutcome {
                raster: Some(previous.raster().clone()),
                value: Some(previous.data_url().to_owned()),
            },
            None => UndoOutcome {
                raster: self.floor.raster.clone(),
                value: self.floor.value.clone(),
            },
        };
        info!("↩️ Undo, {} entries remain", self.entries.len());
        Some(outcome)
    }

    /// Returns true if there are entries that can be undone
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    fn snapshot(shade: u8) -> Snapshot {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.fill(Color::from_rgba8(shade, shade, shade, 255));
        Snapshot::capture(&pixmap).unwrap()
    }

    #[test]
    fn test_commit_appends() {
        let mut history = History::new();
        assert!(!history.can_undo());
        history.commit(snapshot(1));
        history.commit(snapshot(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last(), Some(&snapshot(2)));
    }

    #[test]
    fn test_undo_restores_previous_entry() {
        let mut history = History::new();
        history.commit(snapshot(1));
        history.commit(snapshot(2));

        let outcome = history.undo().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(outcome.raster.as_ref(), Some(snapshot(1).raster()));
        assert_eq!(outcome.value.as_deref(), Some(snapshot(1).data_url()));
    }

    #[test]
    fn test_undo_to_blank_floor() {
        let mut history = History::new();
        history.commit(snapshot(1));

        let outcome = history.undo().unwrap();
        assert!(history.is_empty());
        assert_eq!(outcome, UndoOutcome { raster: None, value: None });
    }

    #[test]
    fn test_undo_to_default_image_floor() {
        let floor_snapshot = snapshot(9);
        let mut history = History::with_floor(UndoFloor {
            value: Some("data:image/png;base64,default".to_string()),
            raster: Some(floor_snapshot.raster().clone()),
        });
        history.commit(snapshot(1));

        let outcome = history.undo().unwrap();
        assert_eq!(outcome.value.as_deref(), Some("data:image/png;base64,default"));
        assert_eq!(outcome.raster.as_ref(), Some(floor_snapshot.raster()));
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut history = History::new();
        assert_eq!(history.undo(), None);
        assert_eq!(history.undo(), None);
        assert!(history.is_empty());
    }
}
