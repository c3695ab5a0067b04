use crate::point::Point;
use log::debug;

/// Interaction lifecycle of the pad
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CaptureState {
    #[default]
    Idle,
    /// A stroke is in progress; never empty
    Pressed { points: Vec<Point> },
}

/// What the caller should do after feeding a sample to [`Capture`]
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A new stroke began with one point. `restarted` is set when a stroke
    /// was already in progress and has been abandoned.
    Started { restarted: bool },
    /// A point was appended; repaint the whole stroke
    Extended,
    /// The stroke finished with these points; paint and commit them
    Commit(Vec<Point>),
    /// The sample was dropped
    Ignored,
}

impl Transition {
    /// True if the stroke in progress should be repainted
    pub fn needs_repaint(&self) -> bool {
        matches!(self, Self::Started { .. } | Self::Extended)
    }
}

/// Accumulates the stroke in progress and filters incoming samples
#[derive(Debug, Clone)]
pub struct Capture {
    state: CaptureState,
    min_distance: f32,
}

impl Capture {
    /// Creates an idle capture that accepts move samples farther than
    /// `min_distance` from the last accepted point
    pub fn new(min_distance: f32) -> Self {
        Self {
            state: CaptureState::Idle,
            min_distance,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.state, CaptureState::Pressed { .. })
    }

    /// Points of the stroke in progress, empty when idle
    pub fn points(&self) -> &[Point] {
        match &self.state {
            CaptureState::Pressed { points } => points,
            CaptureState::Idle => &[],
        }
    }

    /// Pointer went down (or entered with the primary button held)
    pub fn press(&mut self, point: Point) -> Transition {
        let restarted = self.is_pressed();
        if restarted {
            debug!("Press while already pressed, restarting stroke");
        }
        self.state = CaptureState::Pressed {
            points: vec![point],
        };
        Transition::Started { restarted }
    }

    /// Pointer moved; the sample is kept only if it is far enough from the
    /// last accepted point
    pub fn move_to(&mut self, point: Point) -> Transition {
        let CaptureState::Pressed { points } = &mut self.state else {
            return Transition::Ignored;
        };

        let far_enough = points
            .last()
            .is_none_or(|last| last.distance_to(&point) > self.min_distance);
        if !far_enough {
            return Transition::Ignored;
        }

        points.push(point);
        Transition::Extended
    }

    /// Pointer released or left the surface. `final_point` is appended
    /// before the stroke is handed back; the sequence is cleared either way.
    /// Releasing with no stroke in progress has nothing to commit.
    pub fn release(&mut self, final_point: Option<Point>) -> Transition {
        match std::mem::take(&mut self.state) {
            CaptureState::Pressed { mut points } => {
                points.extend(final_point);
                Transition::Commit(points)
            }
            CaptureState::Idle => Transition::Ignored,
        }
    }

    /// Drop the stroke in progress. Returns true if there was one.
    pub fn reset(&mut self) -> bool {
        let was_pressed = self.is_pressed();
        self.state = CaptureState::Idle;
        was_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y, 0.5)
    }

    #[test]
    fn test_press_starts_stroke() {
        let mut capture = Capture::new(5.0);
        assert_eq!(capture.press(p(10.0, 10.0)), Transition::Started { restarted: false });
        assert!(capture.is_pressed());
        assert_eq!(capture.points(), &[p(10.0, 10.0)]);
    }

    #[test]
    fn test_press_while_pressed_restarts() {
        let mut capture = Capture::new(5.0);
        capture.press(p(10.0, 10.0));
        capture.move_to(p(30.0, 10.0));
        assert_eq!(capture.press(p(50.0, 50.0)), Transition::Started { restarted: true });
        assert_eq!(capture.points(), &[p(50.0, 50.0)]);
    }

    #[test]
    fn test_move_filters_by_distance() {
        let mut capture = Capture::new(5.0);
        capture.press(p(10.0, 10.0));

        assert_eq!(capture.move_to(p(12.0, 11.0)), Transition::Ignored);
        // Exactly at the threshold is still rejected
        assert_eq!(capture.move_to(p(15.0, 10.0)), Transition::Ignored);
        assert_eq!(capture.points().len(), 1);

        assert_eq!(capture.move_to(p(20.0, 10.0)), Transition::Extended);
        assert_eq!(capture.points().len(), 2);

        // Distance is measured from the last accepted point
        assert_eq!(capture.move_to(p(24.0, 10.0)), Transition::Ignored);
        assert_eq!(capture.move_to(p(26.0, 10.0)), Transition::Extended);
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut capture = Capture::new(5.0);
        assert_eq!(capture.move_to(p(100.0, 100.0)), Transition::Ignored);
        assert!(capture.points().is_empty());
    }

    #[test]
    fn test_release_commits_and_clears() {
        let mut capture = Capture::new(5.0);
        capture.press(p(10.0, 10.0));
        capture.move_to(p(20.0, 10.0));

        let transition = capture.release(Some(p(20.0, 10.0)));
        assert_eq!(
            transition,
            Transition::Commit(vec![p(10.0, 10.0), p(20.0, 10.0), p(20.0, 10.0)])
        );
        assert!(!capture.is_pressed());
        assert!(capture.points().is_empty());
    }

    #[test]
    fn test_leave_does_not_append() {
        let mut capture = Capture::new(5.0);
        capture.press(p(10.0, 10.0));
        assert_eq!(capture.release(None), Transition::Commit(vec![p(10.0, 10.0)]));
    }

    #[test]
    fn test_release_while_idle_is_ignored() {
        let mut capture = Capture::new(5.0);
        assert_eq!(capture.release(Some(p(1.0, 1.0))), Transition::Ignored);
        assert_eq!(capture.state(), &CaptureState::Idle);
    }

    #[test]
    fn test_reset() {
        let mut capture = Capture::new(5.0);
        assert!(!capture.reset());
        capture.press(p(1.0, 1.0));
        assert!(capture.reset());
        assert!(capture.points().is_empty());
    }
}
