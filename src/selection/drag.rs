// Pointer state machine: classifies primary-button activity into clicks and box drags.
use bevy::prelude::*;

use crate::constants::DRAG_THRESHOLD_PX;

/// Screen rectangle in normalized viewport coordinates (x and y in [0,1],
/// origin top-left, y growing downward), normalized so `min <= max` on both
/// axes no matter which way the drag ran. Containment is inclusive on all
/// four edges; a zero-area rect still contains points on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl DragRect {
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// What a released press turned out to be. Coordinates are window pixels in
/// the same space the cursor positions were fed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerGesture {
    /// Sub-threshold press, resolved at the release position.
    Click(Vec2),
    /// Box drag from press to release.
    BoxDrag { start: Vec2, end: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragPhase {
    #[default]
    Idle,
    Pending {
        pressed_at: Vec2,
    },
    Dragging {
        pressed_at: Vec2,
    },
}

/// Primary-button drag tracker. Feed it presses, cursor positions and
/// releases; it answers with a [`PointerGesture`] on release. A press turns
/// into a drag once the cursor travels `threshold` pixels from the press
/// position, and that transition is one-way: wandering back inside the
/// threshold keeps the drag alive. The secondary button never comes through
/// here, it belongs to the command layer.
///
/// Modifier keys are not tracked here: callers sample them at release
/// time, when the gesture resolves.
#[derive(Debug, Clone)]
pub struct DragState {
    phase: DragPhase,
    cursor: Vec2,
    threshold: f32,
}

impl Default for DragState {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD_PX)
    }
}

impl DragState {
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: DragPhase::Idle,
            cursor: Vec2::ZERO,
            threshold,
        }
    }

    /// Threshold in the same pixel space the cursor positions use.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Primary button went down. A press with no known cursor position
    /// (pointer outside the window) is ignored outright.
    pub fn on_press(&mut self, cursor: Option<Vec2>) {
        if let Some(position) = cursor {
            self.cursor = position;
            self.phase = DragPhase::Pending {
                pressed_at: position,
            };
        }
    }

    /// Latest cursor position. Skipping frames (cursor left the window) is
    /// fine, the last known position stands in.
    pub fn track_cursor(&mut self, cursor: Vec2) {
        self.cursor = cursor;
        if let DragPhase::Pending { pressed_at } = self.phase {
            if pressed_at.distance(cursor) >= self.threshold {
                self.phase = DragPhase::Dragging { pressed_at };
            }
        }
    }

    /// Primary button went up. Resolves the press into a gesture, or `None`
    /// when no press was being tracked.
    pub fn on_release(&mut self) -> Option<PointerGesture> {
        let gesture = match self.phase {
            DragPhase::Idle => None,
            DragPhase::Pending { .. } => Some(PointerGesture::Click(self.cursor)),
            DragPhase::Dragging { pressed_at } => Some(PointerGesture::BoxDrag {
                start: pressed_at,
                end: self.cursor,
            }),
        };
        self.phase = DragPhase::Idle;
        gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Press-to-cursor corners while a drag is live, for the rectangle
    /// visual.
    pub fn drag_corners(&self) -> Option<(Vec2, Vec2)> {
        match self.phase {
            DragPhase::Dragging { pressed_at } => Some((pressed_at, self.cursor)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_threshold_release_is_a_click_at_the_release_position() {
        let mut drag = DragState::new(5.0);
        drag.on_press(Some(Vec2::new(100.0, 100.0)));
        drag.track_cursor(Vec2::new(103.0, 100.0));
        assert!(!drag.is_dragging());
        assert_eq!(
            drag.on_release(),
            Some(PointerGesture::Click(Vec2::new(103.0, 100.0)))
        );
        // Machine is back to idle
        assert_eq!(drag.on_release(), None);
    }

    #[test]
    fn crossing_the_threshold_starts_a_box_drag() {
        let mut drag = DragState::new(5.0);
        drag.on_press(Some(Vec2::new(10.0, 10.0)));
        drag.track_cursor(Vec2::new(10.0, 16.0));
        assert!(drag.is_dragging());
        assert_eq!(
            drag.on_release(),
            Some(PointerGesture::BoxDrag {
                start: Vec2::new(10.0, 10.0),
                end: Vec2::new(10.0, 16.0),
            })
        );
    }

    #[test]
    fn exactly_the_threshold_counts_as_crossing() {
        let mut drag = DragState::new(5.0);
        drag.on_press(Some(Vec2::new(0.0, 0.0)));
        drag.track_cursor(Vec2::new(3.0, 4.0));
        assert!(drag.is_dragging());
    }

    #[test]
    fn threshold_crossing_is_one_way() {
        let mut drag = DragState::new(5.0);
        drag.on_press(Some(Vec2::new(50.0, 50.0)));
        drag.track_cursor(Vec2::new(80.0, 50.0));
        drag.track_cursor(Vec2::new(51.0, 50.0));
        assert!(drag.is_dragging());
        assert_eq!(
            drag.on_release(),
            Some(PointerGesture::BoxDrag {
                start: Vec2::new(50.0, 50.0),
                end: Vec2::new(51.0, 50.0),
            })
        );
    }

    #[test]
    fn press_without_cursor_stays_idle() {
        let mut drag = DragState::new(5.0);
        drag.on_press(None);
        drag.track_cursor(Vec2::new(200.0, 200.0));
        assert_eq!(drag.on_release(), None);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.on_release(), None);
    }

    #[test]
    fn drag_corners_only_exist_while_dragging() {
        let mut drag = DragState::new(5.0);
        assert_eq!(drag.drag_corners(), None);
        drag.on_press(Some(Vec2::ZERO));
        assert_eq!(drag.drag_corners(), None);
        drag.track_cursor(Vec2::new(20.0, 0.0));
        assert_eq!(drag.drag_corners(), Some((Vec2::ZERO, Vec2::new(20.0, 0.0))));
        drag.on_release();
        assert_eq!(drag.drag_corners(), None);
    }

    #[test]
    fn rect_normalizes_inverted_corners() {
        let rect = DragRect::from_corners(Vec2::new(0.8, 0.2), Vec2::new(0.3, 0.7));
        assert_eq!(rect.min, Vec2::new(0.3, 0.2));
        assert_eq!(rect.max, Vec2::new(0.8, 0.7));
        assert_eq!(rect.size(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn rect_containment_is_inclusive() {
        let rect = DragRect::from_corners(Vec2::new(0.2, 0.2), Vec2::new(0.6, 0.6));
        assert!(rect.contains(Vec2::new(0.2, 0.2)));
        assert!(rect.contains(Vec2::new(0.6, 0.6)));
        assert!(rect.contains(Vec2::new(0.4, 0.6)));
        assert!(!rect.contains(Vec2::new(0.61, 0.4)));
    }

    #[test]
    fn zero_area_rect_contains_its_point() {
        let rect = DragRect::from_corners(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.5));
        assert!(rect.contains(Vec2::new(0.5, 0.5)));
        assert!(!rect.contains(Vec2::new(0.5001, 0.5)));
    }
}
