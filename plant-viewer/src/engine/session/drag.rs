use bevy::math::Vec2;

/// Pointer button state used to turn drags into incremental rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    is_dragging: bool,
    last_pointer: Vec2,
}

impl DragState {
    /// Begin a drag at `pointer`.
    pub fn press(&mut self, pointer: Vec2) {
        self.is_dragging = true;
        self.last_pointer = pointer;
    }

    /// Record a pointer move and return the delta since the previous one.
    /// Returns `None` when no button is held.
    pub fn track(&mut self, pointer: Vec2) -> Option<Vec2> {
        if !self.is_dragging {
            return None;
        }

        let delta = pointer - self.last_pointer;
        self.last_pointer = pointer;
        Some(delta)
    }

    pub fn release(&mut self) {
        self.is_dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn last_pointer(&self) -> Vec2 {
        self.last_pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_ignores_moves_without_press() {
        let mut drag = DragState::default();
        assert_eq!(drag.track(Vec2::new(50.0, 50.0)), None);
        assert_eq!(drag.last_pointer(), Vec2::ZERO);
    }

    #[test]
    fn track_reports_delta_from_previous_pointer() {
        let mut drag = DragState::default();
        drag.press(Vec2::new(100.0, 100.0));

        assert_eq!(drag.track(Vec2::new(110.0, 115.0)), Some(Vec2::new(10.0, 15.0)));
        assert_eq!(drag.track(Vec2::new(105.0, 115.0)), Some(Vec2::new(-5.0, 0.0)));
        assert_eq!(drag.last_pointer(), Vec2::new(105.0, 115.0));
    }

    #[test]
    fn release_ends_the_drag() {
        let mut drag = DragState::default();
        drag.press(Vec2::new(1.0, 2.0));
        drag.release();

        assert!(!drag.is_dragging());
        assert_eq!(drag.track(Vec2::new(200.0, 200.0)), None);
    }
}
