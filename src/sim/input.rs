//! Keyboard to intent mapping
//!
//! Two redundant bindings (arrows and WASD + Space + Shift) collapse into six
//! logical controls, which resolve into a per-tick [`TickInput`].

use serde::{Deserialize, Serialize};

use super::tick::TickInput;

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    A,
    D,
    W,
    S,
    Space,
    Shift,
}

/// Logical controls, level state for the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub dash: bool,
}

impl Controls {
    /// Collapse held physical keys into logical controls
    pub fn from_keys(held: &[Key]) -> Self {
        let down = |a: Key, b: Key| held.contains(&a) || held.contains(&b);
        Self {
            left: down(Key::ArrowLeft, Key::A),
            right: down(Key::ArrowRight, Key::D),
            up: down(Key::ArrowUp, Key::W),
            down: down(Key::ArrowDown, Key::S),
            fire: held.contains(&Key::Space),
            dash: held.contains(&Key::Shift),
        }
    }

    /// Horizontal thrust direction. Left is checked first and wins ties.
    pub fn axis_x(&self) -> i8 {
        if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        }
    }

    /// Vertical thrust direction (screen space, +y is down). Up wins ties.
    pub fn axis_y(&self) -> i8 {
        if self.up {
            -1
        } else if self.down {
            1
        } else {
            0
        }
    }
}

/// Tracks previous-frame state so dash and restart fire once per press
#[derive(Debug, Clone, Default)]
pub struct InputResolver {
    prev_fire: bool,
    prev_dash: bool,
}

impl InputResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, controls: &Controls) -> TickInput {
        let input = TickInput {
            thrust_x: controls.axis_x(),
            thrust_y: controls.axis_y(),
            fire: controls.fire,
            fire_pressed: controls.fire && !self.prev_fire,
            dash_pressed: controls.dash && !self.prev_dash,
        };
        self.prev_fire = controls.fire;
        self.prev_dash = controls.dash;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_bindings() {
        let arrows = Controls::from_keys(&[Key::ArrowLeft, Key::ArrowUp]);
        let wasd = Controls::from_keys(&[Key::A, Key::W]);
        assert_eq!(arrows, wasd);
        assert_eq!(arrows.axis_x(), -1);
        assert_eq!(arrows.axis_y(), -1);
    }

    #[test]
    fn test_opposing_keys_priority() {
        let lr = Controls::from_keys(&[Key::ArrowRight, Key::A]);
        assert_eq!(lr.axis_x(), -1);
        let ud = Controls::from_keys(&[Key::S, Key::ArrowUp]);
        assert_eq!(ud.axis_y(), -1);
        let none = Controls::default();
        assert_eq!((none.axis_x(), none.axis_y()), (0, 0));
    }

    #[test]
    fn test_dash_is_edge_triggered() {
        let mut resolver = InputResolver::new();
        let held = Controls {
            dash: true,
            ..Default::default()
        };
        assert!(resolver.resolve(&held).dash_pressed);
        assert!(!resolver.resolve(&held).dash_pressed);
        resolver.resolve(&Controls::default());
        assert!(resolver.resolve(&held).dash_pressed);
    }

    #[test]
    fn test_fire_is_level_and_edge() {
        let mut resolver = InputResolver::new();
        let held = Controls::from_keys(&[Key::Space]);
        let first = resolver.resolve(&held);
        assert!(first.fire && first.fire_pressed);
        let second = resolver.resolve(&held);
        assert!(second.fire && !second.fire_pressed);
    }
}
