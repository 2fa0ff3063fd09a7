use std::collections::BTreeSet;

/// Camera-local axis a move action travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Front,
    Right,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

/// A camera action. Moves and turns are scaled by the frame time and the
/// camera's own speeds; the action carries only direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Axis, Direction),
    /// Rotate about the camera's right vector. Positive looks up.
    Pitch(Direction),
    /// Rotate about world `+Y`. Positive turns left.
    Yaw(Direction),
    /// Log the current camera pose.
    ReportPose,
}

/// Keys the sandbox binds. The window layer translates its own key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Control,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    P,
}

impl Action {
    /// Default binding for `key`.
    pub fn for_key(key: Key) -> Action {
        use Direction::{Negative, Positive};
        match key {
            Key::W => Action::Move(Axis::Front, Positive),
            Key::S => Action::Move(Axis::Front, Negative),
            Key::D => Action::Move(Axis::Right, Positive),
            Key::A => Action::Move(Axis::Right, Negative),
            Key::Space => Action::Move(Axis::Up, Positive),
            Key::Control => Action::Move(Axis::Up, Negative),
            Key::ArrowUp => Action::Pitch(Positive),
            Key::ArrowDown => Action::Pitch(Negative),
            Key::ArrowLeft => Action::Yaw(Positive),
            Key::ArrowRight => Action::Yaw(Negative),
            Key::P => Action::ReportPose,
        }
    }

    /// Whether the action repeats while its key is held.
    pub fn is_continuous(self) -> bool {
        !matches!(self, Action::ReportPose)
    }
}

/// Tracks held keys between frames.
#[derive(Debug, Default)]
pub struct ActionState {
    held: BTreeSet<Key>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Returns the one-shot action fired by a fresh
    /// press, if any. Key repeat from the OS does not re-fire it.
    pub fn handle_key(&mut self, key: Key, pressed: bool) -> Option<Action> {
        if !pressed {
            self.held.remove(&key);
            return None;
        }
        let fresh = self.held.insert(key);
        let action = Action::for_key(key);
        if fresh && !action.is_continuous() {
            tracing::trace!(?key, ?action, "one-shot action");
            Some(action)
        } else {
            None
        }
    }

    /// Continuous actions for the keys currently held, in key order.
    pub fn held_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.held
            .iter()
            .map(|&key| Action::for_key(key))
            .filter(|action| action.is_continuous())
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_bindings() {
        assert_eq!(
            Action::for_key(Key::W),
            Action::Move(Axis::Front, Direction::Positive)
        );
        assert_eq!(
            Action::for_key(Key::A),
            Action::Move(Axis::Right, Direction::Negative)
        );
        assert_eq!(
            Action::for_key(Key::Control),
            Action::Move(Axis::Up, Direction::Negative)
        );
    }

    #[test]
    fn turn_bindings() {
        assert_eq!(Action::for_key(Key::ArrowUp), Action::Pitch(Direction::Positive));
        assert_eq!(Action::for_key(Key::ArrowLeft), Action::Yaw(Direction::Positive));
        assert_eq!(Direction::Negative.sign(), -1.0);
    }

    #[test]
    fn held_keys_repeat() {
        let mut state = ActionState::new();
        assert_eq!(state.handle_key(Key::W, true), None);
        assert_eq!(state.handle_key(Key::ArrowRight, true), None);
        let actions: Vec<_> = state.held_actions().collect();
        assert_eq!(
            actions,
            vec![
                Action::Move(Axis::Front, Direction::Positive),
                Action::Yaw(Direction::Negative),
            ]
        );

        state.handle_key(Key::W, false);
        assert!(!state.is_held(Key::W));
        assert_eq!(state.held_actions().count(), 1);
    }

    #[test]
    fn report_pose_fires_once_per_press() {
        let mut state = ActionState::new();
        assert_eq!(state.handle_key(Key::P, true), Some(Action::ReportPose));
        // OS key repeat
        assert_eq!(state.handle_key(Key::P, true), None);
        assert_eq!(state.held_actions().count(), 0);
        state.handle_key(Key::P, false);
        assert_eq!(state.handle_key(Key::P, true), Some(Action::ReportPose));
    }

    #[test]
    fn clear_releases_everything() {
        let mut state = ActionState::new();
        state.handle_key(Key::Space, true);
        state.handle_key(Key::D, true);
        state.clear();
        assert_eq!(state.held_actions().count(), 0);
    }
}
