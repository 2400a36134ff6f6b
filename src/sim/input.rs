//! Logical controls and the key-state query the vehicle reads

/// The fixed control set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
}

impl Control {
    pub const ALL: [Control; 4] = [Control::Up, Control::Down, Control::Left, Control::Right];
}

/// "Is this control currently held?"
pub trait InputState {
    fn is_active(&self, control: Control) -> bool;

    /// True when any of `controls` is held
    fn any_active(&self, controls: &[Control]) -> bool {
        controls.iter().any(|c| self.is_active(*c))
    }
}

/// Plain control snapshot (scripted input, tests, headless runs)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl ControlState {
    pub fn with(mut self, control: Control) -> Self {
        match control {
            Control::Up => self.up = true,
            Control::Down => self.down = true,
            Control::Left => self.left = true,
            Control::Right => self.right = true,
        }
        self
    }
}

impl InputState for ControlState {
    fn is_active(&self, control: Control) -> bool {
        match control {
            Control::Up => self.up,
            Control::Down => self.down,
            Control::Left => self.left,
            Control::Right => self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_active() {
        let input = ControlState::default().with(Control::Left);
        assert!(input.any_active(&[Control::Up, Control::Left]));
        assert!(!input.any_active(&[Control::Up, Control::Right]));
        assert!(!input.any_active(&[]));
    }
}
