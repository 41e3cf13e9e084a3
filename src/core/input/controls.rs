//=========================================================================
// Logical Controls
//=========================================================================
//
// Gamepad-shaped view of player input, independent of the physical
// device: nine buttons, two analog triggers, two sticks and a POV hat.
//
// Button states encode both level and edge:
//
// ```text
//   Released  (-2)  up now, up last frame
//   Releasing (-1)  up now, down last frame
//   Unknown    (0)  never sampled
//   Pressing   (1)  down now, up last frame
//   Pressed    (2)  down now, down last frame
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Button ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    L,
    R,
    Select,
    Start,
    Home,
}

impl Button {
    pub const ALL: [Button; 9] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::L,
        Button::R,
        Button::Select,
        Button::Start,
        Button::Home,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

//=== ButtonState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(i8)]
pub enum ButtonState {
    Released = -2,
    Releasing = -1,
    #[default]
    Unknown = 0,
    Pressing = 1,
    Pressed = 2,
}

impl ButtonState {
    pub const fn value(self) -> i8 {
        self as i8
    }

    /// `Pressing` or `Pressed`.
    pub fn is_down(self) -> bool {
        self > ButtonState::Unknown
    }

    /// State after one more sample with the button `down` or not.
    pub fn next(self, down: bool) -> ButtonState {
        match (down, self.is_down()) {
            (true, true) => ButtonState::Pressed,
            (true, false) => ButtonState::Pressing,
            (false, true) => ButtonState::Releasing,
            (false, false) => ButtonState::Released,
        }
    }
}

//=== Trigger / Stick =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    L,
    R,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stick {
    L,
    R,
}

//=== Pov =================================================================

/// Eight-way hat switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pov {
    #[default]
    None,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Pov {
    /// Direction on the integer grid, y-up. `None` is zero.
    pub fn vector(self) -> Vec2 {
        match self {
            Pov::None => Vec2::ZERO,
            Pov::Up => Vec2::new(0.0, 1.0),
            Pov::UpRight => Vec2::new(1.0, 1.0),
            Pov::Right => Vec2::new(1.0, 0.0),
            Pov::DownRight => Vec2::new(1.0, -1.0),
            Pov::Down => Vec2::new(0.0, -1.0),
            Pov::DownLeft => Vec2::new(-1.0, -1.0),
            Pov::Left => Vec2::new(-1.0, 0.0),
            Pov::UpLeft => Vec2::new(-1.0, 1.0),
        }
    }
}

//=== InputSnapshot =======================================================

/// State of every logical control at one sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputSnapshot {
    buttons: [ButtonState; 9],
    triggers: [f32; 2],
    sticks: [Vec2; 2],
    pov: Pov,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Queries ----------------------------------------------------------

    pub fn button(&self, button: Button) -> ButtonState {
        self.buttons[button.index()]
    }

    /// `true` while the button is held (pressing or pressed).
    pub fn is_button_press(&self, button: Button) -> bool {
        self.button(button).is_down()
    }

    /// Trigger travel in `0.0..=1.0`.
    pub fn trigger(&self, trigger: Trigger) -> f32 {
        self.triggers[trigger as usize]
    }

    /// Stick deflection, length at most 1.
    pub fn stick(&self, stick: Stick) -> Vec2 {
        self.sticks[stick as usize]
    }

    pub fn pov(&self) -> Pov {
        self.pov
    }

    //--- Mutation ---------------------------------------------------------

    pub fn set_button(&mut self, button: Button, state: ButtonState) {
        self.buttons[button.index()] = state;
    }

    pub fn set_trigger(&mut self, trigger: Trigger, value: f32) {
        self.triggers[trigger as usize] = value.clamp(0.0, 1.0);
    }

    pub fn set_stick(&mut self, stick: Stick, value: Vec2) {
        self.sticks[stick as usize] = value.clamp_length_max(1.0);
    }

    pub fn set_pov(&mut self, pov: Pov) {
        self.pov = pov;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_state_values_match_levels() {
        assert_eq!(ButtonState::Released.value(), -2);
        assert_eq!(ButtonState::Releasing.value(), -1);
        assert_eq!(ButtonState::Unknown.value(), 0);
        assert_eq!(ButtonState::Pressing.value(), 1);
        assert_eq!(ButtonState::Pressed.value(), 2);
    }

    #[test]
    fn button_state_rolls_through_edges() {
        let mut state = ButtonState::Unknown;
        state = state.next(true);
        assert_eq!(state, ButtonState::Pressing);
        state = state.next(true);
        assert_eq!(state, ButtonState::Pressed);
        state = state.next(false);
        assert_eq!(state, ButtonState::Releasing);
        state = state.next(false);
        assert_eq!(state, ButtonState::Released);
        assert_eq!(ButtonState::Unknown.next(false), ButtonState::Released);
    }

    #[test]
    fn fresh_snapshot_is_neutral() {
        let snapshot = InputSnapshot::new();
        for button in Button::ALL {
            assert_eq!(snapshot.button(button), ButtonState::Unknown);
            assert!(!snapshot.is_button_press(button));
        }
        assert_eq!(snapshot.trigger(Trigger::L), 0.0);
        assert_eq!(snapshot.stick(Stick::R), Vec2::ZERO);
        assert_eq!(snapshot.pov(), Pov::None);
    }

    #[test]
    fn setters_clamp_analog_values() {
        let mut snapshot = InputSnapshot::new();
        snapshot.set_trigger(Trigger::R, 3.0);
        snapshot.set_stick(Stick::L, Vec2::new(3.0, 4.0));

        assert_eq!(snapshot.trigger(Trigger::R), 1.0);
        assert!((snapshot.stick(Stick::L).length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pov_vectors_point_the_right_way() {
        assert_eq!(Pov::UpLeft.vector(), Vec2::new(-1.0, 1.0));
        assert_eq!(Pov::None.vector(), Vec2::ZERO);
    }
}
