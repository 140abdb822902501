//! Controller input sources.
//!
//! The console reads a pad through `$4016` one button at a time. Writing a
//! non-zero value to the port starts polling (the pad continuously reloads its
//! shift register), writing zero stops it and freezes the button snapshot so
//! eight reads shift it out in A, B, Select, Start, Up, Down, Left, Right order.

use std::{cell::RefCell, fmt::Debug, rc::Rc};

/// Source of serial controller bits.
pub trait InputSource: Debug {
    /// Returns the next button bit.
    fn read_input(&mut self) -> bool;

    /// Rewinds the read sequence to the first button. Called once per frame.
    fn reset_read(&mut self);

    /// Port `$4016` was written with a non-zero value.
    fn start_polling(&mut self);

    /// Port `$4016` was written with zero.
    fn stop_polling(&mut self);
}

/// Button ordering follows the NES shift register bit layout (A first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Standard eight-button pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controller {
    polling: bool,
    /// Live button state, one bit per [`Button`].
    state: u8,
    /// Snapshot taken when polling stopped.
    latched: u8,
    /// Index of the next button to shift out.
    read_index: u8,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update a button's pressed state.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.state |= button.mask();
        } else {
            self.state &= !button.mask();
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.state & button.mask() != 0
    }
}

impl InputSource for Controller {
    fn read_input(&mut self) -> bool {
        if self.polling {
            return self.is_pressed(Button::A);
        }
        match Button::ALL.get(self.read_index as usize) {
            Some(button) => {
                self.read_index += 1;
                self.latched & button.mask() != 0
            }
            // Official pads report 1 once all eight bits are out.
            None => true,
        }
    }

    fn reset_read(&mut self) {
        self.read_index = 0;
    }

    fn start_polling(&mut self) {
        self.polling = true;
        self.read_index = 0;
    }

    fn stop_polling(&mut self) {
        self.polling = false;
        self.latched = self.state;
        self.read_index = 0;
    }
}

/// Empty controller port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unplugged;

impl InputSource for Unplugged {
    fn read_input(&mut self) -> bool {
        false
    }

    fn reset_read(&mut self) {}

    fn start_polling(&mut self) {}

    fn stop_polling(&mut self) {}
}

impl<I: InputSource> InputSource for Rc<RefCell<I>> {
    fn read_input(&mut self) -> bool {
        self.borrow_mut().read_input()
    }

    fn reset_read(&mut self) {
        self.borrow_mut().reset_read();
    }

    fn start_polling(&mut self) {
        self.borrow_mut().start_polling();
    }

    fn stop_polling(&mut self) {
        self.borrow_mut().stop_polling();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strobe(pad: &mut Controller) {
        pad.start_polling();
        pad.stop_polling();
    }

    #[test]
    fn shifts_buttons_in_hardware_order() {
        let mut pad = Controller::new();
        pad.set_button(Button::A, true);
        pad.set_button(Button::Start, true);
        pad.set_button(Button::Right, true);
        strobe(&mut pad);

        let bits: Vec<bool> = (0..8).map(|_| pad.read_input()).collect();
        assert_eq!(
            bits,
            [true, false, false, true, false, false, false, true],
            "A, B, Select, Start, Up, Down, Left, Right"
        );
        assert!(pad.read_input(), "reads past the eighth bit return 1");
    }

    #[test]
    fn polling_reports_live_a_button() {
        let mut pad = Controller::new();
        pad.start_polling();
        assert!(!pad.read_input());
        pad.set_button(Button::A, true);
        assert!(pad.read_input());
        assert!(pad.read_input(), "no shifting while polling");
    }

    #[test]
    fn snapshot_ignores_later_presses() {
        let mut pad = Controller::new();
        strobe(&mut pad);
        pad.set_button(Button::B, true);
        assert!(!pad.read_input());
        assert!(!pad.read_input());
    }

    #[test]
    fn reset_read_rewinds() {
        let mut pad = Controller::new();
        pad.set_button(Button::A, true);
        strobe(&mut pad);
        assert!(pad.read_input());
        assert!(!pad.read_input());
        pad.reset_read();
        assert!(pad.read_input());
    }
}
