//! Video output sinks.
//!
//! The PPU hands every visible pixel to a [`Display`] as a raw palette byte
//! plus the PPUMASK value in effect, and brackets each frame with
//! [`Display::update_screen`] / [`Display::clear_buffer`] at vblank entry.
//! Turning that into RGB is the sink's business.

use core::fmt::Debug;
use std::{cell::RefCell, rc::Rc};

use crate::ppu::registers::Mask;

/// Visible picture width in pixels.
pub const SCREEN_WIDTH: usize = 256;
/// Visible picture height in pixels.
pub const SCREEN_HEIGHT: usize = 240;

/// Consumer of the PPU's pixel stream.
pub trait Display: Debug {
    /// Receives one composited pixel. `palette_byte` is the palette RAM entry
    /// selected by the compositor; `mask` is the current PPUMASK.
    fn draw_pixel(&mut self, x: u8, y: u8, palette_byte: u8, mask: u8);

    /// A full frame has been drawn.
    fn update_screen(&mut self);

    /// Prepares for the next frame.
    fn clear_buffer(&mut self);
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn draw_pixel(&mut self, _x: u8, _y: u8, _palette_byte: u8, _mask: u8) {}

    fn update_screen(&mut self) {}

    fn clear_buffer(&mut self) {}
}

/// Lets a caller keep a handle on a sink after handing it to the console.
impl<D: Display> Display for Rc<RefCell<D>> {
    fn draw_pixel(&mut self, x: u8, y: u8, palette_byte: u8, mask: u8) {
        self.borrow_mut().draw_pixel(x, y, palette_byte, mask);
    }

    fn update_screen(&mut self) {
        self.borrow_mut().update_screen();
    }

    fn clear_buffer(&mut self) {
        self.borrow_mut().clear_buffer();
    }
}

/// Standard 2C02 palette as `(R, G, B)`.
#[rustfmt::skip]
pub const NTSC_PALETTE: [(u8, u8, u8); 64] = [
    (84, 84, 84),    (0, 30, 116),    (8, 16, 144),    (48, 0, 136),
    (68, 0, 100),    (92, 0, 48),     (84, 4, 0),      (60, 24, 0),
    (32, 42, 0),     (8, 58, 0),      (0, 64, 0),      (0, 60, 0),
    (0, 50, 60),     (0, 0, 0),       (0, 0, 0),       (0, 0, 0),

    (152, 150, 152), (8, 76, 196),    (48, 50, 236),   (92, 30, 228),
    (136, 20, 176),  (160, 20, 100),  (152, 34, 32),   (120, 60, 0),
    (84, 90, 0),     (40, 114, 0),    (8, 124, 0),     (0, 118, 40),
    (0, 102, 120),   (0, 0, 0),       (0, 0, 0),       (0, 0, 0),

    (236, 238, 236), (76, 154, 236),  (120, 124, 236), (176, 98, 236),
    (228, 84, 236),  (236, 88, 180),  (236, 106, 100), (212, 136, 32),
    (160, 170, 0),   (116, 196, 0),   (76, 208, 32),   (56, 204, 108),
    (56, 180, 204),  (60, 60, 60),    (0, 0, 0),       (0, 0, 0),

    (236, 238, 236), (168, 204, 236), (188, 188, 236), (212, 178, 236),
    (236, 174, 236), (236, 174, 212), (236, 180, 176), (228, 196, 144),
    (204, 210, 120), (180, 222, 120), (168, 226, 144), (152, 226, 180),
    (160, 214, 228), (160, 162, 160), (0, 0, 0),       (0, 0, 0),
];

/// Color index used when the back buffer is cleared.
const CLEAR_COLOR: u16 = 0x0F;
const COLOR_MASK: u16 = 0x3F;
const EMPHASIS_SHIFT: u16 = 6;

/// Double-buffered frame of NES color indices.
///
/// Each entry packs the 6-bit color index in bits 0-5 and the three
/// emphasis bits (red, green, blue) in bits 6-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    back: Vec<u16>,
    front: Vec<u16>,
    frames: u64,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            back: vec![CLEAR_COLOR; SCREEN_WIDTH * SCREEN_HEIGHT],
            front: vec![CLEAR_COLOR; SCREEN_WIDTH * SCREEN_HEIGHT],
            frames: 0,
        }
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Color index (0..=63) of a pixel in the last presented frame.
    pub fn color_index(&self, x: usize, y: usize) -> u8 {
        (self.front[y * SCREEN_WIDTH + x] & COLOR_MASK) as u8
    }

    /// Last presented frame as packed RGBA8.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.front.len() * 4);
        for &pixel in &self.front {
            let (r, g, b) = rgb(pixel);
            out.extend_from_slice(&[r, g, b, 0xFF]);
        }
        out
    }
}

impl Display for FrameBuffer {
    fn draw_pixel(&mut self, x: u8, y: u8, palette_byte: u8, mask: u8) {
        let (x, y) = (x as usize, y as usize);
        if y >= SCREEN_HEIGHT {
            return;
        }
        let mask = Mask::from_bits_retain(mask);
        let mut color = u16::from(palette_byte) & COLOR_MASK;
        if mask.contains(Mask::GRAYSCALE) {
            color &= 0x30;
        }
        let emphasis = u16::from(mask.bits() >> 5);
        self.back[y * SCREEN_WIDTH + x] = color | (emphasis << EMPHASIS_SHIFT);
    }

    fn update_screen(&mut self) {
        self.front.copy_from_slice(&self.back);
        self.frames += 1;
    }

    fn clear_buffer(&mut self) {
        self.back.fill(CLEAR_COLOR);
    }
}

fn rgb(pixel: u16) -> (u8, u8, u8) {
    let (r, g, b) = NTSC_PALETTE[(pixel & COLOR_MASK) as usize];
    let emphasis = pixel >> EMPHASIS_SHIFT;
    if emphasis == 0 {
        return (r, g, b);
    }
    // Channels that are not emphasized are darkened.
    let dim = |value: u8, bit: u16| {
        if emphasis & bit != 0 {
            value
        } else {
            (u16::from(value) * 3 / 4) as u8
        }
    };
    (dim(r, 0b001), dim(g, 0b010), dim(b, 0b100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_presented_on_update() {
        let mut fb = FrameBuffer::new();
        fb.draw_pixel(3, 4, 0x21, 0);
        assert_eq!(fb.color_index(3, 4), 0x0F, "not presented yet");
        fb.update_screen();
        fb.clear_buffer();
        assert_eq!(fb.color_index(3, 4), 0x21);
        assert_eq!(fb.frames(), 1);
    }

    #[test]
    fn grayscale_keeps_luma_column() {
        let mut fb = FrameBuffer::new();
        fb.draw_pixel(0, 0, 0x2A, Mask::GRAYSCALE.bits());
        fb.update_screen();
        assert_eq!(fb.color_index(0, 0), 0x20);
    }

    #[test]
    fn emphasis_dims_other_channels() {
        let mut fb = FrameBuffer::new();
        fb.draw_pixel(0, 0, 0x30, Mask::EMPHASIZE_RED.bits());
        fb.draw_pixel(1, 0, 0x30, 0);
        fb.update_screen();
        let rgba = fb.to_rgba();
        assert_eq!(&rgba[4..8], &[236, 238, 236, 0xFF]);
        assert_eq!(&rgba[0..4], &[236, 178, 177, 0xFF]);
    }
}
