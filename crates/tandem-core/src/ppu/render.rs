use crate::ppu::{
    registers::{Mask, Status},
    sprite::SpritePixel,
};

/// Picks the palette RAM offset (`0x00-0x1F`) shown at column `x`.
///
/// `background` is `palette << 2 | color` from the background queue. A layer
/// that is disabled, or hidden in the leftmost eight columns, counts as
/// transparent. An opaque sprite 0 pixel over an opaque background pixel
/// raises the sprite 0 hit flag whichever layer wins.
pub(crate) fn composite(
    x: u16,
    background: u8,
    sprite: SpritePixel,
    mask: Mask,
    status: &mut Status,
) -> u8 {
    let background = if mask.background_visible_at(x) {
        background & 0x0F
    } else {
        0
    };
    let sprite_opaque = mask.sprites_visible_at(x) && sprite.color() != 0;
    let background_opaque = background & 0x03 != 0;

    match (background_opaque, sprite_opaque) {
        (false, false) => 0,
        (false, true) => sprite.palette_index(),
        (true, false) => background,
        (true, true) => {
            if sprite.is_sprite_zero() {
                status.insert(Status::SPRITE_ZERO_HIT);
            }
            if sprite.behind_background() {
                background
            } else {
                sprite.palette_index()
            }
        }
    }
}
