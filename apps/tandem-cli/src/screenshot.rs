use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use tandem_core::{
    display::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH},
    ppu::{Ppu, viewer::ViewerImage},
};

/// Saves the last presented frame as an 8-bit RGBA PNG.
pub fn write_png(path: &Path, frame: &FrameBuffer) -> Result<()> {
    write_rgba(path, SCREEN_WIDTH, SCREEN_HEIGHT, &frame.to_rgba())
}

/// Writes the pattern tables, all four nametables and the palette into `dir`.
pub fn dump_debug(dir: &Path, ppu: &Ppu) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for table in 0..2 {
        write_view(
            &dir.join(format!("pattern_table_{table}.png")),
            &ppu.pattern_table_image(table),
        )?;
    }
    for index in 0..4 {
        write_view(
            &dir.join(format!("nametable_{index}.png")),
            &ppu.nametable_image(index),
        )?;
    }
    write_view(&dir.join("palette.png"), &ppu.palette_image())
}

fn write_view(path: &Path, image: &ViewerImage) -> Result<()> {
    write_rgba(path, image.width(), image.height(), &image.to_rgba())
}

fn write_rgba(path: &Path, width: usize, height: usize, rgba: &[u8]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width as u32, height as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().context("writing PNG header")?;
    writer
        .write_image_data(rgba)
        .context("writing PNG image data")?;
    Ok(())
}
