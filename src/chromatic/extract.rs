//! Palette and dominant color extraction from artwork bytes.
//!
//! [`ColorThiefExtractor`] decodes the image with `image` and hands the RGBA
//! pixels to `color_thief`, which runs modified median-cut quantization
//! (MMCQ). The palette is a 6-color quantization at sampling quality 10; the
//! dominant color is the first swatch of a 5-color quantization at quality 7.

use color_thief::ColorFormat;

use crate::{
    error::{ChromaticError, Result},
    types::Rgb,
};

/// What an extractor returns for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub palette: Vec<Rgb>,
    pub dominant: Rgb,
}

/// Maps image bytes to a palette and a dominant color.
pub trait ColorExtractor: Send + Sync {
    fn extract(&self, image: &[u8]) -> Result<Extraction>;
}

pub const PALETTE_SIZE: u8 = 6;
const DOMINANT_CANDIDATES: u8 = 5;

#[derive(Debug, Clone)]
pub struct ColorThiefExtractor {
    pub palette_size: u8,
    /// Sample every n-th pixel when building the palette (1-10).
    pub palette_quality: u8,
    /// Sample every n-th pixel when picking the dominant color (1-10).
    pub dominant_quality: u8,
}

impl Default for ColorThiefExtractor {
    fn default() -> Self {
        ColorThiefExtractor {
            palette_size: PALETTE_SIZE,
            palette_quality: 10,
            dominant_quality: 7,
        }
    }
}

impl ColorExtractor for ColorThiefExtractor {
    fn extract(&self, image: &[u8]) -> Result<Extraction> {
        let pixels = image::load_from_memory(image)
            .map_err(|e| ChromaticError::ExtractionFailure(e.to_string()))?
            .to_rgba8()
            .into_raw();

        if !has_usable_pixels(&pixels, self.palette_quality)
            || !has_usable_pixels(&pixels, self.dominant_quality)
        {
            return Err(ChromaticError::ExtractionFailure(
                "image has no usable pixels".to_string(),
            ));
        }

        let mut palette = quantize(&pixels, self.palette_quality, self.palette_size)?;
        pad_palette(&mut palette, self.palette_size as usize);

        let dominant = quantize(&pixels, self.dominant_quality, DOMINANT_CANDIDATES)?[0];

        Ok(Extraction { palette, dominant })
    }
}

/// Non-empty palette of at most `max_colors` swatches.
fn quantize(pixels: &[u8], quality: u8, max_colors: u8) -> Result<Vec<Rgb>> {
    let colors = color_thief::get_palette(pixels, ColorFormat::Rgba, quality, max_colors)
        .map_err(|e| ChromaticError::ExtractionFailure(e.to_string()))?;

    if colors.is_empty() {
        return Err(ChromaticError::ExtractionFailure(
            "quantization produced no colors".to_string(),
        ));
    }
    Ok(colors.iter().map(|c| Rgb(c.r, c.g, c.b)).collect())
}

/// Whether the pixels `color_thief` samples at `quality` include one that is
/// opaque and not near-white; those are the only ones it counts.
fn has_usable_pixels(rgba: &[u8], quality: u8) -> bool {
    rgba.chunks_exact(4)
        .step_by(quality.max(1) as usize)
        .any(|p| p[3] >= 125 && !(p[0] > 250 && p[1] > 250 && p[2] > 250))
}

/// Repeats the last swatch until the palette has `size` entries.
fn pad_palette(palette: &mut Vec<Rgb>, size: usize) {
    if let Some(last) = palette.last().copied() {
        palette.resize(size, last);
    }
    palette.truncate(size);
}
