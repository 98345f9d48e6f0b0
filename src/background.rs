// Loads the hidden picture and fits it to the window.
// Visual expectation: whatever you scratch away shows this image, scaled to
// fill the window and center-cropped (no letterboxing).

use crate::error::Error;
use crate::types::FrameBuffer;
use image::{DynamicImage, Rgb, RgbImage, imageops::FilterType};
use std::path::Path;
use tracing::{info, warn};

/// Pack an RGB image into 0x00RRGGBB pixels for minifb.
fn to_framebuffer(img: &RgbImage) -> FrameBuffer {
    let (w, h) = img.dimensions();
    let mut out = Vec::with_capacity((w as usize) * (h as usize));
    for pixel in img.pixels() {
        let r = pixel[0] as u32;
        let g = pixel[1] as u32;
        let b = pixel[2] as u32;
        out.push((r << 16) | (g << 8) | b);
    }
    FrameBuffer { width: w as usize, height: h as usize, pixels: out }
}

/// Scale to cover `width` x `height`, cropping the overflow around the center.
pub fn fit_to_fill(img: &DynamicImage, width: usize, height: usize) -> FrameBuffer {
    let filled = img.resize_to_fill(width as u32, height as u32, FilterType::Triangle);
    to_framebuffer(&filled.to_rgb8())
}

/// Decode the picture at `path` and fit it to the window.
pub fn load(path: &Path, width: usize, height: usize) -> Result<FrameBuffer, Error> {
    let img = image::open(path).map_err(|e| Error::ImageLoad(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), w = img.width(), h = img.height(), "background loaded");
    Ok(fit_to_fill(&img, width, height))
}

/// A stand-in picture: warm diagonal bands with a soft checker.
/// Visual: colorful enough that scratches are obvious without an asset.
pub fn placeholder(width: usize, height: usize) -> FrameBuffer {
    let img = RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let band = ((x + y) / 24) % 3;
        let check = if (x / 32 + y / 32) % 2 == 0 { 0 } else { 30 };
        match band {
            0 => Rgb([230, 120 + check, 60]),
            1 => Rgb([250, 200, 80 + check]),
            _ => Rgb([90 + check, 170, 210]),
        }
    });
    to_framebuffer(&img)
}

/// Load the picture, or fall back to the placeholder when it can't be read.
pub fn load_or_placeholder(path: &Path, width: usize, height: usize) -> FrameBuffer {
    match load(path, width, height) {
        Ok(fb) => fb,
        Err(e) => {
            warn!(error = %e, "using placeholder background");
            placeholder(width, height)
        }
    }
}
