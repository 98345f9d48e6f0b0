// Layer compositing: cover + background picture, weighted by the reveal mask.
// Visual: where the mask is 1 you see the picture, where it is 0 the dark
// cover, and the soft rims in between blend in linear light (no dark halos).

use crate::error::Error;
use crate::types::{FrameBuffer, Mask};

#[inline]
fn unpack(px: u32) -> [u8; 3] {
    [(px >> 16) as u8, (px >> 8) as u8, px as u8]
}

#[inline]
fn pack([r, g, b]: [u8; 3]) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// sRGB <-> linear lookup tables, built once at startup.
pub struct LinearLight {
    to_linear: [f32; 256],
    // linear quantized to 4096 steps -> sRGB byte
    to_srgb: [u8; 4096],
}

impl LinearLight {
    pub fn new() -> Self {
        let mut to_linear = [0.0f32; 256];
        for (v, slot) in to_linear.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut to_srgb = [0u8; 4096];
        for (i, slot) in to_srgb.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { to_linear, to_srgb }
    }

    #[inline]
    fn linear(&self, v: u8) -> f32 {
        self.to_linear[v as usize]
    }

    #[inline]
    fn srgb(&self, l: f32) -> u8 {
        self.to_srgb[(l.clamp(0.0, 1.0) * 4095.0).round() as usize]
    }

    /// Mix two 0x00RRGGBB pixels: `t = 0` gives `a`, `t = 1` gives `b`.
    pub fn mix(&self, a: u32, b: u32, t: f32) -> u32 {
        let (a, b) = (unpack(a), unpack(b));
        let mut out = [0u8; 3];
        for c in 0..3 {
            let l = self.linear(a[c]) * (1.0 - t) + self.linear(b[c]) * t;
            out[c] = self.srgb(l);
        }
        pack(out)
    }
}

impl Default for LinearLight {
    fn default() -> Self {
        Self::new()
    }
}

/// Backdrop behind the cover (dark color scheme window background).
const DARK_BACKDROP: [u8; 3] = [28, 28, 30];

/// The scratchable cover: solid black at the top-left easing to black at 90%
/// opacity over the dark backdrop at the bottom-right.
/// Visual: an essentially black sheet.
pub fn cover_gradient(width: usize, height: usize) -> FrameBuffer {
    let mut fb = FrameBuffer::new(width, height);
    let span = (width + height).saturating_sub(2).max(1) as f32;
    // 10% of the backdrop shows through the translucent end
    let end = DARK_BACKDROP.map(|c| c as f32 * 0.1);
    for y in 0..height {
        for x in 0..width {
            let t = (x + y) as f32 / span;
            fb.pixels[y * width + x] = pack(end.map(|c| (c * t).round() as u8));
        }
    }
    fb
}

/// Write `cover` blended toward `background` by mask coverage into `out`.
pub fn compose(
    out: &mut FrameBuffer,
    cover: &FrameBuffer,
    background: &FrameBuffer,
    mask: &Mask,
    lut: &LinearLight,
) -> Result<(), Error> {
    let (w, h) = (out.width, out.height);
    if cover.width != w || cover.height != h || background.width != w || background.height != h {
        return Err(Error::FrameSize("compose: layer size mismatch".into()));
    }
    if mask.width != w || mask.height != h {
        return Err(Error::FrameSize("compose: mask size mismatch".into()));
    }

    for (i, dst) in out.pixels.iter_mut().enumerate() {
        let a = mask.alpha[i];
        *dst = if a <= 0.0 {
            cover.pixels[i] // visual: untouched cover
        } else if a >= 1.0 {
            background.pixels[i] // visual: fully scratched
        } else {
            lut.mix(cover.pixels[i], background.pixels[i], a)
        };
    }
    Ok(())
}
