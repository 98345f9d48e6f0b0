// Pixel-level types shared by the renderer, compositor and window.

/// A 2D location in window pixel coordinates (may lie outside the window).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// All-black buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Coverage mask in [0,1] per pixel; 1 = show background image, 0 = show cover.
/// Visual: unseen directly; it decides how much of the picture peeks through.
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>,   // length = width * height, values clamped to [0.0, 1.0]
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, alpha: vec![0.0; width * height] }
    }

    /// Clear to 0 (cover everywhere).
    pub fn clear(&mut self) {
        self.alpha.fill(0.0);
    }

    /// Coverage at (x, y), or 0 outside the mask.
    pub fn at(&self, x: usize, y: usize) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.alpha[y * self.width + x]
    }
}
