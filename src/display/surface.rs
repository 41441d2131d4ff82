// Surface - Drawable RGBA pixel buffer
//
// The surface is the software target every frame is drawn into before it is
// presented. Pixels are stored as RGBA (8 bits per channel, row-major).
// All drawing is limited to the clip rectangle, which is always a subset of
// the surface bounds.

use super::circle::Circle;

/// Bytes per pixel in the surface buffer
pub const BYTES_PER_PIXEL: usize = 4;

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 0xFF);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Get the channels as an array in RGBA order
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Axis-aligned clip rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ClipRect {
    /// Create a clip rectangle
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Check whether a point lies inside the rectangle
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x as i64
            && x < self.right() as i64
            && y >= self.y as i64
            && y < self.bottom() as i64
    }

    /// Get the overlap of two rectangles (empty if they don't overlap)
    pub fn intersect(&self, other: &ClipRect) -> ClipRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        ClipRect {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }

    /// Check whether the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Video surface
pub struct Surface {
    width: u32,
    height: u32,
    /// Pixel data, RGBA, row-major
    pixels: Vec<u8>,
    clip: ClipRect,
}

impl Surface {
    /// Create a surface cleared to opaque black, clipped to its bounds
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            clip: ClipRect::new(0, 0, width, height),
        };
        surface.clear(Rgba::BLACK);
        surface
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full extent of the surface
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    /// Current clip rectangle
    pub fn clip_rect(&self) -> ClipRect {
        self.clip
    }

    /// Set the clip rectangle
    ///
    /// The rectangle is intersected with the surface bounds.
    pub fn set_clip_rect(&mut self, rect: ClipRect) {
        self.clip = rect.intersect(&self.bounds());
    }

    /// Clip all drawing to the full surface
    pub fn clip_to_bounds(&mut self) {
        self.clip = self.bounds();
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Set a pixel, ignoring the clip rectangle
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        let offset = self.offset(x, y);
        self.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color.to_array());
    }

    /// Get a pixel
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        let p = &self.pixels[self.offset(x, y)..];
        Rgba::new(p[0], p[1], p[2], p[3])
    }

    /// Fill the whole surface with a color
    pub fn clear(&mut self, color: Rgba) {
        let color = color.to_array();
        for pixel in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&color);
        }
    }

    /// Blend a color over a horizontal run of pixels
    ///
    /// The run must already be clipped.
    fn blend_span(&mut self, y: u32, x0: u32, x1: u32, color: Rgba) {
        let start = self.offset(x0, y);
        let end = self.offset(x1, y) + BYTES_PER_PIXEL;
        let alpha = color.a as u32;
        let inv = 255 - alpha;

        for pixel in self.pixels[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel[0] = ((color.r as u32 * alpha + pixel[0] as u32 * inv + 127) / 255) as u8;
            pixel[1] = ((color.g as u32 * alpha + pixel[1] as u32 * inv + 127) / 255) as u8;
            pixel[2] = ((color.b as u32 * alpha + pixel[2] as u32 * inv + 127) / 255) as u8;
            pixel[3] = 0xFF;
        }
    }

    /// Draw a filled circle, alpha-blended over the current contents
    ///
    /// Only pixels inside the clip rectangle are touched.
    ///
    /// # Returns
    /// Number of pixels written
    pub fn fill_circle(&mut self, circle: &Circle) -> usize {
        let clip = self.clip;
        if clip.is_empty() {
            return 0;
        }

        let r = circle.radius as i64;
        let (cx, cy) = (circle.x as i64, circle.y as i64);
        let mut written = 0;

        for dy in -r..=r {
            let y = cy + dy;
            if y < clip.y as i64 || y >= clip.bottom() as i64 {
                continue;
            }

            let half = half_chord(r, dy);
            let x0 = (cx - half).max(clip.x as i64);
            let x1 = (cx + half).min(clip.right() as i64 - 1);
            if x0 > x1 {
                continue;
            }

            self.blend_span(y as u32, x0 as u32, x1 as u32, circle.color);
            written += (x1 - x0 + 1) as usize;
        }

        written
    }

    /// Get the raw RGBA pixel data
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Copy the surface into an RGBA frame
    ///
    /// # Panics
    /// Panics if output buffer is too small
    pub fn copy_to_rgba(&self, output: &mut [u8]) {
        assert!(
            output.len() >= self.pixels.len(),
            "Output buffer too small for RGBA copy"
        );

        output[..self.pixels.len()].copy_from_slice(&self.pixels);
    }
}

/// Half width of a circle's horizontal chord at vertical offset `dy`
fn half_chord(r: i64, dy: i64) -> i64 {
    let sq = r * r - dy * dy;
    let mut w = (sq as f64).sqrt() as i64;

    // Float sqrt can be off by one for large values
    while w * w > sq {
        w -= 1;
    }
    while (w + 1) * (w + 1) <= sq {
        w += 1;
    }

    w
}
