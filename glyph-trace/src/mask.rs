//! Boolean pixel masks derived from RGBA rasters.

use crate::error::Error;

/// Pixels with alpha strictly above this value take part in tracing.
pub const TRACE_ALPHA_THRESHOLD: u8 = 128;

/// Pixels with alpha strictly above this value count as ink when computing
/// bounds or deciding whether a raster is empty.
pub const INK_ALPHA_THRESHOLD: u8 = 0;

const RGBA_CHANNELS: usize = 4;

/// The integer coordinates of a single raster pixel.
///
/// The origin is the top-left corner of the raster; `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
}

impl Pixel {
    pub const fn new(x: usize, y: usize) -> Self {
        Pixel { x, y }
    }
}

/// An inclusive pixel bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl Bounds {
    /// A box containing exactly one pixel.
    pub fn from_pixel(pixel: Pixel) -> Self {
        Bounds {
            min_x: pixel.x,
            min_y: pixel.y,
            max_x: pixel.x,
            max_y: pixel.y,
        }
    }

    /// The smallest box containing every pixel, or `None` if there are none.
    pub fn enclosing(pixels: impl IntoIterator<Item = Pixel>) -> Option<Self> {
        let mut pixels = pixels.into_iter();
        let first = Bounds::from_pixel(pixels.next()?);
        Some(pixels.fold(first, Bounds::include))
    }

    /// Grow this box so that it contains `pixel`.
    #[must_use]
    pub fn include(self, pixel: Pixel) -> Self {
        Bounds {
            min_x: self.min_x.min(pixel.x),
            min_y: self.min_y.min(pixel.y),
            max_x: self.max_x.max(pixel.x),
            max_y: self.max_y.max(pixel.y),
        }
    }

    /// Number of pixel columns covered by the box.
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    /// Number of pixel rows covered by the box.
    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    pub fn contains(&self, pixel: Pixel) -> bool {
        (self.min_x..=self.max_x).contains(&pixel.x) && (self.min_y..=self.max_y).contains(&pixel.y)
    }
}

/// A width × height grid of on/off pixels.
///
/// Storage is row-major and addressed by a packed linear index
/// (`y * width + x`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl PixelMask {
    /// Create a mask with every pixel off.
    pub fn new(width: usize, height: usize) -> Self {
        PixelMask {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    /// Create a mask from row-major on/off values.
    pub fn from_bits(width: usize, height: usize, bits: Vec<bool>) -> Result<Self, Error> {
        let expected = checked_area(width, height)?;
        if bits.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: bits.len(),
            });
        }
        Ok(PixelMask {
            width,
            height,
            bits,
        })
    }

    /// Threshold the alpha channel of an RGBA buffer.
    ///
    /// A pixel is on when its alpha is strictly greater than `threshold`.
    /// Only the alpha channel is read.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8], threshold: u8) -> Result<Self, Error> {
        let expected = checked_area(width, height)?
            .checked_mul(RGBA_CHANNELS)
            .ok_or(Error::TooLarge { width, height })?;
        if rgba.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        let bits = rgba
            .chunks_exact(RGBA_CHANNELS)
            .map(|px| px[3] > threshold)
            .collect();
        Ok(PixelMask {
            width,
            height,
            bits,
        })
    }

    /// Build a mask from a list of on pixels.
    ///
    /// Pixels outside the grid are ignored.
    pub fn from_pixels(width: usize, height: usize, pixels: impl IntoIterator<Item = Pixel>) -> Self {
        let mut mask = PixelMask::new(width, height);
        for pixel in pixels {
            mask.set(pixel, true);
        }
        mask
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The packed index of `pixel`, if it lies inside the grid.
    pub fn index_of(&self, pixel: Pixel) -> Option<usize> {
        (pixel.x < self.width && pixel.y < self.height).then(|| pixel.y * self.width + pixel.x)
    }

    /// The pixel at a packed index.
    pub fn pixel_at(&self, index: usize) -> Pixel {
        Pixel::new(index % self.width, index / self.width)
    }

    /// Returns `true` if the pixel is inside the grid and on.
    pub fn get(&self, pixel: Pixel) -> bool {
        self.index_of(pixel).map(|i| self.bits[i]).unwrap_or(false)
    }

    /// Like [`get`](Self::get), but for signed coordinates that may fall
    /// outside the grid.
    pub fn get_signed(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(Pixel::new(x as usize, y as usize))
    }

    /// Set a pixel; writes outside the grid are ignored.
    pub fn set(&mut self, pixel: Pixel, on: bool) {
        if let Some(i) = self.index_of(pixel) {
            self.bits[i] = on;
        }
    }

    pub fn is_on(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Iterate over every on pixel in row-major order.
    pub fn on_pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| self.pixel_at(i))
    }

    pub fn count_on(&self) -> usize {
        self.bits.iter().filter(|on| **on).count()
    }

    /// Returns `true` if no pixel is on.
    pub fn is_blank(&self) -> bool {
        !self.bits.iter().any(|on| *on)
    }

    /// The bounding box of all on pixels, or `None` for a blank mask.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.on_pixels())
    }
}

fn checked_area(width: usize, height: usize) -> Result<usize, Error> {
    width
        .checked_mul(height)
        .ok_or(Error::TooLarge { width, height })
}
