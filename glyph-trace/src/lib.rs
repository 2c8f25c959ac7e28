//! Turning hand-drawn raster glyphs into vector outlines.
//!
//! The pipeline has three stages:
//!
//! - [`extract_components`] splits a [`PixelMask`] into 4-connected
//!   [`Component`]s,
//! - [`trace_contour`] walks the boundary of each component,
//! - [`Outline::from_contour`] turns the walk into font-space drawing
//!   commands.
//!
//! [`trace_outlines`] runs all three for a whole glyph. Recorded pen strokes
//! can skip the raster stages entirely with [`Outline::from_stroke`].
//!
//! ```
//! use glyph_trace::{trace_outlines, Pixel, PixelMask};
//!
//! let pixels = (0..36).map(|i| Pixel::new(2 + i % 6, 1 + i / 6));
//! let mask = PixelMask::from_pixels(10, 10, pixels);
//! let bounds = mask.bounds().unwrap();
//! let outlines = trace_outlines(&mask, &bounds, 100.0);
//! assert_eq!(outlines.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod components;
pub mod contour;
mod error;
pub mod mask;
pub mod outline;

pub use components::{extract_components, Component};
pub use contour::{trace_contour, Contour};
pub use error::Error;
pub use mask::{Bounds, Pixel, PixelMask, INK_ALPHA_THRESHOLD, TRACE_ALPHA_THRESHOLD};
pub use outline::{FontSpace, Outline, PathCommand, Stroke};

/// Trace every component of `mask` into an outline.
///
/// `bounds` is the glyph's ink box, used as the origin of the font space, and
/// `scale` converts pixels into design units. Components whose contour is too
/// small to enclose an area are skipped.
pub fn trace_outlines(mask: &PixelMask, bounds: &Bounds, scale: f64) -> Vec<Outline> {
    extract_components(mask)
        .iter()
        .map(trace_contour)
        .map(|contour| Outline::from_contour(&contour, bounds, scale))
        .filter(|outline| !outline.is_empty())
        .collect()
}

/// Convert recorded strokes into one open sub-path each.
pub fn stroke_outlines<'a>(
    strokes: impl IntoIterator<Item = &'a Stroke>,
    bounds: &Bounds,
    scale: f64,
) -> Vec<Outline> {
    strokes
        .into_iter()
        .map(|stroke| Outline::from_stroke(stroke, bounds, scale))
        .filter(|outline| !outline.is_empty())
        .collect()
}
