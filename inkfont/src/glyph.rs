//! Drawn glyphs and their names.

use glyph_trace::{Bounds, Outline};

use crate::metrics::Metrics;

/// A character's outlines together with its spacing.
///
/// Glyphs are only created for characters with ink, and are never modified
/// once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    ch: char,
    name: String,
    outlines: Vec<Outline>,
    bounds: Bounds,
    metrics: Metrics,
}

impl Glyph {
    pub fn new(ch: char, outlines: Vec<Outline>, bounds: Bounds, metrics: Metrics) -> Self {
        Glyph {
            ch,
            name: glyph_name(ch),
            outlines,
            bounds,
            metrics,
        }
    }

    pub fn char(&self) -> char {
        self.ch
    }

    /// The PostScript name of this glyph.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One sub-path per traced component or recorded stroke.
    pub fn outlines(&self) -> &[Outline] {
        &self.outlines
    }

    /// The ink box of the source raster, in pixels.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn advance_width(&self) -> u16 {
        self.metrics.advance_width
    }

    /// Total number of drawing commands across all sub-paths.
    pub fn command_count(&self) -> usize {
        self.outlines.iter().map(Outline::len).sum()
    }
}

/// The production name for `ch`, following the Adobe Glyph List where the
/// character has a well-known name.
pub fn glyph_name(ch: char) -> String {
    let name = match ch {
        '\0' => ".notdef",
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        '.' => "period",
        ',' => "comma",
        '-' => "hyphen",
        '!' => "exclam",
        '?' => "question",
        ' ' => "space",
        c if c.is_ascii_alphabetic() => return c.to_string(),
        c => return format!("uni{:04X}", c as u32),
    };
    name.to_string()
}
