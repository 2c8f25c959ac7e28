//! Horizontal spacing for hand-drawn glyphs.
//!
//! Spacing is a table-driven heuristic rather than something measured from
//! the ink: every glyph gets a fixed left side bearing, and extra advance
//! depending on whether the character is usually narrow or wide.

use glyph_trace::Bounds;
use write_fonts::OtRound;

/// The left side bearing applied to every drawn glyph, in design units.
pub const LEFT_SIDE_BEARING: i16 = 50;

const NARROW: &[char] = &['i', 'l', '1', 'I'];
const WIDE: &[char] = &['m', 'w', 'M', 'W'];

/// How much room a character needs beyond its own ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthClass {
    Narrow,
    Normal,
    Wide,
}

impl WidthClass {
    pub fn of(ch: char) -> Self {
        if NARROW.contains(&ch) {
            WidthClass::Narrow
        } else if WIDE.contains(&ch) {
            WidthClass::Wide
        } else {
            WidthClass::Normal
        }
    }

    /// Design units added to the ink width to get the advance.
    pub fn bonus(self) -> f64 {
        match self {
            WidthClass::Narrow => 100.0,
            WidthClass::Normal => 150.0,
            WidthClass::Wide => 200.0,
        }
    }
}

/// Spacing for one glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    pub advance_width: u16,
    pub left_bearing: i16,
    /// What is left of the advance after the ink and the left bearing.
    ///
    /// Taken from the advance before rounding, and not clamped.
    pub right_bearing: f64,
}

impl Metrics {
    /// Compute spacing for `ch` from its ink box and the raster scale.
    pub fn compute(bounds: &Bounds, ch: char, scale: f64) -> Self {
        let char_width = (bounds.max_x - bounds.min_x) as f64 * scale;
        let advance = char_width + WidthClass::of(ch).bonus();
        let advance_width: u16 = advance.ot_round();
        let left_bearing = LEFT_SIDE_BEARING;
        let right_bearing = advance - char_width - left_bearing as f64;
        Metrics {
            advance_width,
            left_bearing,
            right_bearing,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn ink(width: usize) -> Bounds {
        Bounds {
            min_x: 10,
            min_y: 5,
            max_x: 10 + width,
            max_y: 60,
        }
    }

    #[rstest]
    #[case('i', 100)]
    #[case('l', 100)]
    #[case('1', 100)]
    #[case('I', 100)]
    #[case('m', 200)]
    #[case('W', 200)]
    #[case('a', 150)]
    #[case('?', 150)]
    fn bonus_by_class(#[case] ch: char, #[case] bonus: u16) {
        let metrics = Metrics::compute(&ink(40), ch, 12.5);
        assert_eq!(metrics.advance_width, 500 + bonus);
        assert_eq!(metrics.left_bearing, 50);
    }

    #[test]
    fn narrow_normal_wide_ordering() {
        let bounds = ink(30);
        let scale = 1000.0 / 80.0;
        let i = Metrics::compute(&bounds, 'i', scale).advance_width;
        let n = Metrics::compute(&bounds, 'n', scale).advance_width;
        let w = Metrics::compute(&bounds, 'w', scale).advance_width;
        assert!(i < n && n < w, "{i} {n} {w}");
    }

    #[test]
    fn right_bearing_is_what_remains() {
        let metrics = Metrics::compute(&ink(8), 'a', 12.5);
        assert_eq!(metrics.advance_width, 250);
        assert_eq!(metrics.right_bearing, 100.0);
    }

    #[test]
    fn advance_is_rounded() {
        // 3 * 12.3 = 36.9
        let metrics = Metrics::compute(&ink(3), 'x', 12.3);
        assert_eq!(metrics.advance_width, 187);
    }

    #[test]
    fn right_bearing_ignores_rounding() {
        // the rounded advance would leave 100.1
        let metrics = Metrics::compute(&ink(3), 'x', 12.3);
        assert!((metrics.right_bearing - 100.0).abs() < 1e-9, "{}", metrics.right_bearing);
    }

    #[test]
    fn single_column_glyph() {
        let metrics = Metrics::compute(&ink(0), 'l', 12.5);
        assert_eq!(metrics.advance_width, 100);
        assert_eq!(metrics.right_bearing, 50.0);
    }
}
