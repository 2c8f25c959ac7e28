//! Boundary tracing for a single component.
//!
//! The tracer walks the component's pixels with a four-direction heading,
//! preferring to turn left, then to continue straight, and otherwise turning
//! right in place. The walk ends when it returns to its start pixel, or when
//! it has taken `width × height` steps of the component's local grid.
//!
//! This is a deliberately simple approximation. It only follows the outer
//! boundary, and for shapes that are one pixel wide or touch themselves the
//! result may be truncated or self-intersecting. It never fails: the worst
//! case is a short or degenerate contour.

use crate::components::Component;
use crate::mask::{Pixel, PixelMask};

/// Headings in turning order: right, down, left, up.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

const RIGHT: usize = 0;

/// An ordered, logically closed ring of boundary pixels.
///
/// The start pixel is not repeated at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Pixel>,
    closed: bool,
}

impl Contour {
    pub fn points(&self) -> &[Pixel] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` if the walk got back to its start pixel before running out of
    /// steps.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Trace the boundary of `component`.
///
/// Points are reported in the raster coordinates of the source mask.
pub fn trace_contour(component: &Component) -> Contour {
    let bounds = component.bounds();
    let local = component.to_local_mask();
    let mut contour = trace_local(&local);
    for point in &mut contour.points {
        point.x += bounds.min_x;
        point.y += bounds.min_y;
    }
    contour
}

/// Trace the first shape found in `mask`, in the mask's own coordinates.
pub fn trace_local(mask: &PixelMask) -> Contour {
    let Some(start) = mask.on_pixels().next() else {
        return Contour::default();
    };
    let budget = mask.width() * mask.height();

    let (start_x, start_y) = (start.x as isize, start.y as isize);
    let (mut x, mut y) = (start_x, start_y);
    let mut dir = RIGHT;
    let mut points = vec![start];
    let mut closed = false;

    for _ in 0..budget {
        let left = (dir + 3) % 4;
        let (ldx, ldy) = DIRECTIONS[left];
        let (dx, dy) = DIRECTIONS[dir];
        if mask.get_signed(x + ldx, y + ldy) {
            dir = left;
            x += ldx;
            y += ldy;
        } else if mask.get_signed(x + dx, y + dy) {
            x += dx;
            y += dy;
        } else {
            dir = (dir + 1) % 4;
            continue;
        }

        if (x, y) == (start_x, start_y) {
            closed = true;
            break;
        }
        points.push(Pixel::new(x as usize, y as usize));
    }

    if !closed {
        log::debug!(
            "contour starting at {start:?} truncated after {budget} steps ({} points)",
            points.len()
        );
    }
    Contour { points, closed }
}
