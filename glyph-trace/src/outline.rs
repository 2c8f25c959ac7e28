//! Font-space outlines built from traced contours or recorded strokes.

use kurbo::{BezPath, Point, Rect};

use crate::contour::Contour;
use crate::mask::{Bounds, Pixel};

/// A single drawing instruction in font design units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// A quadratic curve: control point, then end point.
    QuadTo(Point, Point),
    Close,
}

/// A pen stroke as recorded by a drawing surface.
///
/// Points are in raster coordinates (origin top-left, `y` down).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    pub points: Vec<(f64, f64)>,
    #[cfg_attr(feature = "serde", serde(default = "default_stroke_width"))]
    pub width: f64,
}

#[cfg(feature = "serde")]
fn default_stroke_width() -> f64 {
    3.0
}

impl Stroke {
    pub fn new(points: Vec<(f64, f64)>, width: f64) -> Self {
        Stroke { points, width }
    }
}

/// Maps raster coordinates into a glyph's design space.
///
/// The glyph's bounding box is moved to the origin, `y` is flipped so that
/// it grows upward, and everything is multiplied by `scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpace {
    min_x: f64,
    max_y: f64,
    scale: f64,
}

impl FontSpace {
    pub fn new(bounds: &Bounds, scale: f64) -> Self {
        debug_assert!(scale > 0.0, "scale must be positive");
        FontSpace {
            min_x: bounds.min_x as f64,
            max_y: bounds.max_y as f64,
            scale,
        }
    }

    pub fn map(&self, x: f64, y: f64) -> Point {
        Point::new((x - self.min_x) * self.scale, (self.max_y - y) * self.scale)
    }

    pub fn map_pixel(&self, pixel: Pixel) -> Point {
        self.map(pixel.x as f64, pixel.y as f64)
    }
}

/// An ordered list of drawing commands.
///
/// A non-empty outline always starts with [`PathCommand::MoveTo`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    commands: Vec<PathCommand>,
}

impl Outline {
    /// Build a closed polygon from a traced contour.
    ///
    /// Contours with fewer than three points don't describe an area and
    /// produce an empty outline.
    pub fn from_contour(contour: &Contour, bounds: &Bounds, scale: f64) -> Self {
        if contour.len() < 3 {
            return Outline::default();
        }
        let space = FontSpace::new(bounds, scale);
        let mut points = contour.points().iter().map(|px| space.map_pixel(*px));
        let mut commands = Vec::with_capacity(contour.len() + 1);
        commands.extend(points.next().map(PathCommand::MoveTo));
        commands.extend(points.map(PathCommand::LineTo));
        commands.push(PathCommand::Close);
        Outline { commands }
    }

    /// Build an open sub-path from a recorded pen stroke.
    ///
    /// Interior points become the control points of quadratic segments that
    /// end halfway to the following point; the last point is reached with a
    /// straight line. Strokes with fewer than two points produce an empty
    /// outline.
    pub fn from_stroke(stroke: &Stroke, bounds: &Bounds, scale: f64) -> Self {
        if stroke.points.len() < 2 {
            return Outline::default();
        }
        let space = FontSpace::new(bounds, scale);
        let points: Vec<Point> = stroke
            .points
            .iter()
            .map(|(x, y)| space.map(*x, *y))
            .collect();

        let last = points.len() - 1;
        let mut commands = Vec::with_capacity(points.len());
        commands.push(PathCommand::MoveTo(points[0]));
        for window in points[1..].windows(2) {
            let (current, next) = (window[0], window[1]);
            commands.push(PathCommand::QuadTo(current, current.midpoint(next)));
        }
        commands.push(PathCommand::LineTo(points[last]));
        Outline { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns a copy of this outline moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let shift = |p: Point| Point::new(p.x + dx, p.y + dy);
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(shift(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(shift(p)),
                PathCommand::QuadTo(c, p) => PathCommand::QuadTo(shift(c), shift(p)),
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Outline { commands }
    }

    /// The box around every on- and off-curve point, or `None` if empty.
    pub fn control_bounds(&self) -> Option<Rect> {
        self.commands
            .iter()
            .flat_map(|cmd| match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => [Some(p), None],
                PathCommand::QuadTo(c, p) => [Some(c), Some(p)],
                PathCommand::Close => [None, None],
            })
            .flatten()
            .map(|p| Rect::from_points(p, p))
            .reduce(|acc, r| acc.union(r))
    }

    /// Append this outline to a kurbo path.
    pub fn append_to(&self, path: &mut BezPath) {
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => path.move_to(p),
                PathCommand::LineTo(p) => path.line_to(p),
                PathCommand::QuadTo(c, p) => path.quad_to(c, p),
                PathCommand::Close => path.close_path(),
            }
        }
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        self.append_to(&mut path);
        path
    }
}
