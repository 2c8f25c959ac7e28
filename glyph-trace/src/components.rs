//! Partitioning a mask into 4-connected components.

use crate::mask::{Bounds, Pixel, PixelMask};

/// Offsets of the 4-connected neighbourhood: right, left, down, up.
const NEIGHBORS_C4: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A maximal 4-connected set of on pixels.
///
/// Pixels are stored in the order the flood fill reached them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pixels: Vec<Pixel>,
    bounds: Bounds,
}

impl Component {
    /// Construct a component from its pixels.
    ///
    /// Returns `None` if `pixels` is empty. The caller is responsible for
    /// the pixels actually being connected.
    pub fn new(pixels: Vec<Pixel>) -> Option<Self> {
        let bounds = Bounds::enclosing(pixels.iter().copied())?;
        Some(Component { pixels, bounds })
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The bounding box of the component in raster coordinates.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Copy the component into a mask covering only its own bounding box.
    ///
    /// Pixel `(min_x, min_y)` of the component maps to `(0, 0)` of the
    /// returned mask.
    pub fn to_local_mask(&self) -> PixelMask {
        let Bounds { min_x, min_y, .. } = self.bounds;
        PixelMask::from_pixels(
            self.bounds.width(),
            self.bounds.height(),
            self.pixels
                .iter()
                .map(|px| Pixel::new(px.x - min_x, px.y - min_y)),
        )
    }
}

/// Find every 4-connected component of `mask`.
///
/// Seeds are discovered in row-major order, so the output order is
/// deterministic. Together the components cover every on pixel exactly once.
pub fn extract_components(mask: &PixelMask) -> Vec<Component> {
    let (width, height) = (mask.width(), mask.height());
    let mut visited = vec![false; width * height];
    let mut stack = Vec::new();
    let mut components = Vec::new();

    for seed in 0..visited.len() {
        if visited[seed] || !mask.is_on(seed) {
            continue;
        }

        let mut pixels = Vec::new();
        visited[seed] = true;
        stack.push(seed);
        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % width, idx / width);
            pixels.push(Pixel::new(x, y));

            for (dx, dy) in NEIGHBORS_C4 {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if !visited[n] && mask.is_on(n) {
                    visited[n] = true;
                    stack.push(n);
                }
            }
        }

        log::trace!(
            "component {} seeded at {:?}: {} pixels",
            components.len(),
            mask.pixel_at(seed),
            pixels.len()
        );
        components.extend(Component::new(pixels));
    }

    components
}
