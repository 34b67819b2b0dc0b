//! Pointy-top hex grid geometry.
//!
//! Tiles are stored row-major, `index = y * width + x`. All conversions
//! between flat indices and [`Position`]s live here so the rest of the crate
//! only ever deals in indices.

use crate::position::{Direction, Position};

/// `sqrt(3) / 2`, the width of a pointy-top hexagon per unit of diameter.
pub const HEX_WIDTH_FACTOR: f64 = 0.866_025_403_784_438_6;

/// Vertical distance between row centres per unit of diameter.
const ROW_SPACING: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The in-bounds neighbors of a tile, one slot per [`Direction`].
///
/// Off-grid slots hold `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    slots: [Option<usize>; 6],
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> Option<usize> {
        self.slots[direction.slot()]
    }

    /// Present neighbors in flood-fill priority order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.iter().any(|neighbor| neighbor == index)
    }
}

/// Dimensions of a hex grid plus the pure functions over them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexGrid {
    width: usize,
    height: usize,
}

impl HexGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Flat indices of the tiles in `row`.
    pub fn row(&self, row: usize) -> std::ops::Range<usize> {
        let start = row * self.width;
        start..start + self.width
    }

    pub fn neighbors(&self, index: usize) -> Neighbors {
        let pos = self.position_of(index);
        let mut neighbors = Neighbors::default();
        for (direction, neighbor) in pos.neighbors() {
            neighbors.slots[direction.slot()] = self.index_of(neighbor);
        }
        neighbors
    }

    /// Centre of the tile at `index`, in the same units as `diameter`.
    pub fn anchor(&self, index: usize, diameter: f64) -> Point {
        let pos = self.position_of(index);
        let (col, row) = (f64::from(pos.x), f64::from(pos.y));
        let hex_width = diameter * HEX_WIDTH_FACTOR;
        let origin = hex_width / 2.0;

        let x = if pos.is_odd_row() {
            (col * diameter + diameter / 2.0) * HEX_WIDTH_FACTOR + origin
        } else {
            col * hex_width + origin
        };
        let y = row * diameter * ROW_SPACING + diameter / 2.0;

        Point::new(x, y)
    }

    /// The tile whose anchor is nearest to `cursor`, provided the cursor lies
    /// within half a diameter of it.
    ///
    /// Tiles are scanned in row-major index order rather than column by
    /// column, so on a tie the lowest index wins.
    pub fn hit_test(&self, cursor: Point, diameter: f64) -> Option<usize> {
        let distances = (0..self.len())
            .map(|index| (index, self.anchor(index, diameter).distance(cursor)));
        nearest_within(distances, diameter / 2.0)
    }

    /// Centre followed by the six corners of a tile centred on the origin.
    ///
    /// Renderers build one mesh and translate it to each tile's anchor:
    ///
    /// ```
    /// use hexsweeper::{HexGrid, Point};
    ///
    /// let grid = HexGrid::new(3, 2);
    /// let anchor = grid.anchor(4, 0.5);
    /// let mesh = HexGrid::hexagon_vertices(0.5)
    ///     .map(|v| Point::new(v.x + anchor.x, v.y + anchor.y));
    ///
    /// assert_eq!(mesh[0], anchor);
    /// assert!(mesh[1..]
    ///     .iter()
    ///     .all(|corner| (corner.distance(anchor) - 0.25).abs() < 1e-9));
    /// ```
    pub fn hexagon_vertices(diameter: f64) -> [Point; 7] {
        let (sin, cos) = std::f64::consts::FRAC_PI_3.sin_cos();
        let mut vertices = [Point::default(); 7];
        vertices[1] = Point::new(0.0, diameter / 2.0);
        for i in 2..vertices.len() {
            let prev = vertices[i - 1];
            vertices[i] = Point::new(prev.x * cos - prev.y * sin, prev.x * sin + prev.y * cos);
        }
        vertices
    }

    /// Diameter that fits `width` tiles across a viewport two units wide.
    pub fn fit_diameter(width: usize) -> f64 {
        let span = width as f64 * HEX_WIDTH_FACTOR;
        (2.0 - (2.0 / span) * 0.5) / span
    }
}

/// First candidate at the smallest distance within `radius`. A later
/// candidate only takes over when it is strictly closer.
fn nearest_within(candidates: impl Iterator<Item = (usize, f64)>, radius: f64) -> Option<usize> {
    candidates
        .filter(|&(_, distance)| distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
