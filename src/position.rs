/// Offset coordinates of a tile: `x` is the column, `y` the row.
///
/// Odd rows sit half a tile further right than even rows, and rows grow
/// upwards, so "top" neighbors live on row `y + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// The six neighbor slots of a hex tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    /// All directions in the order the flood fill tries them.
    pub const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::Right,
        Direction::TopLeft,
        Direction::TopRight,
        Direction::BottomLeft,
        Direction::BottomRight,
    ];

    pub fn slot(self) -> usize {
        self as usize
    }
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_odd_row(&self) -> bool {
        self.y & 1 == 1
    }

    /// The neighbor in `direction`, which may lie outside any grid.
    pub fn neighbor(&self, direction: Direction) -> Position {
        let shift = i32::from(self.is_odd_row());
        // diagonal columns: even rows reach x-1 and x, odd rows x and x+1
        let left = self.x - 1 + shift;
        let right = self.x + shift;

        match direction {
            Direction::Left => Position::new(self.x - 1, self.y),
            Direction::Right => Position::new(self.x + 1, self.y),
            Direction::TopLeft => Position::new(left, self.y + 1),
            Direction::TopRight => Position::new(right, self.y + 1),
            Direction::BottomLeft => Position::new(left, self.y - 1),
            Direction::BottomRight => Position::new(right, self.y - 1),
        }
    }

    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| (direction, self.neighbor(direction)))
    }
}
