use crate::hex::{HexGrid, Neighbors};
use crate::{GameConfig, GameError};
use bitflags::bitflags;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

bitflags! {
    /// State of a single tile. A tile is revealed iff `HIDDEN` is absent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Tile: u8 {
        const HIDDEN = 1 << 0;
        const CHARGED = 1 << 1;
        const FLAGGED = 1 << 3;
    }
}

impl Tile {
    pub fn is_hidden(self) -> bool {
        self.contains(Tile::HIDDEN)
    }

    pub fn is_revealed(self) -> bool {
        !self.is_hidden()
    }

    pub fn is_charged(self) -> bool {
        self.contains(Tile::CHARGED)
    }

    pub fn is_flagged(self) -> bool {
        self.contains(Tile::FLAGGED)
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: HexGrid,
    tiles: Vec<Tile>,
    mine_counts: Vec<u8>,
    total_mines: usize,
    rng: StdRng,
}

impl Board {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let mut board = Self::empty(config, config.total_mines());
        board.place_mines(board.total_mines);
        Ok(board)
    }

    /// Builds a board with exactly the given tiles mined. Later re-plants
    /// draw from `seed` and place as many mines as there are distinct indices.
    pub fn from_mine_indices(
        width: usize,
        height: usize,
        mines: &[usize],
        seed: u64,
    ) -> Result<Self, GameError> {
        let config = GameConfig {
            width,
            height,
            seed,
            mine_density: 0.0,
            diameter: None,
        };
        config.validate()?;

        let mut board = Self::empty(&config, 0);
        for &index in mines {
            let tile = board
                .tiles
                .get_mut(index)
                .ok_or(GameError::OutOfBounds(index))?;
            tile.insert(Tile::CHARGED);
        }
        board.total_mines = board.charged_count();
        Ok(board)
    }

    fn empty(config: &GameConfig, total_mines: usize) -> Self {
        let grid = HexGrid::new(config.width, config.height);
        Self {
            grid,
            tiles: vec![Tile::HIDDEN; grid.len()],
            mine_counts: vec![0; grid.len()],
            total_mines,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Marks `count` uniformly sampled tiles as charged. Samples are drawn
    /// with replacement, so collisions leave fewer than `count` mined tiles.
    pub fn place_mines(&mut self, count: usize) {
        let len = self.tiles.len();
        for _ in 0..count {
            let index = self.rng.gen_range(0..len);
            self.tiles[index].insert(Tile::CHARGED);
        }
        log::debug!(
            "placed {} mines, {} distinct tiles charged",
            count,
            self.charged_count()
        );
    }

    /// Clears one row back to plain hidden tiles with no mine counts.
    pub fn reset_row(&mut self, row: usize) {
        for index in self.grid.row(row) {
            self.tiles[index] = Tile::HIDDEN;
            self.mine_counts[index] = 0;
        }
    }

    /// Clears every row. Mines are not re-placed.
    pub fn reset(&mut self) {
        for row in 0..self.grid.height() {
            self.reset_row(row);
        }
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.grid.width(), self.grid.height())
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range; see [`Board::get_tile`].
    pub fn tile(&self, index: usize) -> Tile {
        self.tiles[index]
    }

    pub fn get_tile(&self, index: usize) -> Result<Tile, GameError> {
        self.tiles
            .get(index)
            .copied()
            .ok_or(GameError::OutOfBounds(index))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Mine count recorded when the tile was revealed; 0 for unrevealed tiles.
    /// Panics if `index` is out of range.
    pub fn mine_count(&self, index: usize) -> u8 {
        self.mine_counts[index]
    }

    pub fn total_mines(&self) -> usize {
        self.total_mines
    }

    pub fn charged_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_charged()).count()
    }

    pub fn count_charged(&self, neighbors: &Neighbors) -> u8 {
        neighbors
            .iter()
            .filter(|&index| self.tiles[index].is_charged())
            .count() as u8
    }

    pub fn count_charged_neighbors(&self, index: usize) -> u8 {
        self.count_charged(&self.grid.neighbors(index))
    }

    /// Panics if `index` is out of range.
    pub fn toggle_flag(&mut self, index: usize) {
        self.tiles[index].toggle(Tile::FLAGGED);
    }

    pub(crate) fn reveal_tile(&mut self, index: usize) {
        self.tiles[index].remove(Tile::HIDDEN);
    }

    pub(crate) fn record_mine_count(&mut self, index: usize, count: u8) {
        self.mine_counts[index] = count;
    }

    /// Every mine is flagged and every other tile is revealed.
    pub fn is_won(&self) -> bool {
        self.tiles.iter().all(|tile| {
            let mine_flagged = !tile.is_charged() || tile.is_flagged();
            let safe_revealed = !tile.is_hidden() || tile.is_charged();
            mine_flagged && safe_revealed
        })
    }
}
