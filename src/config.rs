use crate::hex::HexGrid;
use crate::GameError;

/// Construction parameters for a [`Game`](crate::Game).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Fraction of tiles to mine, in `[0, 1)`.
    pub mine_density: f64,
    /// Seed for mine placement; the same seed always yields the same boards.
    pub seed: u64,
    /// Tile diameter in screen units. `None` fits the grid width to a
    /// viewport two units wide.
    pub diameter: Option<f64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 11,
            height: 12,
            mine_density: 0.2,
            seed: 42069,
            diameter: None,
        }
    }
}

impl GameConfig {
    pub fn new(width: usize, height: usize, mine_density: f64) -> Result<Self, GameError> {
        let config = Self {
            width,
            height,
            mine_density,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = Some(diameter);
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.width == 0 || self.height == 0 || self.width.checked_mul(self.height).is_none() {
            return Err(GameError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..1.0).contains(&self.mine_density) {
            return Err(GameError::InvalidMineDensity(self.mine_density));
        }
        if let Some(diameter) = self.diameter {
            if !diameter.is_finite() || diameter <= 0.0 {
                return Err(GameError::InvalidDiameter(diameter));
            }
        }
        Ok(())
    }

    pub fn total_tiles(&self) -> usize {
        self.width * self.height
    }

    /// Number of mine placements per board, `floor(tiles * density)`.
    pub fn total_mines(&self) -> usize {
        (self.total_tiles() as f64 * self.mine_density) as usize
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
            .unwrap_or_else(|| HexGrid::fit_diameter(self.width))
    }
}
