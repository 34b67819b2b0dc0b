use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GameError {
    #[error("Grid dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Mine density {0} is outside [0, 1)")]
    InvalidMineDensity(f64),
    #[error("Hexagon diameter {0} must be positive and finite")]
    InvalidDiameter(f64),
    #[error("Tile index {0} is out of bounds")]
    OutOfBounds(usize),
    #[error("Cannot sweep or flag while a reveal or failure sequence is running")]
    InvalidGameState,
}
