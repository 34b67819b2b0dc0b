pub mod board;
pub mod config;
pub mod error;
pub mod failure;
pub mod game;
pub mod hex;
pub mod position;
pub mod reveal;

pub use board::{Board, Tile};
pub use config::GameConfig;
pub use error::GameError;
pub use failure::{FailurePhase, FailureSequencer};
pub use game::{Action, FrameInput, Game, GameState, RenderState, TileView};
pub use hex::{HexGrid, Neighbors, Point};
pub use position::{Direction, Position};
pub use reveal::{RevealEngine, RevealState};
