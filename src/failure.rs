//! Explosion and re-plant sequence.
//!
//! Both phases change the board in small discrete steps, one detonated mine
//! or one cleared row per call, so a renderer sees the explosion and reset
//! play out over several frames.

use crate::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePhase {
    #[default]
    NotFailing,
    Exploding,
    RePlanting,
}

#[derive(Debug, Clone, Default)]
pub struct FailureSequencer {
    phase: FailurePhase,
    mine_cursor: usize,
    row_cursor: usize,
}

impl FailureSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FailurePhase {
        self.phase
    }

    pub fn is_failing(&self) -> bool {
        self.phase != FailurePhase::NotFailing
    }

    /// Starts detonating every mine on the board, then re-plants.
    pub fn explode(&mut self) {
        log::debug!("mine triggered, exploding");
        self.phase = FailurePhase::Exploding;
        self.mine_cursor = 0;
    }

    /// Skips straight to clearing and re-planting the board.
    pub fn replant(&mut self) {
        log::debug!("resetting board");
        self.enter_replanting();
    }

    pub fn step(&mut self, board: &mut Board) -> FailurePhase {
        match self.phase {
            FailurePhase::NotFailing => {}
            FailurePhase::Exploding => self.detonate_next(board),
            FailurePhase::RePlanting => self.clear_next_row(board),
        }
        self.phase
    }

    fn detonate_next(&mut self, board: &mut Board) {
        let len = board.len();
        let charged_from = |start: usize| (start..len).find(|&i| board.tile(i).is_charged());

        self.mine_cursor = match charged_from(self.mine_cursor) {
            Some(index) => {
                // skip ahead so the last detonation also ends the phase
                let next = charged_from(index + 1).unwrap_or(len);
                board.reveal_tile(index);
                next
            }
            None => len,
        };

        if self.mine_cursor >= len {
            self.enter_replanting();
        }
    }

    fn clear_next_row(&mut self, board: &mut Board) {
        board.reset_row(self.row_cursor);
        self.row_cursor += 1;

        if self.row_cursor >= board.grid().height() {
            board.place_mines(board.total_mines());
            self.row_cursor = 0;
            self.phase = FailurePhase::NotFailing;
            log::debug!("board re-planted");
        }
    }

    fn enter_replanting(&mut self) {
        self.phase = FailurePhase::RePlanting;
        self.mine_cursor = 0;
        self.row_cursor = 0;
    }
}
