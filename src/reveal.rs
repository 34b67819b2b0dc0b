//! Resumable flood fill.
//!
//! The fill is a depth-first search over an explicit frontier stack. Each
//! call to [`RevealEngine::step`] reveals at most one new tile, so a frame
//! loop can animate a reveal across many frames without ever blocking.
//! Mine counts are computed when a tile is revealed, not up front.

use crate::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Idle,
    Active,
}

#[derive(Debug, Clone)]
pub struct RevealEngine {
    stack: Vec<usize>,
    capacity: usize,
}

impl RevealEngine {
    /// An idle engine whose stack can hold `capacity` tiles.
    pub fn new(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn state(&self) -> RevealState {
        if self.stack.is_empty() {
            RevealState::Idle
        } else {
            RevealState::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == RevealState::Active
    }

    /// Index of the top of the stack, `None` while idle.
    pub fn depth(&self) -> Option<usize> {
        self.stack.len().checked_sub(1)
    }

    /// The tile currently being examined.
    pub fn current(&self) -> Option<usize> {
        self.stack.last().copied()
    }

    /// Begins a fill at `index`, discarding any previous frontier.
    pub fn start(&mut self, index: usize) {
        log::debug!("starting reveal at tile {index}");
        self.stack.clear();
        self.push(index);
    }

    /// Advances the fill until it pushes one new frontier tile or finishes.
    pub fn step(&mut self, board: &mut Board) -> RevealState {
        if self.stack.is_empty() {
            return RevealState::Idle;
        }

        while let Some(index) = self.current() {
            let neighbors = board.grid().neighbors(index);
            let mines_found = board.count_charged(&neighbors);
            board.reveal_tile(index);

            if mines_found > 0 {
                // boundary tile, never expanded
                board.record_mine_count(index, mines_found);
                self.stack.pop();
                continue;
            }

            let next = neighbors.iter().find(|&n| board.tile(n).is_hidden());
            match next {
                Some(next) => {
                    self.push(next);
                    return RevealState::Active;
                }
                None => {
                    self.stack.pop();
                }
            }
        }

        log::debug!("reveal finished");
        RevealState::Idle
    }

    fn push(&mut self, index: usize) {
        if self.stack.len() >= self.capacity {
            panic!(
                "reveal stack overflow: depth {} exceeds a grid of {} tiles",
                self.stack.len(),
                self.capacity
            );
        }
        log::trace!("pushing tile {index} at depth {}", self.stack.len());
        self.stack.push(index);
    }
}
