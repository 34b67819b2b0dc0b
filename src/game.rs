use crate::board::Tile;
use crate::failure::{FailurePhase, FailureSequencer};
use crate::hex::Point;
use crate::reveal::RevealEngine;
use crate::{Board, GameConfig, GameError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Revealing,
    Exploding,
    RePlanting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Sweep,
    Flag,
}

/// Input sampled by the front-end once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Cursor in the same units as the tile diameter, `None` when outside
    /// the window.
    pub cursor: Option<Point>,
    pub sweep: bool,
    pub flag: bool,
    pub reset: bool,
}

/// What a renderer needs to know to draw one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileView {
    pub index: usize,
    pub anchor: Point,
    pub hovered: bool,
    pub revealed: bool,
    pub charged: bool,
    pub flagged: bool,
    pub mine_count: u8,
    pub won: bool,
    /// The tile sits at the top of the flood-fill stack.
    pub searching: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Hidden,
    Flagged,
    Detonated,
    Revealed(u8),
}

impl TileView {
    pub fn render_state(&self) -> RenderState {
        match (self.revealed, self.charged, self.flagged) {
            (true, true, _) => RenderState::Detonated,
            (true, false, _) => RenderState::Revealed(self.mine_count),
            (false, _, true) => RenderState::Flagged,
            (false, _, false) => RenderState::Hidden,
        }
    }
}

/// Rising-edge detector for a button sampled once per frame.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonEdge {
    was_released: bool,
}

impl ButtonEdge {
    fn update(&mut self, pressed: bool) -> bool {
        let rising = self.was_released && pressed;
        self.was_released = !pressed;
        rising
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    reveal: RevealEngine,
    failure: FailureSequencer,
    diameter: f64,
    hovered: Option<usize>,
    won: bool,
    sweep: ButtonEdge,
    flag: ButtonEdge,
    reset: ButtonEdge,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let board = Board::new(&config)?;
        log::info!(
            "new {}x{} game, {} mines, seed {}",
            config.width,
            config.height,
            board.total_mines(),
            config.seed
        );
        Ok(Self::from_board(board, config.diameter()))
    }

    pub fn from_board(board: Board, diameter: f64) -> Self {
        Self {
            reveal: RevealEngine::new(board.len()),
            failure: FailureSequencer::new(),
            won: board.is_won(),
            board,
            diameter,
            hovered: None,
            sweep: ButtonEdge::default(),
            flag: ButtonEdge::default(),
            reset: ButtonEdge::default(),
        }
    }

    /// Runs one frame: advances whichever sequence is in progress, otherwise
    /// acts on fresh clicks, then re-evaluates the win condition.
    pub fn frame(&mut self, input: &FrameInput) -> GameState {
        self.hovered = input
            .cursor
            .and_then(|cursor| self.board.grid().hit_test(cursor, self.diameter));
        let sweep = self.sweep.update(input.sweep);
        let flag = self.flag.update(input.flag);
        let reset = self.reset.update(input.reset);

        if self.failure.is_failing() {
            self.failure.step(&mut self.board);
        } else if self.reveal.is_active() {
            self.reveal.step(&mut self.board);
        } else if reset {
            self.failure.replant();
        } else if let Some(index) = self.hovered {
            if sweep {
                self.sweep_tile(index);
            } else if flag {
                self.board.toggle_flag(index);
            }
        }

        self.check_win_condition();
        self.state()
    }

    /// Applies `action` to a tile directly, bypassing hit-testing.
    pub fn perform_action(&mut self, index: usize, action: Action) -> Result<(), GameError> {
        self.board.get_tile(index)?;
        if self.state() != GameState::Playing {
            return Err(GameError::InvalidGameState);
        }

        match action {
            Action::Sweep => self.sweep_tile(index),
            Action::Flag => self.board.toggle_flag(index),
        }
        self.check_win_condition();
        Ok(())
    }

    /// Feeds empty frames until no sequence is running. Returns the number
    /// of frames it took.
    pub fn advance_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.state() != GameState::Playing {
            self.frame(&FrameInput::default());
            frames += 1;
        }
        frames
    }

    fn sweep_tile(&mut self, index: usize) {
        let tile = self.board.tile(index);
        if tile.is_charged() && !tile.is_flagged() {
            self.failure.explode();
        } else if tile == Tile::HIDDEN {
            self.reveal.start(index);
        }
    }

    fn check_win_condition(&mut self) {
        let won = self.board.is_won();
        if won && !self.won {
            log::info!("board cleared");
        }
        self.won = won;
    }

    pub fn state(&self) -> GameState {
        match self.failure.phase() {
            FailurePhase::Exploding => GameState::Exploding,
            FailurePhase::RePlanting => GameState::RePlanting,
            FailurePhase::NotFailing if self.reveal.is_active() => GameState::Revealing,
            FailurePhase::NotFailing => GameState::Playing,
        }
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Centre of tile `index`. Indices past the grid extrapolate the layout.
    pub fn anchor(&self, index: usize) -> Point {
        self.board.grid().anchor(index, self.diameter)
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range. [`Game::tiles`] yields every view
    /// without indexing.
    pub fn tile_view(&self, index: usize) -> TileView {
        let tile = self.board.tile(index);
        TileView {
            index,
            anchor: self.anchor(index),
            hovered: self.hovered == Some(index),
            revealed: tile.is_revealed(),
            charged: tile.is_charged(),
            flagged: tile.is_flagged(),
            mine_count: self.board.mine_count(index),
            won: self.won,
            searching: self.reveal.current() == Some(index),
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = TileView> + '_ {
        (0..self.board.len()).map(move |index| self.tile_view(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(width: usize, height: usize, mines: &[usize]) -> Game {
        let board = Board::from_mine_indices(width, height, mines, 11).unwrap();
        Game::from_board(board, 1.0)
    }

    fn hover(game: &Game, index: usize) -> FrameInput {
        FrameInput {
            cursor: Some(game.anchor(index)),
            ..FrameInput::default()
        }
    }

    /// Releases every button for a frame, then presses as described.
    fn click(game: &mut Game, index: usize, action: Action) -> GameState {
        let idle = hover(game, index);
        game.frame(&idle);
        let pressed = match action {
            Action::Sweep => FrameInput { sweep: true, ..idle },
            Action::Flag => FrameInput { flag: true, ..idle },
        };
        game.frame(&pressed)
    }

    #[test]
    fn test_sweep_reveals_across_frames() {
        let mut game = game(4, 1, &[]);

        assert_eq!(click(&mut game, 0, Action::Sweep), GameState::Revealing);
        assert!(game.board().tile(0).is_hidden());
        assert!(game.tile_view(0).searching);

        let frames = game.advance_until_idle();
        assert_eq!(frames, 4);
        assert!(game.board().tiles().iter().all(|tile| tile.is_revealed()));
        assert!(game.is_won());
    }

    #[test]
    fn test_held_button_is_not_a_click() {
        let mut game = game(3, 1, &[]);
        let held = FrameInput {
            sweep: true,
            ..hover(&game, 1)
        };

        assert_eq!(game.frame(&held), GameState::Playing);
        assert_eq!(game.frame(&held), GameState::Playing);
        assert_eq!(game.hovered(), Some(1));

        game.frame(&hover(&game, 1));
        assert_eq!(game.frame(&held), GameState::Revealing);
    }

    #[test]
    fn test_mine_click_explodes_then_replants() {
        let mut game = game(3, 2, &[1, 4]);

        assert_eq!(click(&mut game, 1, Action::Sweep), GameState::Exploding);

        assert_eq!(game.frame(&FrameInput::default()), GameState::Exploding);
        assert!(game.board().tile(1).is_revealed());
        assert_eq!(game.tile_view(1).render_state(), RenderState::Detonated);

        assert_eq!(game.frame(&FrameInput::default()), GameState::RePlanting);
        assert!(game.board().tile(4).is_revealed());

        assert_eq!(game.frame(&FrameInput::default()), GameState::RePlanting);
        assert_eq!(game.frame(&FrameInput::default()), GameState::Playing);

        let board = game.board();
        assert!(board.tiles().iter().all(|tile| tile.is_hidden()));
        assert!((0..board.len()).all(|index| board.mine_count(index) == 0));
        assert!((1..=2).contains(&board.charged_count()));
        assert!(!game.is_won());
    }

    #[test]
    fn test_flag_toggle_round_trip() {
        let mut game = game(2, 2, &[3]);
        let before = game.board().tile(3);

        click(&mut game, 3, Action::Flag);
        assert!(game.board().tile(3).is_flagged());
        assert_eq!(game.tile_view(3).render_state(), RenderState::Flagged);

        click(&mut game, 3, Action::Flag);
        assert_eq!(game.board().tile(3), before);
    }

    #[test]
    fn test_sweep_ignores_flagged_tiles() {
        let mut game = game(3, 1, &[2]);

        click(&mut game, 0, Action::Flag);
        assert_eq!(click(&mut game, 0, Action::Sweep), GameState::Playing);
        assert!(game.board().tile(0).is_hidden());

        click(&mut game, 2, Action::Flag);
        assert_eq!(click(&mut game, 2, Action::Sweep), GameState::Playing);
        assert!(game.board().tile(2).is_hidden());
    }

    #[test]
    fn test_clicks_ignored_while_revealing() {
        let mut game = game(5, 1, &[]);

        click(&mut game, 0, Action::Sweep);
        assert_eq!(click(&mut game, 4, Action::Flag), GameState::Revealing);
        assert!(!game.board().tile(4).is_flagged());
    }

    #[test]
    fn test_reset_trigger_replants() {
        let mut game = game(3, 4, &[5]);
        click(&mut game, 0, Action::Flag);

        game.frame(&FrameInput::default());
        let reset = FrameInput {
            reset: true,
            ..FrameInput::default()
        };
        assert_eq!(game.frame(&reset), GameState::RePlanting);

        assert_eq!(game.advance_until_idle(), 4);
        assert!(!game.board().tile(0).is_flagged());
        assert_eq!(game.board().charged_count(), 1);
    }

    #[test]
    fn test_reset_does_not_interrupt_reveal() {
        let mut game = game(6, 1, &[]);
        click(&mut game, 0, Action::Sweep);

        let reset = FrameInput {
            reset: true,
            ..FrameInput::default()
        };
        game.frame(&FrameInput::default());
        assert_eq!(game.frame(&reset), GameState::Revealing);

        game.advance_until_idle();
        assert!(game.is_won());
    }

    #[test]
    fn test_perform_action() {
        let mut game = game(2, 1, &[0]);

        assert_eq!(
            game.perform_action(2, Action::Flag),
            Err(GameError::OutOfBounds(2))
        );

        game.perform_action(0, Action::Flag).unwrap();
        game.perform_action(1, Action::Sweep).unwrap();
        assert_eq!(
            game.perform_action(0, Action::Flag),
            Err(GameError::InvalidGameState)
        );

        game.advance_until_idle();
        assert!(game.is_won());
        assert!(game.tiles().all(|view| view.won));
        assert_eq!(game.tile_view(1).render_state(), RenderState::Revealed(1));
    }

    #[test]
    fn test_tile_views_follow_hover() {
        let mut game = game(3, 3, &[]);
        game.frame(&hover(&game, 4));

        let hovered: Vec<usize> = game
            .tiles()
            .filter(|view| view.hovered)
            .map(|view| view.index)
            .collect();
        assert_eq!(hovered, vec![4]);
        assert_eq!(game.tile_view(4).anchor, game.anchor(4));
        assert_eq!(game.tile_view(0).render_state(), RenderState::Hidden);

        game.frame(&FrameInput::default());
        assert_eq!(game.hovered(), None);
    }

    #[test]
    #[should_panic]
    fn test_tile_view_panics_out_of_range() {
        let game = game(2, 2, &[]);
        game.tile_view(4);
    }

    #[test]
    fn test_new_game_from_config() {
        let game = Game::new(GameConfig::default()).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.board().len(), 132);
        assert!(!game.is_won());

        let config = GameConfig {
            mine_density: 1.5,
            ..GameConfig::default()
        };
        assert_eq!(
            Game::new(config).unwrap_err(),
            GameError::InvalidMineDensity(1.5)
        );
    }
}
