use alloc::{boxed::Box, vec, vec::Vec};
use core::fmt;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Rules for one game: owns the board, places hazards on the first click,
/// reveals cells and reports the end of the game.
pub struct GameEngine<C: Clock = Stopwatch> {
    config: EngineConfig,
    board: Board,
    rng: SmallRng,
    clock: C,
    observers: Vec<Box<dyn OutcomeObserver>>,
    hazards_placed: bool,
    state: EngineState,
}

impl GameEngine<Stopwatch> {
    /// New game on a wall clock, seeded from the current time.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_seed(config, time_seed())
    }

    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self> {
        Self::with_clock(config, seed, Stopwatch::new())
    }
}

impl<C: Clock> GameEngine<C> {
    pub fn with_clock(config: EngineConfig, seed: u64, clock: C) -> Result<Self> {
        let config = config.validate()?;
        let board = Board::new(config.size)?;
        Ok(Self {
            config,
            board,
            rng: SmallRng::seed_from_u64(seed),
            clock,
            observers: Vec::new(),
            hazards_placed: false,
            state: Default::default(),
        })
    }

    /// Game with a fixed hazard layout, so the first click skips random placement.
    ///
    /// Repeated coordinates count once.
    pub fn with_layout(size: Coord, hazards: &[Coord2], clock: C) -> Result<Self> {
        let mut board = Board::new(size)?;
        for &coords in hazards {
            let coords = board.validate_coords(coords)?;
            if !board.state_at(coords).is_hazard() {
                plant_hazard(&mut board, coords);
            }
        }

        let config = EngineConfig {
            size,
            hazards: board.hazard_count(),
            placement: PlacementPolicy::FullBoard,
        };
        log::debug!("Fixed layout with {} hazards on {}x{}", config.hazards, size, size);

        Ok(Self {
            config,
            board,
            rng: SmallRng::seed_from_u64(0),
            clock,
            observers: Vec::new(),
            hazards_placed: true,
            state: Default::default(),
        })
    }

    /// Observers run in registration order, once, when the game ends.
    pub fn add_observer(&mut self, observer: impl OutcomeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn hazard_count(&self) -> CellCount {
        self.config.hazards
    }

    pub fn hazards_placed(&self) -> bool {
        self.hazards_placed
    }

    pub fn unrevealed_count(&self) -> CellCount {
        self.board.unrevealed_count()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.clock.elapsed_seconds()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Handles a player click: places hazards on the first one, reveals, then
    /// checks for a loss before checking for a win.
    pub fn click(&mut self, coords: Coord2) -> Result<ClickOutcome> {
        use ClickOutcome::*;

        let coords = self.board.validate_coords(coords)?;
        self.check_not_over()?;

        if !self.state.is_started() {
            self.start(coords);
        }

        let newly_revealed = self.reveal(coords);

        Ok(if self.board.state_at(coords).is_hazard() {
            HitHazard(self.finish(false))
        } else if self.check_win() {
            Won(self.finish(true))
        } else if newly_revealed > 0 {
            Revealed
        } else {
            NoChange
        })
    }

    /// Reveals `coords` and, from an empty cell, the whole connected empty
    /// region plus its numbered border. Returns how many cells were newly
    /// revealed. No game rules are applied.
    ///
    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn reveal(&mut self, coords: Coord2) -> CellCount {
        let mut newly_revealed: CellCount = 0;
        let mut pending = vec![coords];

        while let Some(visit_coords) = pending.pop() {
            if self.board.is_revealed(visit_coords) {
                continue;
            }

            self.board.set_revealed(visit_coords, true);
            newly_revealed += 1;

            if !self.board.state_at(visit_coords).is_empty() {
                continue;
            }
            log::trace!("Flood reached empty cell at {:?}", visit_coords);

            for neighbor in self.board.iter_neighbors(visit_coords) {
                if self.board.is_revealed(neighbor) {
                    continue;
                }
                if self.board.state_at(neighbor).is_empty() {
                    pending.push(neighbor);
                } else {
                    // numbered border, shown but not expanded
                    self.board.set_revealed(neighbor, true);
                    newly_revealed += 1;
                }
            }
        }

        newly_revealed
    }

    /// Won once no more cells are hidden than there are hazards.
    pub fn check_win(&self) -> bool {
        self.board.unrevealed_count() <= self.config.hazards
    }

    fn start(&mut self, safe: Coord2) {
        if !self.hazards_placed {
            self.place_hazards(safe);
        }
        self.clock.start();
        self.state = EngineState::InProgress;
        log::debug!("Game started at {:?}", safe);
    }

    /// Rejection-samples hazard positions, never on `safe` and never twice on
    /// the same cell. Config validation guarantees enough free cells.
    fn place_hazards(&mut self, safe: Coord2) {
        let bound = self.config.placement.draw_bound(self.board.size());
        let mut placed: CellCount = 0;

        while placed < self.config.hazards {
            let x = self.rng.random_range(0..bound);
            let y = self.rng.random_range(0..bound);
            let coords = (x, y);

            if coords == safe || self.board.state_at(coords).is_hazard() {
                continue;
            }

            plant_hazard(&mut self.board, coords);
            placed += 1;
        }

        self.hazards_placed = true;
        log::debug!(
            "Placed {} hazards away from {:?} ({:?})",
            placed,
            safe,
            self.config.placement
        );
    }

    fn finish(&mut self, won: bool) -> GameOutcome {
        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        self.clock.stop();

        let outcome = GameOutcome {
            won,
            elapsed_seconds: self.clock.elapsed_seconds(),
        };
        log::debug!("Game over: {:?}", outcome);

        for observer in &mut self.observers {
            observer.on_outcome(&outcome);
        }
        outcome
    }

    fn check_not_over(&self) -> Result<()> {
        if self.state.is_over() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl<C: Clock + fmt::Debug> fmt::Debug for GameEngine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("board", &self.board)
            .field("clock", &self.clock)
            .field("observers", &self.observers.len())
            .field("hazards_placed", &self.hazards_placed)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Turns `coords` into a hazard and bumps the tally of every non-hazard neighbour.
fn plant_hazard(board: &mut Board, coords: Coord2) {
    board.set_state(coords, CellState::Hazard);
    for neighbor in board.iter_neighbors(coords) {
        let state = board.state_at(neighbor);
        board.set_state(neighbor, state.incremented());
    }
}
