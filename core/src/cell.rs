use serde::{Deserialize, Serialize};

/// Largest adjacency count a cell can carry, one per neighbour.
pub const MAX_COUNT: u8 = 8;

/// What a cell holds once hazards are in place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    /// No adjacent hazards.
    Empty,
    /// `1..=8` adjacent hazards.
    Count(u8),
    /// The cell itself is a hazard.
    Hazard,
}

impl CellState {
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Hazard)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of adjacent hazards, `None` for a hazard.
    pub const fn adjacent_hazards(self) -> Option<u8> {
        match self {
            Self::Empty => Some(0),
            Self::Count(count) => Some(count),
            Self::Hazard => None,
        }
    }

    /// Bumps the adjacency tally, leaving hazards untouched and saturating at 8.
    pub const fn incremented(self) -> Self {
        match self {
            Self::Empty => Self::Count(1),
            Self::Count(count) if count >= MAX_COUNT => Self::Count(MAX_COUNT),
            Self::Count(count) => Self::Count(count + 1),
            Self::Hazard => Self::Hazard,
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Empty
    }
}

/// A single board slot: its content plus whether the player can see it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub state: CellState,
    pub revealed: bool,
}
