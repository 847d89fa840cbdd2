use serde::{Deserialize, Serialize};

use crate::*;

/// Hazards placed when nothing else is configured.
pub const DEFAULT_HAZARDS: CellCount = 10;

/// Which coordinates random hazard placement may draw from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPolicy {
    /// Draws from `[0, size - 1)` on both axes, so the last row and column
    /// never hold a hazard. This is the classic behaviour of the game.
    #[default]
    ExcludeLastLine,
    /// Draws from `[0, size)` on both axes.
    FullBoard,
}

impl PlacementPolicy {
    /// Exclusive upper bound for a random coordinate on a board of side `size`.
    pub const fn draw_bound(self, size: Coord) -> Coord {
        match self {
            Self::ExcludeLastLine => size.saturating_sub(1),
            Self::FullBoard => size,
        }
    }

    pub const fn placeable_cells(self, size: Coord) -> CellCount {
        square(self.draw_bound(size))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub size: Coord,
    pub hazards: CellCount,
    pub placement: PlacementPolicy,
}

impl EngineConfig {
    pub fn new(size: Coord, hazards: CellCount) -> Result<Self> {
        Self::validated(size, hazards, PlacementPolicy::default())
    }

    pub fn with_placement(self, placement: PlacementPolicy) -> Result<Self> {
        Self::validated(self.size, self.hazards, placement)
    }

    /// Re-checks a config whose public fields may have been edited directly.
    pub fn validate(self) -> Result<Self> {
        Self::validated(self.size, self.hazards, self.placement)
    }

    /// One placeable cell must stay free for the first click, otherwise
    /// placement could never finish.
    fn validated(size: Coord, hazards: CellCount, placement: PlacementPolicy) -> Result<Self> {
        if size == 0 {
            log::warn!("Rejected config with board size 0");
            return Err(GameError::InvalidSize);
        }
        let placeable = placement.placeable_cells(size);
        if hazards > 0 && hazards >= placeable {
            log::warn!(
                "Rejected config, requested {} hazards but only {} cells are placeable",
                hazards,
                placeable
            );
            return Err(GameError::TooManyHazards);
        }
        Ok(Self {
            size,
            hazards,
            placement,
        })
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            hazards: DEFAULT_HAZARDS,
            placement: PlacementPolicy::default(),
        }
    }
}
