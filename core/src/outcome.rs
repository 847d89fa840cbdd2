use serde::{Deserialize, Serialize};

/// Result of a finished game, reported once per terminal transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    pub elapsed_seconds: u32,
}

/// Something that wants to hear about the end of a game.
pub trait OutcomeObserver {
    fn on_outcome(&mut self, outcome: &GameOutcome);
}

impl<F> OutcomeObserver for F
where
    F: FnMut(&GameOutcome),
{
    fn on_outcome(&mut self, outcome: &GameOutcome) {
        self(outcome)
    }
}

/// What a single click did to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    Revealed,
    HitHazard(GameOutcome),
    Won(GameOutcome),
}

impl ClickOutcome {
    /// Whether the presentation needs to redraw
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitHazard(_) => true,
            Won(_) => true,
        }
    }

    pub const fn terminal(self) -> Option<GameOutcome> {
        match self {
            Self::HitHazard(outcome) | Self::Won(outcome) => Some(outcome),
            Self::NoChange | Self::Revealed => None,
        }
    }
}
