use serde::{Deserialize, Serialize};

use crate::*;

/// Cumulative win/loss record across games.
///
/// Loading and saving are left to the owner; the type only accumulates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub wins: u32,
    pub losses: u32,
    /// Running average duration in whole seconds, truncated.
    pub average_seconds: u32,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn games_played(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }

    /// Fraction of games won, 0 before the first game.
    pub fn win_ratio(&self) -> f64 {
        match self.games_played() {
            0 => 0.0,
            games => f64::from(self.wins) / f64::from(games),
        }
    }

    pub fn record(&mut self, outcome: &GameOutcome) {
        if outcome.won {
            self.wins = self.wins.saturating_add(1);
        } else {
            self.losses = self.losses.saturating_add(1);
        }

        let games = u64::from(self.games_played());
        let previous_total = u64::from(self.average_seconds) * (games - 1);
        let average = (previous_total + u64::from(outcome.elapsed_seconds)) / games;
        self.average_seconds = u32::try_from(average).unwrap_or(u32::MAX);

        log::debug!(
            "recorded {} in {}s, now {}W/{}L avg {}s",
            if outcome.won { "win" } else { "loss" },
            outcome.elapsed_seconds,
            self.wins,
            self.losses,
            self.average_seconds
        );
    }
}

impl OutcomeObserver for Statistics {
    fn on_outcome(&mut self, outcome: &GameOutcome) {
        self.record(outcome);
    }
}
