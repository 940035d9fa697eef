use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifetime totals read by the progress evaluator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerStats {
    pub total_words_found: u64,
    pub total_score: u64,
    pub games_played: u64,
}

/// What one submission adds to the lifetime totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsCredit {
    pub words_found: u64,
    pub score: u64,
    pub new_game: bool,
}

impl PlayerStats {
    pub fn record_game(&mut self, words_found: u64, score: u64) {
        self.apply_credit(StatsCredit {
            words_found,
            score,
            new_game: true,
        });
    }

    pub fn apply_credit(&mut self, credit: StatsCredit) {
        self.total_words_found = self.total_words_found.saturating_add(credit.words_found);
        self.total_score = self.total_score.saturating_add(credit.score);
        if credit.new_game {
            self.games_played = self.games_played.saturating_add(1);
        }
    }
}
