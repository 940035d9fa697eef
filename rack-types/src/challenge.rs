use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use ts_rs::TS;

use crate::{Rack, StatsCredit};

/// A date-keyed puzzle: the same date always carries the same letters and target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyChallenge {
    pub date: NaiveDate,
    #[ts(type = "Array<string | null>")]
    pub letters: Rack,
    pub target_score: u32,
    pub completed: bool,
    pub user_score: u32,
    pub found_words: BTreeSet<String>,
    pub completed_time: Option<DateTime<Utc>>,
    pub hints_used: u32,
    /// Submissions recorded for this date
    #[serde(default)]
    pub attempts: u32,
    /// Highest word count and score already counted toward lifetime stats
    #[serde(default)]
    pub credited_words: u64,
    #[serde(default)]
    pub credited_score: u32,
}

impl DailyChallenge {
    pub fn new(date: NaiveDate, letters: Rack, target_score: u32) -> Self {
        Self {
            date,
            letters,
            target_score,
            completed: false,
            user_score: 0,
            found_words: BTreeSet::new(),
            completed_time: None,
            hints_used: 0,
            attempts: 0,
            credited_words: 0,
            credited_score: 0,
        }
    }

    /// Overwrite the player-owned fields with a new submission (last write wins).
    ///
    /// Returns what the submission adds to lifetime stats: only the amount by which it beats
    /// everything already credited for this date, and a game only on the first submission.
    pub fn apply_submission(
        &mut self,
        submission: ChallengeSubmission,
        now: DateTime<Utc>,
    ) -> StatsCredit {
        self.user_score = submission.score;
        self.found_words = submission
            .found_words
            .into_iter()
            .map(|word| word.to_ascii_lowercase())
            .collect();
        self.hints_used = submission.hints_used;
        self.completed = self.user_score >= self.target_score;
        self.completed_time = if self.completed { Some(now) } else { None };

        let word_count = self.found_words.len() as u64;
        let credit = StatsCredit {
            words_found: word_count.saturating_sub(self.credited_words),
            score: u64::from(self.user_score.saturating_sub(self.credited_score)),
            new_game: self.attempts == 0,
        };
        self.attempts = self.attempts.saturating_add(1);
        self.credited_words = self.credited_words.max(word_count);
        self.credited_score = self.credited_score.max(self.user_score);
        credit
    }
}

/// Every daily challenge the player has seen, keyed by date
pub type ChallengeHistory = BTreeMap<NaiveDate, DailyChallenge>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChallengeSubmission {
    pub score: u32,
    pub found_words: Vec<String>,
    #[serde(default)]
    pub hints_used: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySummary {
    pub today: DailyChallenge,
    pub current_streak: u32,
    pub completion_rate: u32,
}
