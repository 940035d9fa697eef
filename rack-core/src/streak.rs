use chrono::NaiveDate;
use rack_types::ChallengeHistory;

/// How far back a streak is ever counted
pub const MAX_STREAK_LOOKBACK_DAYS: u32 = 365;

pub struct StreakTracker;

impl StreakTracker {
    /// Consecutive completed days ending at (and including) `today`
    pub fn current_streak(history: &ChallengeHistory, today: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut day = Some(today);

        while let Some(date) = day {
            if streak >= MAX_STREAK_LOOKBACK_DAYS {
                break;
            }
            match history.get(&date) {
                Some(challenge) if challenge.completed => {
                    streak += 1;
                    day = date.pred_opt();
                }
                _ => break,
            }
        }

        streak
    }

    /// Percentage of recorded challenges that were completed, rounded to the nearest integer
    pub fn completion_rate(history: &ChallengeHistory) -> u32 {
        if history.is_empty() {
            return 0;
        }
        let completed = history.values().filter(|c| c.completed).count();
        ((completed as f64 / history.len() as f64) * 100.0).round() as u32
    }
}
