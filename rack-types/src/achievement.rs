use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AchievementCategory {
    Words,
    Score,
    Daily,
    Special,
    Difficulty,
}

/// What an achievement asks of the player, with its typed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
#[ts(export)]
pub enum Requirement {
    WordCount(u32),
    TotalScore(u32),
    DailyStreak(u32),
    WordLength(u32),
    PerfectGame(u32),
    SpeedChallenge(u32),
    NoHints(u32),
    HardComplete(u32),
    ExpertComplete(u32),
}

impl Requirement {
    pub fn target(&self) -> u32 {
        match *self {
            Requirement::WordCount(target)
            | Requirement::TotalScore(target)
            | Requirement::DailyStreak(target)
            | Requirement::WordLength(target)
            | Requirement::PerfectGame(target)
            | Requirement::SpeedChallenge(target)
            | Requirement::NoHints(target)
            | Requirement::HardComplete(target)
            | Requirement::ExpertComplete(target) => target,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Requirement::WordCount(_) => "word_count",
            Requirement::TotalScore(_) => "total_score",
            Requirement::DailyStreak(_) => "daily_streak",
            Requirement::WordLength(_) => "word_length",
            Requirement::PerfectGame(_) => "perfect_game",
            Requirement::SpeedChallenge(_) => "speed_challenge",
            Requirement::NoHints(_) => "no_hints",
            Requirement::HardComplete(_) => "hard_complete",
            Requirement::ExpertComplete(_) => "expert_complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: AchievementCategory,
    pub requirement: Requirement,
    pub points: u32,
    pub unlocked: bool,
    pub unlock_date: Option<DateTime<Utc>>,
}

/// The user-owned part of an achievement, as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AchievementState {
    pub id: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub unlock_date: Option<DateTime<Utc>>,
}

impl From<&Achievement> for AchievementState {
    fn from(achievement: &Achievement) -> Self {
        AchievementState {
            id: achievement.id.clone(),
            unlocked: achievement.unlocked,
            unlock_date: achievement.unlock_date,
        }
    }
}

/// An achievement annotated with how close the player is to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AchievementProgress {
    pub achievement: Achievement,
    pub progress_percent: u32,
}
