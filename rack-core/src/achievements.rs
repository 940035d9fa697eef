use chrono::{DateTime, Utc};
use rack_types::{
    Achievement, AchievementCategory, AchievementProgress, AchievementState, PlayerStats,
    Requirement,
};
use std::collections::HashMap;
use tracing::info;

/// Bumped whenever catalog entries are added, removed or retargeted
pub const CATALOG_VERSION: u32 = 1;

pub const NEXT_ACHIEVEMENTS_COUNT: usize = 3;
pub const DEFAULT_RECENT_COUNT: usize = 5;

fn entry(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    category: AchievementCategory,
    requirement: Requirement,
    points: u32,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        category,
        requirement,
        points,
        unlocked: false,
        unlock_date: None,
    }
}

/// The master catalog, every entry locked
#[rustfmt::skip]
pub fn achievement_catalog() -> Vec<Achievement> {
    use AchievementCategory::*;
    use Requirement::*;

    vec![
        entry("first_words", "Getting Started", "Find your first 10 words", "🎯", Words, WordCount(10), 10),
        entry("word_collector", "Word Collector", "Find 100 words", "📚", Words, WordCount(100), 25),
        entry("word_master", "Word Master", "Find 500 words", "👑", Words, WordCount(500), 50),
        entry("vocabulary_expert", "Vocabulary Expert", "Find 1000 words", "🏆", Words, WordCount(1000), 100),
        entry("first_score", "First Points", "Score your first 50 points", "⭐", Score, TotalScore(50), 10),
        entry("high_scorer", "High Scorer", "Score 500 total points", "💎", Score, TotalScore(500), 30),
        entry("point_master", "Point Master", "Score 2000 total points", "💫", Score, TotalScore(2000), 75),
        entry("daily_streak_3", "Consistent Player", "Complete daily challenge 3 days in a row", "🔥", Daily, DailyStreak(3), 20),
        entry("daily_streak_7", "Weekly Warrior", "Complete daily challenge 7 days in a row", "⚡", Daily, DailyStreak(7), 50),
        entry("daily_streak_30", "Month Master", "Complete daily challenge 30 days in a row", "🌟", Daily, DailyStreak(30), 150),
        entry("bingo", "Bingo!", "Find a 7-letter word", "🎰", Special, WordLength(7), 25),
        entry("perfect_game", "Perfect Game", "Find all possible words in a game", "💯", Special, PerfectGame(1), 40),
        entry("speed_demon", "Speed Demon", "Find 10 words in under 60 seconds", "⚡", Special, SpeedChallenge(10), 30),
        entry("no_hints", "Independent Player", "Complete a game without using hints", "🦅", Special, NoHints(1), 15),
        entry("hard_mode", "Challenge Accepted", "Complete a game on Hard difficulty", "💪", Difficulty, HardComplete(1), 20),
        entry("expert_mode", "Word Expert", "Complete a game on Expert difficulty", "🧠", Difficulty, ExpertComplete(1), 50),
    ]
}

/// Overlay saved unlock state onto the catalog by id.
///
/// Only `unlocked` and `unlock_date` come from the saved side. Saved ids the catalog does
/// not know are dropped; catalog entries without saved state stay locked.
pub fn merge_saved_state(catalog: Vec<Achievement>, saved: &[AchievementState]) -> Vec<Achievement> {
    let saved_by_id: HashMap<&str, &AchievementState> =
        saved.iter().map(|state| (state.id.as_str(), state)).collect();

    catalog
        .into_iter()
        .map(|mut achievement| {
            if let Some(state) = saved_by_id.get(achievement.id.as_str()) {
                achievement.unlocked = state.unlocked;
                achievement.unlock_date = state.unlock_date;
            }
            achievement
        })
        .collect()
}

/// The persistable projection of a merged catalog
pub fn saved_state(achievements: &[Achievement]) -> Vec<AchievementState> {
    achievements.iter().map(AchievementState::from).collect()
}

/// Measurable progress toward a requirement, or `None` for kinds nothing tracks yet
fn measured(requirement: &Requirement, stats: &PlayerStats, streak: u32) -> Option<u64> {
    match requirement {
        Requirement::WordCount(_) => Some(stats.total_words_found),
        Requirement::TotalScore(_) => Some(stats.total_score),
        Requirement::DailyStreak(_) => Some(u64::from(streak)),
        Requirement::WordLength(_)
        | Requirement::PerfectGame(_)
        | Requirement::SpeedChallenge(_)
        | Requirement::NoHints(_)
        | Requirement::HardComplete(_)
        | Requirement::ExpertComplete(_) => None,
    }
}

pub struct ProgressEvaluator;

impl ProgressEvaluator {
    pub fn is_satisfied(requirement: &Requirement, stats: &PlayerStats, streak: u32) -> bool {
        measured(requirement, stats, streak)
            .is_some_and(|value| value >= u64::from(requirement.target()))
    }

    /// Unlock every locked achievement whose requirement now holds.
    ///
    /// Returns the newly unlocked entries in catalog order. Already unlocked entries are
    /// never touched, so calling this again with the same inputs returns nothing.
    pub fn evaluate(
        catalog: &mut [Achievement],
        stats: &PlayerStats,
        streak: u32,
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        let mut newly_unlocked = Vec::new();

        for achievement in catalog.iter_mut().filter(|a| !a.unlocked) {
            if Self::is_satisfied(&achievement.requirement, stats, streak) {
                achievement.unlocked = true;
                achievement.unlock_date = Some(now);
                info!("Achievement unlocked: {} ({})", achievement.name, achievement.id);
                newly_unlocked.push(achievement.clone());
            }
        }

        newly_unlocked
    }

    /// Rounded percentage toward the target, capped at 100; untracked kinds report 0
    pub fn progress_percent(achievement: &Achievement, stats: &PlayerStats, streak: u32) -> u32 {
        let target = u64::from(achievement.requirement.target());
        match measured(&achievement.requirement, stats, streak) {
            Some(_) if target == 0 => 100,
            Some(value) => {
                let percent = (value as f64 / target as f64 * 100.0).min(100.0);
                percent.round() as u32
            }
            None => 0,
        }
    }

    pub fn with_progress(
        achievements: &[Achievement],
        stats: &PlayerStats,
        streak: u32,
    ) -> Vec<AchievementProgress> {
        achievements
            .iter()
            .map(|achievement| AchievementProgress {
                achievement: achievement.clone(),
                progress_percent: Self::progress_percent(achievement, stats, streak),
            })
            .collect()
    }
}

pub fn total_points(achievements: &[Achievement]) -> u32 {
    achievements
        .iter()
        .filter(|a| a.unlocked)
        .map(|a| a.points)
        .sum()
}

pub fn completion_percentage(achievements: &[Achievement]) -> u32 {
    if achievements.is_empty() {
        return 0;
    }
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    (unlocked as f64 / achievements.len() as f64 * 100.0).round() as u32
}

/// Most recently unlocked first; entries without an unlock date are skipped
pub fn recent_achievements(achievements: &[Achievement], count: usize) -> Vec<Achievement> {
    let mut recent: Vec<&Achievement> = achievements
        .iter()
        .filter(|a| a.unlocked && a.unlock_date.is_some())
        .collect();
    recent.sort_by(|a, b| b.unlock_date.cmp(&a.unlock_date));
    recent.into_iter().take(count).cloned().collect()
}

/// The closest locked goals, smallest target first
pub fn next_achievements(achievements: &[Achievement]) -> Vec<Achievement> {
    let mut locked: Vec<&Achievement> = achievements.iter().filter(|a| !a.unlocked).collect();
    locked.sort_by_key(|a| a.requirement.target());
    locked
        .into_iter()
        .take(NEXT_ACHIEVEMENTS_COUNT)
        .cloned()
        .collect()
}

/// A fresh, fully locked catalog
pub fn reset_achievements() -> Vec<Achievement> {
    info!("Resetting achievements to catalog version {}", CATALOG_VERSION);
    achievement_catalog()
}
