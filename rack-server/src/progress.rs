use chrono::{DateTime, NaiveDate, Utc};
use rack_core::{
    DEFAULT_RECENT_COUNT, ProgressEvaluator, completion_percentage, next_achievements,
    recent_achievements, total_points,
};
use rack_persistence::{
    AchievementRepository, ChallengeRepository, KeyValueStore, StatsRepository, StoreError,
};
use rack_types::{Achievement, AchievementProgress, ChallengeSubmission, DailySummary, PlayerStats};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub summary: DailySummary,
    pub newly_unlocked: Vec<Achievement>,
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementOverview {
    pub achievements: Vec<AchievementProgress>,
    pub total_points: u32,
    pub completion_percentage: u32,
    pub recent: Vec<Achievement>,
    pub next: Vec<Achievement>,
}

/// One profile's challenges, stats and achievements.
///
/// The repositories do whole-blob read-modify-write, so every operation that writes runs
/// under a single lock.
pub struct ProgressService {
    challenges: ChallengeRepository,
    achievements: AchievementRepository,
    stats: StatsRepository,
    write_lock: Mutex<()>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn KeyValueStore>, profile: &str) -> Self {
        Self {
            challenges: ChallengeRepository::new(store.clone(), profile),
            achievements: AchievementRepository::new(store.clone(), profile),
            stats: StatsRepository::new(store, profile),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn daily_summary(&self, today: NaiveDate) -> Result<DailySummary, StoreError> {
        let _guard = self.write_lock.lock().await;
        self.challenges.summary(today).await
    }

    /// Record today's result, credit any improvement to lifetime stats, then check for unlocks
    pub async fn submit_daily(
        &self,
        today: NaiveDate,
        submission: ChallengeSubmission,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, StoreError> {
        let _guard = self.write_lock.lock().await;

        let (_, credit) = self.challenges.submit(today, submission, now).await?;
        let stats = self.stats.apply_credit(credit).await?;

        let streak = self.challenges.current_streak(today).await?;
        let newly_unlocked = self.achievements.evaluate(&stats, streak, now).await?;
        if !newly_unlocked.is_empty() {
            info!("{} achievement(s) unlocked", newly_unlocked.len());
        }

        Ok(SubmitOutcome {
            summary: self.challenges.summary(today).await?,
            newly_unlocked,
            stats,
        })
    }

    pub async fn achievements(&self, today: NaiveDate) -> Result<AchievementOverview, StoreError> {
        let achievements = self.achievements.load().await?;
        let stats = self.stats.load().await?;
        let streak = self.challenges.current_streak(today).await?;

        Ok(AchievementOverview {
            achievements: ProgressEvaluator::with_progress(&achievements, &stats, streak),
            total_points: total_points(&achievements),
            completion_percentage: completion_percentage(&achievements),
            recent: recent_achievements(&achievements, DEFAULT_RECENT_COUNT),
            next: next_achievements(&achievements),
        })
    }

    pub async fn reset_achievements(&self) -> Result<Vec<Achievement>, StoreError> {
        let _guard = self.write_lock.lock().await;
        self.achievements.reset().await
    }

    pub async fn stats(&self) -> Result<PlayerStats, StoreError> {
        self.stats.load().await
    }
}
