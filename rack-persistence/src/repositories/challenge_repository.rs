use chrono::{DateTime, NaiveDate, Utc};
use rack_core::{ChallengeGenerator, StreakTracker};
use rack_types::{
    ChallengeHistory, ChallengeSubmission, DailyChallenge, DailySummary, StatsCredit,
};
use std::sync::Arc;
use tracing::info;

use super::{load_blob, save_blob, scoped_key};
use crate::store::{KeyValueStore, StoreError};

const CHALLENGES_KEY: &str = "daily_challenges";

/// Date-keyed challenge history for one profile, stored as a single blob.
///
/// Every mutation is a whole-blob read-modify-write; callers that share a profile across
/// tasks must serialize access themselves.
pub struct ChallengeRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl ChallengeRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, profile: &str) -> Self {
        Self {
            store,
            key: scoped_key(profile, CHALLENGES_KEY),
        }
    }

    pub async fn history(&self) -> Result<ChallengeHistory, StoreError> {
        load_blob(self.store.as_ref(), &self.key).await
    }

    async fn save_history(&self, history: &ChallengeHistory) -> Result<(), StoreError> {
        save_blob(self.store.as_ref(), &self.key, history).await
    }

    pub async fn find(&self, date: NaiveDate) -> Result<Option<DailyChallenge>, StoreError> {
        Ok(self.history().await?.remove(&date))
    }

    /// The stored challenge for `date`, generating and persisting it on first access
    pub async fn get_or_create(&self, date: NaiveDate) -> Result<DailyChallenge, StoreError> {
        let mut history = self.history().await?;
        if let Some(existing) = history.get(&date) {
            return Ok(existing.clone());
        }

        let challenge = ChallengeGenerator::generate(date);
        history.insert(date, challenge.clone());
        self.save_history(&history).await?;
        info!("Created daily challenge for {}", date);
        Ok(challenge)
    }

    /// Record a submission against `date`; a later submission replaces an earlier one.
    ///
    /// Also returns what the submission adds to lifetime stats.
    pub async fn submit(
        &self,
        date: NaiveDate,
        submission: ChallengeSubmission,
        now: DateTime<Utc>,
    ) -> Result<(DailyChallenge, StatsCredit), StoreError> {
        let mut history = self.history().await?;
        let challenge = history
            .entry(date)
            .or_insert_with(|| ChallengeGenerator::generate(date));
        let credit = challenge.apply_submission(submission, now);
        let updated = challenge.clone();

        self.save_history(&history).await?;
        info!(
            "Recorded submission for {}: score {} of {} ({})",
            date,
            updated.user_score,
            updated.target_score,
            if updated.completed { "completed" } else { "incomplete" }
        );
        Ok((updated, credit))
    }

    pub async fn current_streak(&self, today: NaiveDate) -> Result<u32, StoreError> {
        Ok(StreakTracker::current_streak(&self.history().await?, today))
    }

    pub async fn summary(&self, today: NaiveDate) -> Result<DailySummary, StoreError> {
        let today_challenge = self.get_or_create(today).await?;
        let history = self.history().await?;

        Ok(DailySummary {
            today: today_challenge,
            current_streak: StreakTracker::current_streak(&history, today),
            completion_rate: StreakTracker::completion_rate(&history),
        })
    }
}
