use chrono::{DateTime, Utc};
use rack_core::{ProgressEvaluator, achievement_catalog, merge_saved_state, saved_state};
use rack_types::{Achievement, AchievementState, PlayerStats};
use std::sync::Arc;

use super::{load_blob, save_blob, scoped_key};
use crate::store::{KeyValueStore, StoreError};

const ACHIEVEMENTS_KEY: &str = "achievements";

/// Persists only the unlock state; catalog text and points always come from code
pub struct AchievementRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl AchievementRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, profile: &str) -> Self {
        Self {
            store,
            key: scoped_key(profile, ACHIEVEMENTS_KEY),
        }
    }

    /// The catalog with this profile's unlock state applied
    pub async fn load(&self) -> Result<Vec<Achievement>, StoreError> {
        let saved: Vec<AchievementState> = load_blob(self.store.as_ref(), &self.key).await?;
        Ok(merge_saved_state(achievement_catalog(), &saved))
    }

    pub async fn save(&self, achievements: &[Achievement]) -> Result<(), StoreError> {
        save_blob(self.store.as_ref(), &self.key, &saved_state(achievements)).await
    }

    /// Unlock whatever the stats and streak now satisfy, persisting only when something changed
    pub async fn evaluate(
        &self,
        stats: &PlayerStats,
        streak: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<Achievement>, StoreError> {
        let mut achievements = self.load().await?;
        let newly_unlocked = ProgressEvaluator::evaluate(&mut achievements, stats, streak, now);
        if !newly_unlocked.is_empty() {
            self.save(&achievements).await?;
        }
        Ok(newly_unlocked)
    }

    pub async fn reset(&self) -> Result<Vec<Achievement>, StoreError> {
        let fresh = rack_core::reset_achievements();
        self.save(&fresh).await?;
        Ok(fresh)
    }
}
