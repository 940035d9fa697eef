use rack_types::{PlayerStats, StatsCredit};
use std::sync::Arc;
use tracing::debug;

use super::{load_blob, save_blob, scoped_key};
use crate::store::{KeyValueStore, StoreError};

const STATS_KEY: &str = "stats";

pub struct StatsRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl StatsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, profile: &str) -> Self {
        Self {
            store,
            key: scoped_key(profile, STATS_KEY),
        }
    }

    /// Lifetime totals; all zero when nothing has been recorded yet
    pub async fn load(&self) -> Result<PlayerStats, StoreError> {
        load_blob(self.store.as_ref(), &self.key).await
    }

    pub async fn apply_credit(&self, credit: StatsCredit) -> Result<PlayerStats, StoreError> {
        let mut stats = self.load().await?;
        if credit == StatsCredit::default() {
            return Ok(stats);
        }

        stats.apply_credit(credit);
        save_blob(self.store.as_ref(), &self.key, &stats).await?;
        debug!(
            "Credited {} words, {} points (new game: {})",
            credit.words_found, credit.score, credit.new_game
        );
        Ok(stats)
    }
}
