pub mod achievement_repository;
pub mod challenge_repository;
pub mod stats_repository;

pub use achievement_repository::*;
pub use challenge_repository::*;
pub use stats_repository::*;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::store::{KeyValueStore, StoreError};

pub const DEFAULT_PROFILE: &str = "default";

/// Storage key for one of a profile's blobs
pub fn scoped_key(profile: &str, name: &str) -> String {
    format!("{}:{}", profile, name)
}

/// Read and decode a blob. Absent or undecodable blobs yield the default value.
pub(crate) async fn load_blob<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("Discarding malformed blob at {}: {}", key, e);
            Ok(T::default())
        }
    }
}

pub(crate) async fn save_blob<T>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError>
where
    T: Serialize,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw).await
}
