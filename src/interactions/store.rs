use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::storage::KeyValueStore;

/// Storage key prefix for per-post interaction records
pub const INTERACTIONS_KEY_PREFIX: &str = "post-interactions-";

/// Per-post like/share counters and the current user's like state
///
/// Serialized as `{"likes": n, "shares": n, "isLiked": bool}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub likes: u64,
    pub shares: u64,
    pub is_liked: bool,
}

impl InteractionRecord {
    /// Flip the like state, moving the counter with it
    fn toggled(self) -> Self {
        if self.is_liked {
            Self {
                likes: self.likes.saturating_sub(1),
                is_liked: false,
                ..self
            }
        } else {
            Self {
                likes: self.likes.saturating_add(1),
                is_liked: true,
                ..self
            }
        }
    }

    fn shared(self) -> Self {
        Self {
            shares: self.shares.saturating_add(1),
            ..self
        }
    }
}

/// Build the storage key for a post's interaction record
pub fn interaction_key(post_id: &str) -> String {
    format!("{}{}", INTERACTIONS_KEY_PREFIX, post_id)
}

/// Reads and mutates interaction records in a KeyValueStore
///
/// Mutations from this process are serialized through a write lock so two
/// concurrent toggles cannot lose an update. Other processes sharing the same
/// storage are not coordinated: last writer wins.
#[derive(Clone)]
pub struct InteractionStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl InteractionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current record for `post_id`, defaulting to zeros when none is stored
    ///
    /// Never writes. A stored value that does not decode as a record is
    /// logged and treated as absent.
    pub async fn get(&self, post_id: &str) -> Result<InteractionRecord, AppError> {
        let key = interaction_key(post_id);
        let stored = self.kv.get(&key).await.map_err(AppError::Storage)?;

        let record = match stored {
            Some(value) => match serde_json::from_value::<InteractionRecord>(value) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(post_id, error = %e, "Ignoring malformed interaction record");
                    InteractionRecord::default()
                }
            },
            None => InteractionRecord::default(),
        };

        Ok(record)
    }

    /// Flip `is_liked` for `post_id` and persist the whole record
    pub async fn toggle_like(&self, post_id: &str) -> Result<InteractionRecord, AppError> {
        self.update(post_id, InteractionRecord::toggled).await
    }

    /// Add one share to `post_id` and persist the whole record
    pub async fn increment_share(&self, post_id: &str) -> Result<InteractionRecord, AppError> {
        self.update(post_id, InteractionRecord::shared).await
    }

    async fn update<F>(&self, post_id: &str, apply: F) -> Result<InteractionRecord, AppError>
    where
        F: FnOnce(InteractionRecord) -> InteractionRecord,
    {
        let _guard = self.write_lock.lock().await;

        let updated = apply(self.get(post_id).await?);
        let value = serde_json::to_value(updated)?;
        self.kv
            .set(&interaction_key(post_id), value)
            .await
            .map_err(AppError::Storage)?;

        tracing::debug!(
            post_id,
            likes = updated.likes,
            shares = updated.shares,
            is_liked = updated.is_liked,
            "Interaction record saved"
        );
        Ok(updated)
    }
}
