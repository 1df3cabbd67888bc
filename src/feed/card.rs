use chrono::{DateTime, Utc};
use serde::Serialize;

use super::post::Post;
use crate::interactions::InteractionRecord;

/// Everything a post card renders: the post plus its interaction record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCard {
    #[serde(flatten)]
    pub post: Post,
    pub likes: u64,
    pub shares: u64,
    pub is_liked: bool,
    pub time_label: String,
}

impl PostCard {
    pub fn new(post: Post, record: InteractionRecord, now: DateTime<Utc>) -> Self {
        let time_label = format_relative_time(post.timestamp(), now);
        Self {
            post,
            likes: record.likes,
            shares: record.shares,
            is_liked: record.is_liked,
            time_label,
        }
    }
}

/// Coarse "how long ago" label
///
/// Timestamps in the future read as "Just now".
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}
