use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A published photo
///
/// Fields are private so every post, deserialized ones included, goes
/// through `Post::new`: the image is non-empty and the caption is trimmed
/// and non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PostRecord")]
pub struct Post {
    id: String,
    image: String,
    caption: String,
    poi: Option<String>,
    timestamp: DateTime<Utc>,
    username: Option<String>,
}

/// Unvalidated wire form of a post
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostRecord {
    id: String,
    image: String,
    caption: String,
    #[serde(default)]
    poi: Option<String>,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    username: Option<String>,
}

impl TryFrom<PostRecord> for Post {
    type Error = AppError;

    fn try_from(record: PostRecord) -> Result<Self, Self::Error> {
        Post::new(
            record.id,
            record.image,
            &record.caption,
            record.poi,
            record.timestamp,
            record.username,
        )
    }
}

/// Fields the upload form hands to the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub image: String,
    pub caption: String,
    pub poi: Option<String>,
}

impl Post {
    /// Validate and build a post
    ///
    /// The caption is stored trimmed. Fails when the image is empty or the
    /// caption is blank.
    pub fn new(
        id: impl Into<String>,
        image: impl Into<String>,
        caption: &str,
        poi: Option<String>,
        timestamp: DateTime<Utc>,
        username: Option<String>,
    ) -> Result<Self, AppError> {
        let image = image.into();
        if image.trim().is_empty() {
            return Err(AppError::InvalidPost("image is empty".to_string()));
        }

        let caption = caption.trim();
        if caption.is_empty() {
            return Err(AppError::InvalidPost("caption is empty".to_string()));
        }

        let poi = poi.filter(|p| !p.trim().is_empty());

        Ok(Self {
            id: id.into(),
            image,
            caption: caption.to_string(),
            poi,
            timestamp,
            username,
        })
    }

    /// Unique identifier (UUID v4 for user posts, `seed-N` for seed posts)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Image as a data URI or URL path
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Place label, if the post was geotagged
    pub fn poi(&self) -> Option<&str> {
        self.poi.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Build a user post with a fresh random id, stamped `now`
    pub fn publish(new_post: NewPost, now: DateTime<Utc>) -> Result<Self, AppError> {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            new_post.image,
            &new_post.caption,
            new_post.poi,
            now,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_is_trimmed() {
        let post = Post::new("1", "data:image/png;base64,AA==", "  Hello  ", None, Utc::now(), None).unwrap();
        assert_eq!(post.caption(), "Hello");
    }

    #[test]
    fn test_blank_caption_rejected() {
        let err = Post::new("1", "img1", " \n\t ", None, Utc::now(), None).unwrap_err();
        assert!(matches!(err, AppError::InvalidPost(_)));
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(Post::new("1", "", "Hello", None, Utc::now(), None).is_err());
    }

    #[test]
    fn test_blank_poi_dropped() {
        let post = Post::new("1", "img1", "Hello", Some("  ".to_string()), Utc::now(), None).unwrap();
        assert_eq!(post.poi(), None);
    }

    #[test]
    fn test_publish_assigns_unique_ids() {
        let now = Utc::now();
        let new_post = NewPost {
            image: "img1".to_string(),
            caption: "Hello".to_string(),
            poi: Some("Goa, India".to_string()),
        };

        let a = Post::publish(new_post.clone(), now).unwrap();
        let b = Post::publish(new_post, now).unwrap();

        assert_ne!(a.id(), b.id(), "same-instant posts must not collide");
        assert_eq!(a.timestamp(), now);
        assert_eq!(a.poi(), Some("Goa, India"));
        assert!(uuid::Uuid::parse_str(a.id()).is_ok());
    }

    #[test]
    fn test_serializes_camel_case() {
        let post = Post::new("seed-1", "/a.png", "Hi", None, Utc::now(), Some("raj".to_string())).unwrap();
        let value = serde_json::to_value(&post).unwrap();
        assert!(value.get("timestamp").is_some());
        assert_eq!(value["username"], "raj");
        assert_eq!(value["poi"], serde_json::Value::Null);
    }

    #[test]
    fn test_deserialize_validates() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "image": "/a.png",
            "caption": "  Hi  ",
            "timestamp": "2026-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(post.caption(), "Hi");
        assert_eq!(post.poi(), None);

        let blank = serde_json::from_value::<Post>(serde_json::json!({
            "id": "p2",
            "image": "/a.png",
            "caption": "  ",
            "timestamp": "2026-03-01T10:00:00Z"
        }));
        assert!(blank.is_err());

        let no_image = serde_json::from_value::<Post>(serde_json::json!({
            "id": "p3",
            "image": "",
            "caption": "Hi",
            "timestamp": "2026-03-01T10:00:00Z"
        }));
        assert!(no_image.is_err());
    }

    #[test]
    fn test_serialize_then_deserialize_keeps_post() {
        let post = Post::new("p1", "/a.png", "Hi", Some("Goa, India".to_string()), Utc::now(), None).unwrap();
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(serde_json::from_value::<Post>(value).unwrap(), post);
    }
}
