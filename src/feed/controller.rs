use chrono::{DateTime, Utc};

use super::card::PostCard;
use super::post::{NewPost, Post};
use super::seed::seed_posts;
use crate::error::AppError;
use crate::interactions::InteractionStore;

/// In-memory timeline, newest first
///
/// Posts are only ever added. User posts go to the front; the seed list is
/// sorted once on construction.
#[derive(Debug, Default)]
pub struct FeedController {
    posts: Vec<Post>,
}

impl FeedController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed pre-populated with the demo posts
    pub fn with_seed_posts(now: DateTime<Utc>) -> Self {
        Self::from_posts(seed_posts(now))
    }

    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        Self { posts }
    }

    /// Prepend an already-built post
    pub fn add_post(&mut self, post: Post) {
        tracing::info!(post_id = post.id(), has_poi = post.poi().is_some(), "Feed: post published");
        self.posts.insert(0, post);
    }

    /// Validate a submission, stamp it `now`, and prepend it
    pub fn publish(&mut self, new_post: NewPost, now: DateTime<Utc>) -> Result<Post, AppError> {
        let post = Post::publish(new_post, now)?;
        self.add_post(post.clone());
        Ok(post)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id() == post_id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// One card per post, in feed order, each bound to its interaction record
    pub async fn cards(
        &self,
        interactions: &InteractionStore,
        now: DateTime<Utc>,
    ) -> Result<Vec<PostCard>, AppError> {
        let mut cards = Vec::with_capacity(self.posts.len());
        for post in &self.posts {
            let record = interactions.get(post.id()).await?;
            cards.push(PostCard::new(post.clone(), record, now));
        }
        Ok(cards)
    }
}
