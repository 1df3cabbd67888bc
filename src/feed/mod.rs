pub mod card;
pub mod controller;
pub mod post;
pub mod seed;

pub use card::{format_relative_time, PostCard};
pub use controller::FeedController;
pub use post::{NewPost, Post};
pub use seed::seed_posts;
