use chrono::{DateTime, Duration, Utc};

use super::post::Post;

struct SeedPost {
    id: &'static str,
    username: &'static str,
    image: &'static str,
    caption: &'static str,
    minutes_ago: i64,
    poi: &'static str,
}

const SEED_POSTS: &[SeedPost] = &[
    SeedPost {
        id: "seed-1",
        username: "raj_mountain_lover",
        image: "/mountain-sunset.png",
        caption: "Chasing sunsets and finding peace in the mountains 🏔️ Nothing beats this golden hour magic!",
        minutes_ago: 2 * 60,
        poi: "Himalayan Range, Himachal Pradesh, India",
    },
    SeedPost {
        id: "seed-2",
        username: "priya_coffee_queen",
        image: "/latte-art-coffee-cup.jpg",
        caption: "Perfect latte art to start my Monday ☕ This barista is an artist! #MondayMotivation",
        minutes_ago: 5 * 60,
        poi: "Blue Tokai Coffee, Mumbai, Maharashtra, India",
    },
    SeedPost {
        id: "seed-3",
        username: "arjun_street_artist",
        image: "/city-street-art-mural.jpg",
        caption: "Found this incredible street art during my morning walk 🎨 The city is full of hidden gems!",
        minutes_ago: 8 * 60,
        poi: "Lodhi Art District, New Delhi, India",
    },
    SeedPost {
        id: "seed-4",
        username: "kavya_foodie",
        image: "/colorful-fresh-salad-bowl.jpg",
        caption: "Healthy lunch goals achieved! 🥗 This rainbow bowl is almost too pretty to eat... almost 😋",
        minutes_ago: 12 * 60,
        poi: "Greenr Cafe, Bangalore, Karnataka, India",
    },
    SeedPost {
        id: "seed-5",
        username: "vikram_beach_boy",
        image: "/ocean-waves-on-sandy-beach.jpg",
        caption: "Ocean therapy session complete 🌊 The sound of waves is the best meditation",
        minutes_ago: 24 * 60,
        poi: "Goa Beach, Goa, India",
    },
    SeedPost {
        id: "seed-6",
        username: "ananya_bookworm",
        image: "/open-book-with-coffee-and-plants.jpg",
        caption: "Sunday reading corner vibes 📚 Getting lost in a good story with my favorite brew",
        minutes_ago: 36 * 60,
        poi: "Kitab Khana, Mumbai, Maharashtra, India",
    },
];

/// Demo posts, timestamped relative to `now`, in declaration order
pub fn seed_posts(now: DateTime<Utc>) -> Vec<Post> {
    SEED_POSTS
        .iter()
        .filter_map(|seed| {
            Post::new(
                seed.id,
                seed.image,
                seed.caption,
                Some(seed.poi.to_string()),
                now - Duration::minutes(seed.minutes_ago),
                Some(seed.username.to_string()),
            )
            .map_err(|e| tracing::warn!(id = seed.id, error = %e, "Skipping invalid seed post"))
            .ok()
        })
        .collect()
}
