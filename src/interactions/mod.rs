// Interactions module - per-post likes and shares persisted in a KeyValueStore

mod share;
mod store;

pub use share::{share_url, Clipboard, ShareOutcome, ShareRequest, ShareResult, ShareSheet, Sharer};
pub use store::{interaction_key, InteractionRecord, InteractionStore, INTERACTIONS_KEY_PREFIX};
