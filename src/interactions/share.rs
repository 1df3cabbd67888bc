use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::store::{InteractionRecord, InteractionStore};
use crate::error::AppError;

/// Payload handed to a native share sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub title: String,
    pub url: String,
}

/// Platform share sheet (the OS "Share…" dialog)
#[async_trait]
pub trait ShareSheet: Send + Sync {
    /// Whether the platform offers a share sheet at all
    fn is_available(&self) -> bool;

    /// Present the share sheet. Err when the user dismisses it or the platform refuses.
    async fn share(&self, request: &ShareRequest) -> Result<(), String>;
}

/// System clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), String>;
}

/// How a share attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareOutcome {
    /// The native share sheet completed
    Shared,
    /// The link was copied to the clipboard instead
    Copied,
    /// Neither path worked; nothing was counted
    Failed,
}

/// Result of `Sharer::share_post`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResult {
    pub outcome: ShareOutcome,
    pub url: String,
    pub interactions: InteractionRecord,
}

/// Build the link that opens a single post: `{origin}?post={post_id}`
pub fn share_url(origin: &str, post_id: &str) -> String {
    format!("{}?post={}", origin.trim_end_matches('/'), post_id)
}

/// Shares posts through the share sheet, falling back to the clipboard,
/// and counts successful shares in the InteractionStore.
pub struct Sharer {
    store: InteractionStore,
    share_sheet: Option<Arc<dyn ShareSheet>>,
    clipboard: Option<Arc<dyn Clipboard>>,
    origin: String,
    title: String,
}

impl Sharer {
    pub fn new(store: InteractionStore, origin: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            store,
            share_sheet: None,
            clipboard: None,
            origin: origin.into(),
            title: title.into(),
        }
    }

    pub fn with_share_sheet(mut self, share_sheet: Arc<dyn ShareSheet>) -> Self {
        self.share_sheet = Some(share_sheet);
        self
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// Share a post and count the share if it went through
    ///
    /// Tries the share sheet first; if it is missing, unavailable or fails,
    /// copies the link to the clipboard. When both paths fail the failure is
    /// logged and `ShareOutcome::Failed` is returned with the unchanged
    /// record. Only storage errors are returned as `Err`.
    pub async fn share_post(&self, post_id: &str) -> Result<ShareResult, AppError> {
        let url = share_url(&self.origin, post_id);
        let outcome = self.deliver(&url).await;

        let interactions = match outcome {
            ShareOutcome::Shared | ShareOutcome::Copied => self.store.increment_share(post_id).await?,
            ShareOutcome::Failed => self.store.get(post_id).await?,
        };

        Ok(ShareResult {
            outcome,
            url,
            interactions,
        })
    }

    async fn deliver(&self, url: &str) -> ShareOutcome {
        if let Some(sheet) = self.share_sheet.as_ref().filter(|s| s.is_available()) {
            let request = ShareRequest {
                title: self.title.clone(),
                url: url.to_string(),
            };
            match sheet.share(&request).await {
                Ok(()) => return ShareOutcome::Shared,
                Err(e) => tracing::warn!(url, error = %e, "Failed to share, trying clipboard"),
            }
        }

        match &self.clipboard {
            Some(clipboard) => match clipboard.write_text(url).await {
                Ok(()) => ShareOutcome::Copied,
                Err(e) => {
                    tracing::warn!(url, error = %e, "Failed to copy link");
                    ShareOutcome::Failed
                }
            },
            None => {
                tracing::warn!(url, "No share sheet or clipboard available");
                ShareOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use std::sync::Mutex;

    struct FakeShareSheet {
        available: bool,
        fail: bool,
        requests: Mutex<Vec<ShareRequest>>,
    }

    impl FakeShareSheet {
        fn new(available: bool, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                available,
                fail,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ShareSheet for FakeShareSheet {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn share(&self, request: &ShareRequest) -> Result<(), String> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                Err("AbortError: Share canceled".to_string())
            } else {
                Ok(())
            }
        }
    }

    struct FakeClipboard {
        fail: bool,
        contents: Mutex<Option<String>>,
    }

    impl FakeClipboard {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                contents: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl Clipboard for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), String> {
            if self.fail {
                return Err("NotAllowedError".to_string());
            }
            *self.contents.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    fn store() -> InteractionStore {
        InteractionStore::new(Arc::new(MemoryKeyValueStore::new()))
    }

    #[test]
    fn test_share_url_shape() {
        assert_eq!(share_url("https://vistagram.app", "seed-1"), "https://vistagram.app?post=seed-1");
        assert_eq!(share_url("https://vistagram.app/", "abc"), "https://vistagram.app?post=abc");
    }

    #[tokio::test]
    async fn test_share_sheet_success_counts_share() {
        let sheet = FakeShareSheet::new(true, false);
        let clipboard = FakeClipboard::new(false);
        let sharer = Sharer::new(store(), "https://vistagram.app", "Check out this post!")
            .with_share_sheet(sheet.clone())
            .with_clipboard(clipboard.clone());

        let result = sharer.share_post("p1").await.unwrap();

        assert_eq!(result.outcome, ShareOutcome::Shared);
        assert_eq!(result.interactions.shares, 1);
        assert_eq!(
            sheet.requests.lock().unwrap().as_slice(),
            &[ShareRequest {
                title: "Check out this post!".to_string(),
                url: "https://vistagram.app?post=p1".to_string(),
            }]
        );
        assert!(clipboard.contents.lock().unwrap().is_none(), "clipboard untouched on share success");
    }

    #[tokio::test]
    async fn test_share_sheet_failure_falls_back_to_clipboard() {
        let sharer = Sharer::new(store(), "https://vistagram.app", "t")
            .with_share_sheet(FakeShareSheet::new(true, true))
            .with_clipboard(FakeClipboard::new(false));

        let result = sharer.share_post("p1").await.unwrap();

        assert_eq!(result.outcome, ShareOutcome::Copied);
        assert_eq!(result.interactions.shares, 1);
    }

    #[tokio::test]
    async fn test_unavailable_sheet_is_skipped() {
        let sheet = FakeShareSheet::new(false, false);
        let clipboard = FakeClipboard::new(false);
        let sharer = Sharer::new(store(), "https://vistagram.app", "t")
            .with_share_sheet(sheet.clone())
            .with_clipboard(clipboard.clone());

        let result = sharer.share_post("p1").await.unwrap();

        assert_eq!(result.outcome, ShareOutcome::Copied);
        assert!(sheet.requests.lock().unwrap().is_empty());
        assert_eq!(
            clipboard.contents.lock().unwrap().as_deref(),
            Some("https://vistagram.app?post=p1")
        );
    }

    #[tokio::test]
    async fn test_both_paths_failing_is_swallowed() {
        let store = store();
        let sharer = Sharer::new(store.clone(), "https://vistagram.app", "t")
            .with_share_sheet(FakeShareSheet::new(true, true))
            .with_clipboard(FakeClipboard::new(true));

        let result = sharer.share_post("p1").await.unwrap();

        assert_eq!(result.outcome, ShareOutcome::Failed);
        assert_eq!(result.interactions.shares, 0);
        assert_eq!(store.get("p1").await.unwrap().shares, 0);
    }

    #[tokio::test]
    async fn test_no_targets_at_all() {
        let sharer = Sharer::new(store(), "https://vistagram.app", "t");
        let result = sharer.share_post("p1").await.unwrap();
        assert_eq!(result.outcome, ShareOutcome::Failed);
    }
}
