// Tauri commands exposed to the webview
//
// Device access (file picker, camera, geolocation, share sheet, clipboard)
// happens in the webview. These commands cover the rest: the feed, the
// interaction store, POI resolution, captions and settings.

use std::sync::Arc;
use tauri::{Emitter, State};
use tokio::sync::Mutex;

use crate::caption::CaptionGenerator;
use crate::error::AppError;
use crate::feed::{FeedController, NewPost, Post, PostCard};
use crate::interactions::{share_url, InteractionRecord, InteractionStore, ShareRequest};
use crate::media::ImageFile;
use crate::poi::{PoiResolver, PoiState};
use crate::settings::{Settings, SettingsManager};

/// File name given to images uploaded from the webview as data URIs
const UPLOAD_FILE_NAME: &str = "upload";

/// Get every post, newest first, with its likes, shares and time label
///
/// # Example
///
/// ```javascript
/// const cards = await invoke('get_feed');
/// cards.forEach(c => console.log(c.caption, c.likes, c.timeLabel));
/// ```
#[tauri::command]
pub async fn get_feed(
    feed: State<'_, Mutex<FeedController>>,
    interactions: State<'_, InteractionStore>,
) -> Result<Vec<PostCard>, String> {
    let feed = feed.lock().await;
    Ok(feed.cards(&interactions, chrono::Utc::now()).await?)
}

/// Publish a post and put it at the top of the feed
///
/// Fails if the image is empty or the caption is blank.
///
/// # Example
///
/// ```javascript
/// const post = await invoke('create_post', {
///   post: { image: dataUri, caption: 'Hello', poi: 'Goa, India' }
/// });
/// ```
#[tauri::command]
pub async fn create_post(
    post: NewPost,
    feed: State<'_, Mutex<FeedController>>,
) -> Result<Post, String> {
    let mut feed = feed.lock().await;
    Ok(feed.publish(post, chrono::Utc::now())?)
}

#[tauri::command]
pub async fn get_interactions(
    post_id: String,
    interactions: State<'_, InteractionStore>,
) -> Result<InteractionRecord, String> {
    Ok(interactions.get(&post_id).await?)
}

/// Like or unlike a post; returns the updated record
#[tauri::command]
pub async fn toggle_like(
    post_id: String,
    interactions: State<'_, InteractionStore>,
) -> Result<InteractionRecord, String> {
    Ok(interactions.toggle_like(&post_id).await?)
}

/// Count a share the webview completed (share sheet or clipboard)
#[tauri::command]
pub async fn record_share(
    post_id: String,
    interactions: State<'_, InteractionStore>,
) -> Result<InteractionRecord, String> {
    Ok(interactions.increment_share(&post_id).await?)
}

/// Title and link for sharing a post
///
/// # Example
///
/// ```javascript
/// const { title, url } = await invoke('share_link', { postId: post.id });
/// try {
///   await navigator.share({ title, url });
/// } catch {
///   await navigator.clipboard.writeText(url);
/// }
/// await invoke('record_share', { postId: post.id });
/// ```
#[tauri::command]
pub fn share_link(post_id: String, settings: State<'_, SettingsManager>) -> ShareRequest {
    let share = settings.get().share;
    ShareRequest {
        url: share_url(&share.origin, &post_id),
        title: share.title,
    }
}

/// Resolve a place label for the given coordinates
///
/// Either half missing clears the label without a lookup. Lookup failures
/// come back in `error`, never as a rejected promise.
#[tauri::command]
pub async fn resolve_poi(
    lat: Option<f64>,
    lng: Option<f64>,
    resolver: State<'_, Arc<PoiResolver>>,
) -> Result<PoiState, String> {
    Ok(resolver.update(lat, lng).await)
}

/// Suggest a caption for an image given as a data URI
#[tauri::command]
pub async fn generate_caption(
    image: String,
    captions: State<'_, Arc<dyn CaptionGenerator>>,
) -> Result<String, String> {
    let file = ImageFile::from_data_uri(UPLOAD_FILE_NAME, &image)?;
    captions
        .generate(&file)
        .await
        .map_err(|e| AppError::Caption(e).into())
}

#[tauri::command]
pub fn get_settings(settings: State<'_, SettingsManager>) -> Settings {
    settings.get()
}

/// Validate, persist and apply new settings
///
/// Emits `settings-changed` on success. Geocoder and caption settings are
/// read at startup, so changes to them apply on the next launch.
#[tauri::command]
pub fn update_settings(
    settings: Settings,
    state: State<'_, SettingsManager>,
    app_handle: tauri::AppHandle,
) -> Result<(), String> {
    state.update(settings.clone())?;

    app_handle
        .emit("settings-changed", &settings)
        .map_err(|e| format!("Failed to emit settings-changed event: {}", e))?;

    Ok(())
}
