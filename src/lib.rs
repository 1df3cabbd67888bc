// Module declarations
pub mod caption;
pub mod error;
pub mod feed;
pub mod form;
pub mod interactions;
pub mod logging;
pub mod media;
pub mod poi;
pub mod settings;
pub mod storage;

#[cfg(feature = "desktop")]
pub mod commands;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Arc;
    use std::time::Duration;
    use tauri::Manager;

    use caption::{CaptionGenerator, MockCaptionGenerator};
    use feed::FeedController;
    use interactions::InteractionStore;
    use poi::{NominatimGeocoder, PoiResolver};
    use settings::SettingsManager;
    use storage::SqliteKeyValueStore;

    if let Some(dir) = logging::logs_dir() {
        logging::init(&dir);
    }

    let result = tauri::Builder::default()
        .setup(|app| {
            let settings_manager = SettingsManager::new()
                .map_err(|e| format!("Failed to initialize SettingsManager: {}", e))?;
            let settings = settings_manager.get();
            app.manage(settings_manager);

            let kv = SqliteKeyValueStore::new()
                .map_err(|e| format!("Failed to open interaction storage: {}", e))?;
            app.manage(InteractionStore::new(Arc::new(kv)));

            let geocoder = NominatimGeocoder::from_settings(&settings.geocoding)
                .map_err(|e| format!("Failed to initialize geocoder: {}", e))?;
            app.manage(Arc::new(PoiResolver::new(Arc::new(geocoder))));

            let captions: Arc<dyn CaptionGenerator> = Arc::new(MockCaptionGenerator::new(
                Duration::from_millis(settings.caption.delay_ms),
            ));
            app.manage(captions);

            app.manage(tokio::sync::Mutex::new(FeedController::with_seed_posts(
                chrono::Utc::now(),
            )));

            tracing::info!("Vistagram backend ready");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_feed,
            commands::create_post,
            commands::get_interactions,
            commands::toggle_like,
            commands::record_share,
            commands::share_link,
            commands::resolve_poi,
            commands::generate_caption,
            commands::get_settings,
            commands::update_settings,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        tracing::error!(error = %e, "Tauri application exited with an error");
        std::process::exit(1);
    }
}
