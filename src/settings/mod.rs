pub mod manager;


pub use manager::{
    CaptionSettings, GeocodingSettings, LocationSettings, Settings, SettingsManager, ShareSettings,
};
