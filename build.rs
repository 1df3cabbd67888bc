fn main() {
    // The Tauri context (tauri.conf.json, icons, frontend dist) is only
    // needed when building the desktop shell.
    #[cfg(feature = "desktop")]
    tauri_build::build()
}
