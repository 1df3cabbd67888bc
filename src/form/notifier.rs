// Notifier - blocking user-facing alerts

/// Shows a message the user has to acknowledge
///
/// Used only for device failures the user can act on (camera or location
/// permission). Everything else degrades silently.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Notifier for headless use: alerts go to the log only
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!(message, "Alert");
    }
}
