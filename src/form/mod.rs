pub mod notifier;
pub mod upload_form;

pub use notifier::{LogNotifier, Notifier};
pub use upload_form::{
    FormPhase, FormSnapshot, UploadForm, CAMERA_ERROR_MESSAGE, LOCATION_ERROR_MESSAGE,
    LOCATION_UNSUPPORTED_MESSAGE,
};
