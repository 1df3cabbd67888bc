// Media module - images, camera and location behind device traits

pub mod camera;
pub mod image;
pub mod location;

pub use camera::{CameraDevice, CameraSession, CapturedPhoto, FacingMode, Frame, MediaStream};
pub use image::{to_data_uri, ImageFile};
pub use location::{Coordinates, LocationProvider, PositionOptions};
