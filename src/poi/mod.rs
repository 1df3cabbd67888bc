// POI module - reverse geocoding coordinates into a short place label

pub mod nominatim_provider;
pub mod provider;
pub mod resolver;

pub use nominatim_provider::NominatimGeocoder;
pub use provider::{format_poi, Address, ReverseGeocoder, UNKNOWN_LOCATION};
pub use resolver::{PoiResolver, PoiState};
