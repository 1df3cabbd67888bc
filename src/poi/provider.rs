// ReverseGeocoder trait - backend-agnostic coordinates-to-address lookup

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::media::Coordinates;

/// Label used when the address carries nothing nameable
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Address components returned by a reverse geocoder
///
/// Field names follow the OpenStreetMap address schema. Missing and empty
/// components are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub tourism: Option<String>,
    pub amenity: Option<String>,
    pub shop: Option<String>,
    pub building: Option<String>,
    pub neighbourhood: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Address {
    /// Most specific nameable component, in priority order
    pub fn place_name(&self) -> Option<&str> {
        [
            &self.tourism,
            &self.amenity,
            &self.shop,
            &self.building,
            &self.neighbourhood,
            &self.suburb,
            &self.city,
            &self.town,
            &self.village,
        ]
        .into_iter()
        .find_map(non_empty)
    }

    /// City, falling back to town and then village
    pub fn locality(&self) -> Option<&str> {
        non_empty(&self.city)
            .or_else(|| non_empty(&self.town))
            .or_else(|| non_empty(&self.village))
    }
}

/// Reduce an address to a short label like "Cafe X, Mumbai, India"
///
/// name, then locality (unless it is the name itself), then state (unless it
/// repeats the locality), then country. Empty components are skipped.
pub fn format_poi(address: &Address) -> String {
    let name = address.place_name().unwrap_or(UNKNOWN_LOCATION);
    let locality = address.locality();
    let state = non_empty(&address.state);
    let country = non_empty(&address.country);

    let mut parts = vec![name];
    if let Some(locality) = locality.filter(|l| *l != name) {
        parts.push(locality);
    }
    if let Some(state) = state.filter(|s| Some(*s) != locality) {
        parts.push(state);
    }
    if let Some(country) = country {
        parts.push(country);
    }

    parts.join(", ")
}

/// Backend-agnostic reverse geocoding interface
///
/// The POI resolver calls this trait, never a concrete implementation.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Look up the address at `coordinates`. Err on transport or non-2xx failures.
    async fn reverse(&self, coordinates: Coordinates) -> Result<Address, String>;
}
