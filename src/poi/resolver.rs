use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::provider::{format_poi, ReverseGeocoder};
use crate::media::Coordinates;

/// Observable state of the resolver
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PoiState {
    /// Coordinates the current state belongs to
    pub coordinates: Option<Coordinates>,
    /// Last successfully resolved label
    pub poi: Option<String>,
    /// A lookup for `coordinates` is in flight
    pub loading: bool,
    /// Message from the last failed lookup
    pub error: Option<String>,
}

/// Turns coordinates into a place label, one lookup per coordinate change
///
/// Every change of coordinates starts a new generation. A lookup only
/// writes its result if its generation is still current when it completes,
/// so a slow response for old coordinates can never overwrite the label
/// for newer ones.
pub struct PoiResolver {
    geocoder: Arc<dyn ReverseGeocoder>,
    generation: AtomicU64,
    state: Mutex<PoiState>,
}

impl PoiResolver {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self {
            geocoder,
            generation: AtomicU64::new(0),
            state: Mutex::new(PoiState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoiState> {
        // State is plain data; a poisoned lock still holds a usable value
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> PoiState {
        self.lock().clone()
    }

    pub fn poi(&self) -> Option<String> {
        self.lock().poi.clone()
    }

    /// Resolve from nullable halves; either half missing clears the label
    pub async fn update(&self, lat: Option<f64>, lng: Option<f64>) -> PoiState {
        self.set_coordinates(Coordinates::from_parts(lat, lng)).await
    }

    /// Point the resolver at new coordinates (or none)
    ///
    /// Unchanged coordinates return the current state without a lookup.
    /// `None` clears the label without touching the network. Lookup failures
    /// clear the label and record the error; they are never returned.
    pub async fn set_coordinates(&self, coordinates: Option<Coordinates>) -> PoiState {
        let (generation, target) = {
            let mut state = self.lock();
            if state.coordinates == coordinates {
                return state.clone();
            }

            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.coordinates = coordinates;
            state.error = None;

            match coordinates {
                Some(target) => {
                    state.loading = true;
                    (generation, target)
                }
                None => {
                    state.poi = None;
                    state.loading = false;
                    return state.clone();
                }
            }
        };

        let result = self.geocoder.reverse(target).await;

        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "POI: discarding stale lookup");
            return state.clone();
        }

        match result {
            Ok(address) => {
                let poi = format_poi(&address);
                tracing::debug!(poi = %poi, "POI: resolved");
                state.poi = Some(poi);
            }
            Err(e) => {
                tracing::warn!(error = %e, "POI: lookup failed");
                state.poi = None;
                state.error = Some(e);
            }
        }
        state.loading = false;
        state.clone()
    }

    /// Forget coordinates and label
    pub async fn clear(&self) -> PoiState {
        self.set_coordinates(None).await
    }
}
