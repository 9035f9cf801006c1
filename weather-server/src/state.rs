//! Application state shared across handlers

use std::sync::Arc;

use weather_core::{ResolutionService, WeatherReader, WeatherWriter};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read capability: store first, then fallback catalog
    pub reader: Arc<dyn WeatherReader>,
    /// Write capability: create, replace and remove stored records
    pub writer: Arc<dyn WeatherWriter>,
}

impl AppState {
    pub fn new(reader: Arc<dyn WeatherReader>, writer: Arc<dyn WeatherWriter>) -> Self {
        Self { reader, writer }
    }

    /// Both capabilities backed by the same service instance.
    pub fn from_service(service: Arc<ResolutionService>) -> Self {
        Self {
            reader: service.clone(),
            writer: service,
        }
    }
}
