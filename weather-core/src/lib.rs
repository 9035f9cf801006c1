//! Core library for the weather service.
//!
//! This crate defines:
//! - Weather records and write requests
//! - The primary record store and the fallback catalog
//! - The resolution service enforcing read/write policy
//! - Configuration and an HTTP client for a running service
//!
//! It is used by `weather-server` and `weather-cli`.

pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod id;
pub mod model;
pub mod service;
pub mod store;

pub use client::{HttpWeatherClient, WeatherApi};
pub use config::{ClientConfig, Config, ServerConfig};
pub use error::{LookupScope, WeatherError};
pub use fallback::{FallbackCatalog, FallbackSource};
pub use id::{IdGenerator, RandomIdGenerator};
pub use model::{TemperatureUnit, WeatherRecord, WeatherRequest};
pub use service::{ResolutionService, WeatherReader, WeatherWriter};
pub use store::{InMemoryRecordStore, RecordStore};
