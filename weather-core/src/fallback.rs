use chrono::NaiveDate;
use std::{collections::HashMap, fmt::Debug};
use uuid::Uuid;

use crate::model::{TemperatureUnit, WeatherRecord};

/// Secondary, read-only source consulted when the primary store misses.
pub trait FallbackSource: Send + Sync + Debug {
    fn lookup(&self, city: &str) -> Option<WeatherRecord>;
}

/// Fixed table of canned records standing in for an external provider.
///
/// Built once and never mutated afterwards, so it can be shared without locking.
#[derive(Debug, Clone, Default)]
pub struct FallbackCatalog {
    entries: HashMap<String, WeatherRecord>,
}

impl FallbackCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog of New Zealand cities, every record dated `today`.
    pub fn new_zealand(today: NaiveDate) -> Self {
        let table = [
            ("Hamilton", "Hamilton", "11", "sunny"),
            ("Tauranga", "Tauranga", "19", "sunny"),
            ("Napier-Hastings", "Napier-Hastings", "17", "rainy"),
            ("Dunedin", "Dunedin", "12", "cloudy"),
            ("Palmerston North", "Palmerston North", "15", "windy"),
            ("Nelson", "Nelson", "18", "sunny"),
            ("Rotorua", "Rotorua", "16", "rainy"),
            ("New Plymouth", "New Plymouth", "17", "sunny"),
            ("Whangarei", "Whangārei", "18", "sunny"),
        ];

        let entries = table
            .into_iter()
            .map(|(key, city, temp, weather)| {
                let record = WeatherRecord::new(
                    Uuid::new_v4(),
                    city,
                    temp,
                    TemperatureUnit::Celsius,
                    weather,
                    today,
                );
                (key.to_owned(), record)
            })
            .collect();

        Self { entries }
    }

    /// Lookup keys in alphabetical order.
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        cities.sort_unstable();
        cities
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FallbackSource for FallbackCatalog {
    fn lookup(&self, city: &str) -> Option<WeatherRecord> {
        self.entries.get(city).cloned()
    }
}
