use chrono::NaiveDate;
use std::{collections::HashMap, fmt::Debug};
use uuid::Uuid;

use crate::model::{TemperatureUnit, WeatherRecord};

/// Primary keyed store of weather records, one per city.
///
/// Implementations apply no existence policy: `save` and `update` both
/// overwrite, and `delete` of an absent city is a no-op. Callers that need
/// check-then-act semantics must serialize access themselves.
pub trait RecordStore: Send + Debug {
    fn find(&self, city: &str) -> Option<WeatherRecord>;

    fn save(&mut self, city: &str, record: WeatherRecord) -> WeatherRecord;

    /// Same effect as [`RecordStore::save`]; used when the city is known to exist.
    fn update(&mut self, city: &str, record: WeatherRecord) -> WeatherRecord;

    fn delete(&mut self, city: &str);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: HashMap<String, WeatherRecord>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the sample cities served at startup.
    pub fn with_sample_data(today: NaiveDate) -> Self {
        let mut store = Self::new();
        for (city, temp, weather) in [
            ("Auckland", "15", "rainy"),
            ("Christchurch", "7", "Cloudy"),
            ("Wellington", "22", "sunny"),
        ] {
            let record =
                WeatherRecord::new(Uuid::new_v4(), city, temp, TemperatureUnit::Celsius, weather, today);
            store.save(city, record);
        }
        store
    }
}

impl RecordStore for InMemoryRecordStore {
    fn find(&self, city: &str) -> Option<WeatherRecord> {
        self.records.get(city).cloned()
    }

    fn save(&mut self, city: &str, record: WeatherRecord) -> WeatherRecord {
        self.records.insert(city.to_owned(), record.clone());
        record
    }

    fn update(&mut self, city: &str, record: WeatherRecord) -> WeatherRecord {
        self.save(city, record)
    }

    fn delete(&mut self, city: &str) {
        self.records.remove(city);
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
