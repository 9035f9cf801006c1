use chrono::NaiveDate;
use parking_lot::Mutex;
use std::{fmt::Debug, sync::Arc};
use tracing::{debug, warn};

use crate::{
    error::{LookupScope, Result, WeatherError},
    fallback::{FallbackCatalog, FallbackSource},
    id::{IdGenerator, RandomIdGenerator},
    model::{WeatherRecord, WeatherRequest},
    store::{InMemoryRecordStore, RecordStore},
};

/// Read capability: resolve the weather of a city.
pub trait WeatherReader: Send + Sync + Debug {
    fn read(&self, city: &str) -> Result<WeatherRecord>;
}

/// Write capability: create, replace and remove stored records.
pub trait WeatherWriter: Send + Sync + Debug {
    fn create(&self, request: WeatherRequest) -> Result<WeatherRecord>;

    /// Replaces every field of an existing record. The record keeps its id.
    fn replace(&self, request: WeatherRequest) -> Result<WeatherRecord>;

    /// Fails with `CityNotFound` when nothing is stored for `city`, so a
    /// second delete of the same city is an error.
    fn remove(&self, city: &str) -> Result<()>;
}

/// Two-tier resolution over the primary store and a fallback source.
///
/// Reads hit the store first and consult the fallback only on a miss.
/// Writes only touch the store; every check-then-act sequence runs under a
/// single acquisition of the store lock.
#[derive(Debug)]
pub struct ResolutionService {
    store: Mutex<Box<dyn RecordStore>>,
    fallback: Arc<dyn FallbackSource>,
    ids: Arc<dyn IdGenerator>,
}

impl ResolutionService {
    pub fn new(
        store: impl RecordStore + 'static,
        fallback: Arc<dyn FallbackSource>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            store: Mutex::new(Box::new(store)),
            fallback,
            ids,
        }
    }

    /// Sample store, New Zealand fallback catalog and random ids, all dated `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        Self::new(
            InMemoryRecordStore::with_sample_data(today),
            Arc::new(FallbackCatalog::new_zealand(today)),
            Arc::new(RandomIdGenerator),
        )
    }

    /// Number of records currently held by the primary store.
    pub fn stored_count(&self) -> usize {
        self.store.lock().len()
    }
}

impl WeatherReader for ResolutionService {
    fn read(&self, city: &str) -> Result<WeatherRecord> {
        if let Some(record) = self.store.lock().find(city) {
            return Ok(record);
        }

        warn!(%city, "weather data not found in the local store, falling back to the catalog");
        self.fallback
            .lookup(city)
            .ok_or_else(|| WeatherError::not_found(city, LookupScope::AllSources))
    }
}

impl WeatherWriter for ResolutionService {
    fn create(&self, request: WeatherRequest) -> Result<WeatherRecord> {
        let mut store = self.store.lock();
        if store.find(&request.city).is_some() {
            return Err(WeatherError::CityAlreadyExists(request.city));
        }

        let city = request.city.clone();
        let record = WeatherRecord::from_request(self.ids.generate(), request);
        debug!(%city, id = %record.id, "storing new weather record");
        Ok(store.save(&city, record))
    }

    fn replace(&self, request: WeatherRequest) -> Result<WeatherRecord> {
        let mut store = self.store.lock();
        let existing = store
            .find(&request.city)
            .ok_or_else(|| WeatherError::not_found(request.city.as_str(), LookupScope::Store))?;

        let city = request.city.clone();
        let record = WeatherRecord::from_request(existing.id, request);
        debug!(%city, id = %record.id, "replacing weather record");
        Ok(store.update(&city, record))
    }

    fn remove(&self, city: &str) -> Result<()> {
        let mut store = self.store.lock();
        if store.find(city).is_none() {
            return Err(WeatherError::not_found(city, LookupScope::Store));
        }

        debug!(%city, "deleting weather record");
        store.delete(city);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemperatureUnit;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[derive(Debug, Default)]
    struct SequentialIds(AtomicU64);

    impl IdGenerator for SequentialIds {
        fn generate(&self) -> Uuid {
            Uuid::from_u128(u128::from(self.0.fetch_add(1, Ordering::SeqCst) + 1))
        }
    }

    /// Wraps the catalog and counts how often it is consulted.
    #[derive(Debug)]
    struct CountingFallback {
        inner: FallbackCatalog,
        lookups: AtomicUsize,
    }

    impl FallbackSource for CountingFallback {
        fn lookup(&self, city: &str) -> Option<WeatherRecord> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.lookup(city)
        }
    }

    fn service() -> (ResolutionService, Arc<CountingFallback>) {
        let fallback = Arc::new(CountingFallback {
            inner: FallbackCatalog::new_zealand(today()),
            lookups: AtomicUsize::new(0),
        });
        let service = ResolutionService::new(
            InMemoryRecordStore::with_sample_data(today()),
            fallback.clone(),
            Arc::new(SequentialIds::default()),
        );
        (service, fallback)
    }

    fn request(city: &str, temp: &str) -> WeatherRequest {
        WeatherRequest {
            city: city.into(),
            temp: temp.into(),
            unit: TemperatureUnit::Celsius,
            date: today(),
            weather: "cloudy".into(),
        }
    }

    #[test]
    fn read_prefers_store_and_skips_fallback() {
        let (service, fallback) = service();

        let record = service.read("Auckland").unwrap();
        assert_eq!(record.city, "Auckland");
        assert_eq!(record.temp, "15");
        assert_eq!(record.weather, "rainy");
        assert_eq!(record.date, today());
        assert_eq!(fallback.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stored_city_shadows_fallback_entry() {
        let (service, fallback) = service();
        service.create(request("Hamilton", "30")).unwrap();

        let record = service.read("Hamilton").unwrap();
        assert_eq!(record.temp, "30");
        assert_eq!(fallback.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn read_falls_back_on_store_miss() {
        let (service, fallback) = service();

        let record = service.read("Hamilton").unwrap();
        assert_eq!(record.temp, "11");
        assert_eq!(record.unit, TemperatureUnit::Celsius);
        assert_eq!(record.weather, "sunny");
        assert_eq!(fallback.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn read_fails_when_no_source_knows_the_city() {
        let (service, _) = service();

        let err = service.read("Atlantis").unwrap_err();
        assert_eq!(err, WeatherError::not_found("Atlantis", LookupScope::AllSources));
    }

    #[test]
    fn create_then_read_round_trips_fields() {
        let (service, _) = service();
        let created = service.create(request("Queenstown", "4")).unwrap();
        let read = service.read("Queenstown").unwrap();

        assert_eq!(created, read);
        assert_eq!(read.city, "Queenstown");
        assert_eq!(read.temp, "4");
        assert_eq!(read.weather, "cloudy");
        assert_eq!(read.date, today());
        assert_eq!(read.id, Uuid::from_u128(1));
    }

    #[test]
    fn create_assigns_distinct_ids() {
        let (service, _) = service();
        let a = service.create(request("Queenstown", "4")).unwrap();
        let b = service.create(request("Gisborne", "20")).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn second_create_conflicts_and_keeps_first_record() {
        let (service, _) = service();
        let first = service.create(request("Queenstown", "4")).unwrap();

        let err = service.create(request("Queenstown", "9")).unwrap_err();
        assert_eq!(err, WeatherError::CityAlreadyExists("Queenstown".into()));
        assert_eq!(service.read("Queenstown").unwrap(), first);
    }

    #[test]
    fn create_conflicts_with_seeded_city() {
        let (service, _) = service();

        let err = service.create(request("Auckland", "15")).unwrap_err();
        assert!(matches!(err, WeatherError::CityAlreadyExists(city) if city == "Auckland"));
    }

    #[test]
    fn create_is_allowed_for_fallback_only_city() {
        let (service, _) = service();

        assert!(service.create(request("Nelson", "25")).is_ok());
        assert_eq!(service.stored_count(), 4);
    }

    #[test]
    fn replace_overwrites_fields_and_keeps_id() {
        let (service, _) = service();
        let before = service.read("Wellington").unwrap();

        let mut req = request("Wellington", "9");
        req.unit = TemperatureUnit::Fahrenheit;
        let replaced = service.replace(req).unwrap();

        assert_eq!(replaced.id, before.id);
        assert_eq!(replaced.temp, "9");
        assert_eq!(replaced.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(replaced.weather, "cloudy");
        assert_eq!(service.read("Wellington").unwrap(), replaced);
    }

    #[test]
    fn replace_of_unknown_city_fails() {
        let (service, _) = service();

        let err = service.replace(request("Queenstown", "4")).unwrap_err();
        assert_eq!(err, WeatherError::not_found("Queenstown", LookupScope::Store));
        assert_eq!(service.stored_count(), 3);
    }

    #[test]
    fn replace_does_not_promote_fallback_city() {
        let (service, _) = service();

        let err = service.replace(request("Hamilton", "4")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn second_delete_of_same_city_fails() {
        let (service, _) = service();

        service.remove("Wellington").unwrap();
        let err = service.remove("Wellington").unwrap_err();

        assert_eq!(err, WeatherError::not_found("Wellington", LookupScope::Store));
        assert_eq!(service.stored_count(), 2);
    }

    #[test]
    fn deleted_city_is_no_longer_readable() {
        let (service, _) = service();
        service.remove("Christchurch").unwrap();

        let err = service.read("Christchurch").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_after_recreate_succeeds() {
        let (service, _) = service();
        service.remove("Auckland").unwrap();
        service.create(request("Auckland", "12")).unwrap();

        assert!(service.remove("Auckland").is_ok());
    }

    #[test]
    fn auckland_hamilton_atlantis_walkthrough() {
        let (service, _) = service();

        let auckland = service.read("Auckland").unwrap();
        assert_eq!((auckland.temp.as_str(), auckland.weather.as_str()), ("15", "rainy"));

        let hamilton = service.read("Hamilton").unwrap();
        assert_eq!((hamilton.temp.as_str(), hamilton.weather.as_str()), ("11", "sunny"));
        assert_eq!(hamilton.date, today());

        assert!(service.read("Atlantis").unwrap_err().is_not_found());
        assert!(matches!(
            service.create(request("Auckland", "1")),
            Err(WeatherError::CityAlreadyExists(_))
        ));
        assert!(service.replace(request("Queenstown", "1")).unwrap_err().is_not_found());

        assert!(service.remove("Wellington").is_ok());
        assert!(service.remove("Wellington").unwrap_err().is_not_found());
    }

    #[test]
    fn concurrent_creates_of_one_city_admit_exactly_one() {
        let service = Arc::new(ResolutionService::seeded(today()));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = service.clone();
                std::thread::spawn(move || service.create(request("Taupo", &i.to_string())).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(service.stored_count(), 4);
    }
}
