use thiserror::Error;

/// Where a lookup was made before giving up on a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupScope {
    /// Primary store and fallback catalog were both consulted.
    AllSources,
    /// Only the primary store is relevant (writes).
    Store,
}

impl LookupScope {
    fn hint(&self) -> &'static str {
        match self {
            LookupScope::AllSources => "data not found in all the sources",
            LookupScope::Store => "city not found in memory, try a city already in memory",
        }
    }
}

/// Policy violations raised by the resolution service.
///
/// These are terminal for the request that triggered them and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("{city} {}", .scope.hint())]
    CityNotFound { city: String, scope: LookupScope },

    #[error("{0} city already exist in memory, try to add it for new city")]
    CityAlreadyExists(String),
}

impl WeatherError {
    pub fn not_found(city: impl Into<String>, scope: LookupScope) -> Self {
        WeatherError::CityNotFound { city: city.into(), scope }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::CityNotFound { .. })
    }

    pub fn city(&self) -> &str {
        match self {
            WeatherError::CityNotFound { city, .. } | WeatherError::CityAlreadyExists(city) => city,
        }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
