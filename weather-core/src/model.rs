use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Temperature scale a record is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    /// Case-sensitive: only `C` and `F` are accepted.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "C" => Ok(TemperatureUnit::Celsius),
            "F" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unit must be either 'C' for celsius or 'F' for Fahrenheit, got '{value}'"
            )),
        }
    }
}

/// Input for creating or replacing the record of a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub city: String,
    pub temp: String,
    pub unit: TemperatureUnit,
    pub date: NaiveDate,
    pub weather: String,
}

/// A city's weather snapshot, as stored and as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    #[serde(rename = "uuid")]
    pub id: Uuid,
    pub city: String,
    pub temp: String,
    pub unit: TemperatureUnit,
    pub weather: String,
    pub date: NaiveDate,
}

impl WeatherRecord {
    pub fn new(
        id: Uuid,
        city: impl Into<String>,
        temp: impl Into<String>,
        unit: TemperatureUnit,
        weather: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            city: city.into(),
            temp: temp.into(),
            unit,
            weather: weather.into(),
            date,
        }
    }

    pub fn from_request(id: Uuid, request: WeatherRequest) -> Self {
        Self {
            id,
            city: request.city,
            temp: request.temp,
            unit: request.unit,
            weather: request.weather,
            date: request.date,
        }
    }
}
