//! Request validation
//!
//! Extractors that deserialize and then validate inbound data with the
//! `validator` crate. Both malformed input and rule violations are rejected
//! with a 400.

use std::borrow::Cow;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, de::DeserializeOwned};
use validator::{Validate, ValidationError, ValidationErrors};
use weather_core::{TemperatureUnit, WeatherRequest};

use crate::error::ApiError;

/// Body of `POST /weather` and `PUT /weather`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WeatherPayload {
    #[validate(custom(function = "not_blank", message = "city is required"))]
    pub city: String,

    #[validate(custom(function = "not_blank", message = "temperature is required"))]
    pub temp: String,

    #[validate(custom(
        function = "unit_symbol",
        message = "Unit must be either 'C' for celsius or 'F' for Fahrenheit"
    ))]
    pub unit: String,

    #[validate(custom(function = "not_in_future", message = "date can not be in the future"))]
    pub date: NaiveDate,

    #[validate(custom(function = "not_blank", message = "weather description is required"))]
    pub weather: String,
}

impl TryFrom<WeatherPayload> for WeatherRequest {
    type Error = ApiError;

    fn try_from(payload: WeatherPayload) -> Result<Self, Self::Error> {
        let unit = TemperatureUnit::try_from(payload.unit.as_str())
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        Ok(WeatherRequest {
            city: payload.city,
            temp: payload.temp,
            unit,
            date: payload.date,
            weather: payload.weather,
        })
    }
}

/// `?city=<name>` query of `GET` and `DELETE /weather`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CityQuery {
    #[validate(custom(function = "not_blank", message = "city is required"))]
    pub city: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn unit_symbol(value: &str) -> Result<(), ValidationError> {
    match value {
        "C" | "F" => Ok(()),
        _ => Err(ValidationError::new("unit")),
    }
}

fn not_in_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Local::now().date_naive() {
        return Err(ValidationError::new("future_date"));
    }
    Ok(())
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message: Cow<'_, str> =
                    error.message.clone().unwrap_or_else(|| error.code.clone());
                format!("{field}: {message}")
            })
        })
        .collect();

    // HashMap order is unstable; keep responses deterministic.
    messages.sort();
    messages.join("; ")
}

/// A JSON extractor that also validates the request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::Validation(describe(&e)))?;

        Ok(Self(value))
    }
}

/// A query-string extractor that also validates the parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::Validation(describe(&e)))?;

        Ok(Self(value))
    }
}
