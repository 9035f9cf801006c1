//! Weather record handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use weather_core::{WeatherRecord, WeatherRequest};

use crate::{
    error::ApiError,
    state::AppState,
    validation::{CityQuery, ValidatedJson, ValidatedQuery, WeatherPayload},
};

/// Body returned by a successful create
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
}

/// `GET /weather?city=<name>`
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CityQuery>,
) -> Result<Json<WeatherRecord>, ApiError> {
    let record = state.reader.read(&query.city)?;
    Ok(Json(record))
}

/// `POST /weather`
#[instrument(skip(state, payload), fields(city = %payload.city))]
pub async fn add_weather(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WeatherPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let request = WeatherRequest::try_from(payload)?;
    let record = state.writer.create(request)?;
    info!(city = %record.city, id = %record.id, "weather record created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { success: true })))
}

/// `PUT /weather`
#[instrument(skip(state, payload), fields(city = %payload.city))]
pub async fn update_weather(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WeatherPayload>,
) -> Result<Json<WeatherRecord>, ApiError> {
    let request = WeatherRequest::try_from(payload)?;
    let record = state.writer.replace(request)?;
    info!(city = %record.city, "weather record replaced");

    Ok(Json(record))
}

/// `DELETE /weather?city=<name>`
#[instrument(skip(state))]
pub async fn delete_weather(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CityQuery>,
) -> Result<StatusCode, ApiError> {
    state.writer.remove(&query.city)?;
    info!(city = %query.city, "weather record deleted");

    Ok(StatusCode::NO_CONTENT)
}
