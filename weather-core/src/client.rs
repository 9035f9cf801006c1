use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::fmt::Debug;

use crate::model::{WeatherRecord, WeatherRequest};

/// Remote access to a running weather service.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn get(&self, city: &str) -> Result<WeatherRecord>;

    async fn add(&self, request: &WeatherRequest) -> Result<()>;

    async fn update(&self, request: &WeatherRequest) -> Result<WeatherRecord>;

    async fn delete(&self, city: &str) -> Result<()>;

    async fn health(&self) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    base_url: String,
    http: Client,
}

impl HttpWeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    success: bool,
}

/// Read the body, failing with the server's message on a non-success status.
async fn read_body(res: Response, what: &str) -> Result<String> {
    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read weather service {what} response body"))?;

    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| truncate_body(&body));

        return Err(anyhow!("Weather service {what} request failed with status {status}: {detail}"));
    }

    Ok(body)
}

#[async_trait]
impl WeatherApi for HttpWeatherClient {
    async fn get(&self, city: &str) -> Result<WeatherRecord> {
        let res = self
            .http
            .get(self.url("/weather"))
            .query(&[("city", city)])
            .send()
            .await
            .context("Failed to send request to weather service (get)")?;

        let body = read_body(res, "get").await?;
        serde_json::from_str(&body).context("Failed to parse weather record JSON")
    }

    async fn add(&self, request: &WeatherRequest) -> Result<()> {
        let res = self
            .http
            .post(self.url("/weather"))
            .json(request)
            .send()
            .await
            .context("Failed to send request to weather service (add)")?;

        let body = read_body(res, "add").await?;
        let created: CreatedBody =
            serde_json::from_str(&body).context("Failed to parse add response JSON")?;

        if !created.success {
            return Err(anyhow!("Weather service did not confirm creation of {}", request.city));
        }

        Ok(())
    }

    async fn update(&self, request: &WeatherRequest) -> Result<WeatherRecord> {
        let res = self
            .http
            .put(self.url("/weather"))
            .json(request)
            .send()
            .await
            .context("Failed to send request to weather service (update)")?;

        let body = read_body(res, "update").await?;
        serde_json::from_str(&body).context("Failed to parse weather record JSON")
    }

    async fn delete(&self, city: &str) -> Result<()> {
        let res = self
            .http
            .delete(self.url("/weather"))
            .query(&[("city", city)])
            .send()
            .await
            .context("Failed to send request to weather service (delete)")?;

        read_body(res, "delete").await?;
        Ok(())
    }

    async fn health(&self) -> Result<String> {
        let res = self
            .http
            .get(self.url("/weather/health"))
            .send()
            .await
            .context("Failed to send request to weather service (health)")?;

        let body = read_body(res, "health").await?;
        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
