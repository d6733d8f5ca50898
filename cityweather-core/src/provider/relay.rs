use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::{ApiKey, FetchError, WeatherSnapshot};

use super::WeatherSource;

/// WeatherAPI.com `current.json`, reached through a content-relay that
/// returns the upstream body inside a `contents` string.
#[derive(Debug, Clone)]
pub struct RelayedWeatherApi {
    api_key: ApiKey,
    relay_url: Url,
    upstream_url: Url,
    http: Client,
}

impl RelayedWeatherApi {
    pub fn new(api_key: ApiKey, relay_url: &str, upstream_url: &str) -> anyhow::Result<Self> {
        let relay_url =
            Url::parse(relay_url).with_context(|| format!("Invalid relay URL '{relay_url}'"))?;
        let upstream_url = Url::parse(upstream_url)
            .with_context(|| format!("Invalid upstream URL '{upstream_url}'"))?;

        Ok(Self { api_key, relay_url, upstream_url, http: Client::new() })
    }

    /// Upstream request, `key` and `q` URL-encoded. Contains the secret.
    fn upstream_request_url(&self, city: &str) -> Url {
        let mut url = self.upstream_url.clone();
        url.query_pairs_mut().append_pair("key", self.api_key.expose()).append_pair("q", city);
        url
    }

    /// Relay request carrying the encoded upstream URL in `url`.
    pub fn request_url(&self, city: &str) -> Url {
        let upstream = self.upstream_request_url(city);
        let mut url = self.relay_url.clone();
        url.query_pairs_mut().append_pair("url", upstream.as_str());
        url
    }
}

#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    contents: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WaError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    humidity: u8,
    wind_kph: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl From<WaResponse> for WeatherSnapshot {
    fn from(parsed: WaResponse) -> Self {
        WeatherSnapshot {
            city: parsed.location.name,
            country: parsed.location.country,
            temperature_c: parsed.current.temp_c,
            condition: parsed.current.condition.text,
            humidity_pct: parsed.current.humidity,
            wind_kph: parsed.current.wind_kph,
            icon_ref: parsed.current.condition.icon,
        }
    }
}

/// Unwrap the relay envelope, returning the embedded upstream body.
pub fn parse_envelope(body: &str) -> Result<String, FetchError> {
    let envelope: RelayEnvelope = serde_json::from_str(body)
        .map_err(|e| FetchError::Parse(format!("invalid relay envelope: {e}")))?;

    envelope
        .contents
        .ok_or_else(|| FetchError::Parse("relay envelope has no contents".to_string()))
}

/// Validate the upstream body and build a snapshot from it.
pub fn parse_payload(contents: &str) -> Result<WeatherSnapshot, FetchError> {
    let value: serde_json::Value = serde_json::from_str(contents)
        .map_err(|e| FetchError::Parse(format!("invalid weather payload: {e}")))?;

    if let Some(error) = value.get("error") {
        let error: WaError = serde_json::from_value(error.clone())
            .map_err(|e| FetchError::Parse(format!("invalid error object: {e}")))?;
        return Err(FetchError::Upstream(error.message));
    }

    let parsed: WaResponse = serde_json::from_value(value)
        .map_err(|e| FetchError::Parse(format!("unexpected weather payload: {e}")))?;

    Ok(parsed.into())
}

#[async_trait]
impl WeatherSource for RelayedWeatherApi {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        debug!(city, relay = %self.relay_url, "requesting current weather through relay");

        let res = self.http.get(self.request_url(city)).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Network(format!("relay responded with status {status}")));
        }

        let contents = parse_envelope(&body)?;
        let snapshot = parse_payload(&contents)?;

        debug!(city = %snapshot.city, condition = %snapshot.condition, "weather payload parsed");
        Ok(snapshot)
    }
}
