use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    config::Config,
    error::WeatherError,
    model::{CitySuggestion, LocationQuery, WeatherReport},
    normalize,
    provider::{MAX_CITY_SUGGESTIONS, is_searchable},
};

use super::{CityGeocoder, WeatherProvider};

/// OpenWeather current-weather and direct-geocoding client.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    weather_url: String,
    geocoding_url: String,
    weather_timeout: Duration,
    geocoding_timeout: Duration,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            weather_url: config.weather_url.clone(),
            geocoding_url: config.geocoding_url.clone(),
            weather_timeout: config.weather_timeout(),
            geocoding_timeout: config.geocoding_timeout(),
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, location: &LocationQuery) -> Result<OwCurrentResponse, WeatherError> {
        let mut params = location.query_pairs();
        params.push(("appid", self.api_key.as_str()));
        params.push(("units", "metric"));

        let res = self
            .http
            .get(&self.weather_url)
            .query(&params)
            .timeout(self.weather_timeout)
            .send()
            .await?;

        parse_success(res, "current weather").await
    }

    async fn fetch_direct_geocoding(&self, query: &str) -> Result<Vec<OwGeocodingHit>, WeatherError> {
        let limit = MAX_CITY_SUGGESTIONS.to_string();

        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .timeout(self.geocoding_timeout)
            .send()
            .await?;

        parse_success(res, "direct geocoding").await
    }
}

/// Classify the status, then decode the body as `T`.
async fn parse_success<T: DeserializeOwned>(res: Response, what: &str) -> Result<T, WeatherError> {
    let status = res.status();

    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        tracing::debug!(
            "OpenWeather {} request failed with status {}: {}",
            what,
            status,
            truncate_body(&body),
        );
        return Err(WeatherError::NotFound { status });
    }

    let body = res.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        WeatherError::MalformedPayload(format!("OpenWeather {what} JSON: {e}"))
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwMain {
    pub(crate) temp: f64,
    pub(crate) feels_like: f64,
    pub(crate) temp_min: Option<f64>,
    pub(crate) temp_max: Option<f64>,
    pub(crate) humidity: u32,
    pub(crate) pressure: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWeather {
    pub(crate) description: String,
    pub(crate) icon: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWind {
    pub(crate) speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwSys {
    pub(crate) country: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwCurrentResponse {
    pub(crate) name: String,
    pub(crate) sys: OwSys,
    pub(crate) main: OwMain,
    pub(crate) weather: Vec<OwWeather>,
    pub(crate) wind: OwWind,
    pub(crate) visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwGeocodingHit {
    pub(crate) name: String,
    pub(crate) country: String,
    pub(crate) state: Option<String>,
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, location: &LocationQuery) -> Result<WeatherReport, WeatherError> {
        let raw = self.fetch_current(location).await?;
        normalize::weather_report(raw)
    }
}

#[async_trait]
impl CityGeocoder for OpenWeatherProvider {
    async fn search_cities(&self, query: &str) -> Vec<CitySuggestion> {
        if !is_searchable(query) {
            return Vec::new();
        }

        match self.fetch_direct_geocoding(query.trim()).await {
            Ok(hits) => normalize::city_suggestions(hits, MAX_CITY_SUGGESTIONS),
            Err(e) => {
                tracing::debug!("City search for {:?} degraded to empty: {}", query, e);
                Vec::new()
            }
        }
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        assert_eq!(truncate_body(&long).chars().count(), 200);
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn provider_takes_endpoints_and_timeouts_from_config() {
        let cfg = Config {
            weather_url: "http://localhost:1/weather".into(),
            weather_timeout_ms: 250,
            ..Config::default()
        };

        let provider = OpenWeatherProvider::new(&cfg);

        assert_eq!(provider.weather_url, "http://localhost:1/weather");
        assert_eq!(provider.weather_timeout, Duration::from_millis(250));
        assert_eq!(provider.geocoding_timeout, Duration::from_secs(5));
    }
}
