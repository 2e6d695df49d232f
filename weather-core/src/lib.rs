//! Core library for the weather proxy service.
//!
//! This crate defines:
//! - Configuration loading (defaults, TOML file, environment)
//! - The OpenWeather client for current weather and city geocoding
//! - Normalization of upstream payloads into the browser-facing models
//!
//! It is used by `weather-server`, but has no dependency on any HTTP framework.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use model::{CitySuggestion, LocationQuery, WeatherReport};
pub use provider::{CityGeocoder, WeatherProvider, openweather::OpenWeatherProvider};
