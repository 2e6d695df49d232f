//! Reshape OpenWeather payloads into the browser-facing models.
//!
//! Rounding follows round-half-to-even so 18.5 becomes 18 and 19.5 becomes 20.

use std::collections::HashSet;

use crate::{
    error::WeatherError,
    model::{CitySuggestion, WeatherReport},
    provider::openweather::{OwCurrentResponse, OwGeocodingHit},
};

pub(crate) fn weather_report(raw: OwCurrentResponse) -> Result<WeatherReport, WeatherError> {
    let conditions = raw
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::MalformedPayload("weather array is empty".to_string()))?;

    Ok(WeatherReport {
        city: raw.name,
        country: raw.sys.country,
        temp: round_whole(raw.main.temp),
        feels_like: round_whole(raw.main.feels_like),
        temp_min: raw.main.temp_min.map(round_whole),
        temp_max: raw.main.temp_max.map(round_whole),
        humidity: raw.main.humidity,
        pressure: raw.main.pressure,
        description: title_case(&conditions.description),
        icon: conditions.icon,
        wind: mps_to_kmh(raw.wind.speed),
        visibility: raw.visibility.map(metres_to_km),
    })
}

/// Map geocoding hits to suggestions, dropping later hits whose coordinates
/// match an earlier one to three decimal places.
pub(crate) fn city_suggestions(hits: Vec<OwGeocodingHit>, limit: usize) -> Vec<CitySuggestion> {
    let mut seen = HashSet::new();

    hits.into_iter()
        .filter(|hit| seen.insert(coordinate_key(hit.lat, hit.lon)))
        .take(limit)
        .map(|hit| CitySuggestion {
            name: hit.name,
            country: hit.country,
            state: hit.state.unwrap_or_default(),
            lat: hit.lat,
            lon: hit.lon,
        })
        .collect()
}

/// Uppercase every letter that does not follow another letter, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}

fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

fn mps_to_kmh(speed: f64) -> i64 {
    round_whole(speed * 3.6)
}

fn metres_to_km(metres: f64) -> f64 {
    round_to(metres / 1000.0, 1)
}

/// Round to `digits` decimals using the exact binary value of `value`, ties to even.
fn round_to(value: f64, digits: usize) -> f64 {
    format!("{value:.digits$}").parse().unwrap_or(value)
}

fn coordinate_key(lat: f64, lon: f64) -> (u64, u64) {
    // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
    let key = |v: f64| (round_to(v, 3) + 0.0).to_bits();
    (key(lat), key(lon))
}
