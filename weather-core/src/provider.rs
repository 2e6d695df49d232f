use crate::{CitySuggestion, LocationQuery, WeatherError, WeatherReport};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Queries shorter than this (after trimming) never reach upstream.
pub const MIN_CITY_QUERY_CHARS: usize = 2;

/// Maximum number of autocomplete suggestions requested from upstream.
pub const MAX_CITY_SUGGESTIONS: usize = 5;

/// Source of current conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, location: &LocationQuery) -> Result<WeatherReport, WeatherError>;
}

/// Source of city-name suggestions. Never fails: problems degrade to an empty list.
#[async_trait]
pub trait CityGeocoder: Send + Sync + Debug {
    async fn search_cities(&self, query: &str) -> Vec<CitySuggestion>;
}

/// Whether a raw autocomplete query is long enough to send upstream.
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_CITY_QUERY_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_queries_are_not_searchable() {
        assert!(!is_searchable(""));
        assert!(!is_searchable("a"));
        assert!(!is_searchable("  b  "));
    }

    #[test]
    fn two_characters_are_enough() {
        assert!(is_searchable("Ly"));
        assert!(is_searchable(" Oslo "));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(!is_searchable("é"));
        assert!(is_searchable("Åb"));
    }
}
