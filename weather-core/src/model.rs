use serde::Serialize;

/// Where to look up the weather: a free-text city name or a coordinate pair.
///
/// Coordinates are kept as the raw strings the caller sent; upstream validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    City(String),
    Coordinates { lat: String, lon: String },
}

impl LocationQuery {
    /// Pick the location mode from raw query parameters. A city name wins over
    /// coordinates; empty values count as absent.
    pub fn from_params(
        city: Option<&str>,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Option<Self> {
        let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_owned);

        if let Some(city) = present(city) {
            return Some(Self::City(city));
        }

        match (present(lat), present(lon)) {
            (Some(lat), Some(lon)) => Some(Self::Coordinates { lat, lon }),
            _ => None,
        }
    }

    /// Upstream query parameters for this location, without credentials.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::City(name) => vec![("q", name.as_str())],
            Self::Coordinates { lat, lon } => vec![("lat", lat.as_str()), ("lon", lon.as_str())],
        }
    }
}

/// Current conditions in the shape served to the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub temp: i64,
    pub feels_like: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_max: Option<i64>,
    pub humidity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<u32>,
    pub description: String,
    pub icon: String,
    /// Wind speed in km/h.
    pub wind: i64,
    /// Visibility in km, one decimal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

/// One autocomplete entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
    pub state: String,
    pub lat: f64,
    pub lon: f64,
}
