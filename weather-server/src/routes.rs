//! HTTP routes: `/`, `/weather` and `/cities`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use weather_core::{
    CityGeocoder, CitySuggestion, LocationQuery, WeatherError, WeatherProvider,
    provider::is_searchable,
};

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// Shared, immutable handles to the upstream clients.
#[derive(Debug, Clone)]
pub struct AppState {
    weather: Arc<dyn WeatherProvider>,
    geocoder: Arc<dyn CityGeocoder>,
}

impl AppState {
    pub fn new(weather: Arc<dyn WeatherProvider>, geocoder: Arc<dyn CityGeocoder>) -> Self {
        Self { weather, geocoder }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/weather", get(get_weather))
        .route("/cities", get(get_cities))
        .with_state(state)
}

/// Query parameters accepted by `/weather`.
#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Query parameters accepted by `/cities`.
#[derive(Debug, Deserialize)]
pub struct CitiesParams {
    pub q: Option<String>,
}

/// Serves the single-page client shell.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Current conditions by city name or coordinates.
async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Response {
    let location = match LocationQuery::from_params(
        params.city.as_deref(),
        params.lat.as_deref(),
        params.lon.as_deref(),
    ) {
        Some(location) => location,
        None => return error_response(StatusCode::BAD_REQUEST, "No location provided"),
    };

    match state.weather.current_weather(&location).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            match &err {
                WeatherError::NotFound { .. } => {
                    tracing::debug!("Weather lookup for {:?} failed: {}", location, err)
                }
                _ => tracing::warn!("Weather lookup for {:?} failed: {}", location, err),
            }
            error_response(status_for(&err), err.user_message())
        }
    }
}

/// Autocomplete suggestions. Always 200; failures yield `[]`.
async fn get_cities(
    State(state): State<AppState>,
    Query(params): Query<CitiesParams>,
) -> Json<Vec<CitySuggestion>> {
    let query = params.q.as_deref().unwrap_or_default().trim();

    if !is_searchable(query) {
        return Json(Vec::new());
    }

    Json(state.geocoder.search_cities(query).await)
}

fn status_for(err: &WeatherError) -> StatusCode {
    match err {
        WeatherError::Unreachable(_) => StatusCode::BAD_GATEWAY,
        WeatherError::NotFound { .. } => StatusCode::NOT_FOUND,
        WeatherError::MalformedPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
