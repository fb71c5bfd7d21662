// Open-Meteo forecast and geocoding endpoints.
// Typed responses for current conditions plus the fixed weather-code table.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::client::SourceClient;

/// Resolved location, persisted under `weather:coords` so the geolocation
/// lookup only runs once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
    /// City label from geocoding; geolocation leaves it unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Forecast response; `current_weather` is absent when the API has no
/// current-conditions data for the location.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub current_weather: Option<CurrentWeather>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub weathercode: u32,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingMatch>,
}

#[derive(Debug, Deserialize)]
struct GeocodingMatch {
    latitude: f64,
    longitude: f64,
    name: String,
}

impl SourceClient {
    /// Fetch current conditions for a location.
    pub async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
        fahrenheit: bool,
    ) -> Result<ForecastResponse> {
        let url = format!("{}/v1/forecast", self.endpoints.weather);
        let lat = lat.to_string();
        let lon = lon.to_string();
        let mut params = vec![
            ("latitude", lat.as_str()),
            ("longitude", lon.as_str()),
            ("current_weather", "true"),
            ("timezone", "auto"),
        ];
        if fahrenheit {
            params.push(("temperature_unit", "fahrenheit"));
        }
        self.get_json(&url, &params).await
    }

    /// Resolve a city name to coordinates; `None` when there is no match.
    pub async fn geocode_city(&self, city: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/v1/search", self.endpoints.geocoding);
        let params = [("name", city), ("count", "1")];
        let response: GeocodingResponse = self.get_json(&url, &params).await?;
        Ok(response.results.into_iter().next().map(|m| Coordinates {
            lat: m.latitude,
            lon: m.longitude,
            city: Some(m.name),
        }))
    }
}

/// Map an Open-Meteo weather code to a description and icon.
/// Codes outside the table render as an unknown placeholder, never a failure.
pub fn describe_weather_code(code: u32) -> (&'static str, &'static str) {
    match code {
        0 => ("Clear", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 => ("Fog", "🌫️"),
        48 => ("Depositing rime fog", "🌫️"),
        51 | 53 | 55 => ("Drizzle", "🌦️"),
        56 | 57 => ("Freezing Drizzle", "🌧️"),
        61 | 63 | 65 => ("Rain", "🌧️"),
        66 | 67 => ("Freezing Rain", "🌧️"),
        71 | 73 | 75 => ("Snow", "🌨️"),
        77 => ("Snow grains", "🌨️"),
        80 | 81 | 82 => ("Showers", "🌦️"),
        85 | 86 => ("Snow showers", "🌨️"),
        95 | 96 | 99 => ("Thunderstorm", "⛈️"),
        _ => ("?", "❓"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_codes() {
        assert_eq!(describe_weather_code(0), ("Clear", "☀️"));
        assert_eq!(describe_weather_code(2), ("Partly cloudy", "⛅"));
        assert_eq!(describe_weather_code(95), ("Thunderstorm", "⛈️"));
    }

    #[test]
    fn test_unknown_code_is_placeholder_not_failure() {
        assert_eq!(describe_weather_code(42), ("?", "❓"));
    }

    #[test]
    fn test_coordinates_round_trip_without_city() {
        let coords = Coordinates {
            lat: 48.85,
            lon: 2.35,
            city: None,
        };
        let json = serde_json::to_string(&coords).unwrap();
        let back: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coords);
    }
}
