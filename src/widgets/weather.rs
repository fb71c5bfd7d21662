// Weather widget controller.
// Resolves coordinates (explicit city via geocoding, else persisted or
// geolocated position), fetches current conditions, and renders them.

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};
use crate::refresh::RefreshSlot;
use crate::sources::weather::describe_weather_code;
use crate::sources::{Coordinates, Geolocate, SourceClient};
use crate::store::Store;

/// Temperature unit, persisted under `weather:unit` as "c"/"f".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Unit {
    #[default]
    #[serde(rename = "c")]
    Celsius,
    #[serde(rename = "f")]
    Fahrenheit,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Unit::Celsius => Unit::Fahrenheit,
            Unit::Fahrenheit => Unit::Celsius,
        }
    }

    fn key_part(&self) -> &'static str {
        match self {
            Unit::Celsius => "c",
            Unit::Fahrenheit => "f",
        }
    }
}

/// Current request parameters. Changing either field changes the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeatherParams {
    /// City name; empty means locate automatically.
    pub city: String,
    pub unit: Unit,
}

impl WeatherParams {
    pub fn load(store: &Store) -> Self {
        Self {
            city: store.get("weather:city", String::new()),
            unit: store.get("weather:unit", Unit::Celsius),
        }
    }

    pub fn cache_key(&self) -> String {
        let city = self.city.trim();
        format!(
            "weathercache:{}:{}",
            if city.is_empty() { "auto" } else { city },
            self.unit.key_part()
        )
    }
}

/// Weather panel state.
#[derive(Debug, Default)]
pub struct WeatherWidget {
    pub params: WeatherParams,
    pub slot: RefreshSlot,
}

impl WeatherWidget {
    pub fn load(store: &Store) -> Self {
        Self {
            params: WeatherParams::load(store),
            slot: RefreshSlot::new(),
        }
    }

    /// Set the city and persist it. The next refresh uses the new cache key.
    pub fn set_city(&mut self, store: &Store, city: &str) {
        self.params.city = city.trim().to_string();
        store.set("weather:city", &self.params.city);
    }

    /// Flip the unit and persist it.
    pub fn toggle_unit(&mut self, store: &Store) {
        self.params.unit = self.params.unit.toggled();
        store.set("weather:unit", &self.params.unit);
    }
}

/// The weather lookup chain, cloneable into a spawned refresh task.
#[derive(Debug, Clone)]
pub struct WeatherLookup<G> {
    client: SourceClient,
    geolocator: G,
    store: Store,
}

impl<G: Geolocate> WeatherLookup<G> {
    pub fn new(client: SourceClient, geolocator: G, store: Store) -> Self {
        Self {
            client,
            geolocator,
            store,
        }
    }

    /// Run the full chain: coordinates, forecast, rendered output.
    ///
    /// Transport and parse failures collapse into the generic
    /// `WeatherUnavailable`; the not-found cases keep their messages.
    pub async fn fetch(&self, params: &WeatherParams) -> Result<String> {
        self.fetch_inner(params).await.map_err(|err| match err {
            err @ (DeckError::CityNotFound(_) | DeckError::LocationUnavailable) => err,
            _ => DeckError::WeatherUnavailable,
        })
    }

    async fn fetch_inner(&self, params: &WeatherParams) -> Result<String> {
        let coords = self.resolve_coordinates(params).await?;
        let forecast = self
            .client
            .fetch_forecast(coords.lat, coords.lon, params.unit == Unit::Fahrenheit)
            .await?;
        let current = forecast.current_weather.ok_or(DeckError::WeatherUnavailable)?;

        let (description, icon) = describe_weather_code(current.weathercode);
        let location = coords
            .city
            .as_deref()
            .or(forecast.timezone.as_deref())
            .unwrap_or("Local");
        Ok(format!(
            "{}{}  {} {}\n{}",
            current.temperature.round(),
            params.unit.symbol(),
            icon,
            description,
            location
        ))
    }

    async fn resolve_coordinates(&self, params: &WeatherParams) -> Result<Coordinates> {
        let city = params.city.trim();
        if !city.is_empty() {
            return self
                .client
                .geocode_city(city)
                .await?
                .ok_or_else(|| DeckError::CityNotFound(city.to_string()));
        }

        // No explicit city: reuse the persisted position so the geolocation
        // lookup only happens once.
        if let Some(coords) = self.store.get::<Option<Coordinates>>("weather:coords", None) {
            return Ok(coords);
        }
        let coords = self.geolocator.locate().await?;
        self.store.set("weather:coords", &coords);
        Ok(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::{self, CacheEntry, RefreshOutcome};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::sources::Endpoints;

    /// Geolocator returning a fixed position and counting invocations.
    #[derive(Clone)]
    struct FixedGeolocator {
        coords: Coordinates,
        calls: Arc<AtomicUsize>,
    }

    impl Geolocate for FixedGeolocator {
        async fn locate(&self) -> Result<Coordinates> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.coords.clone())
        }
    }

    /// Geolocator that always fails.
    #[derive(Clone)]
    struct NoGeolocator;

    impl Geolocate for NoGeolocator {
        async fn locate(&self) -> Result<Coordinates> {
            Err(DeckError::LocationUnavailable)
        }
    }

    fn test_client(server: &MockServer) -> SourceClient {
        SourceClient::with_endpoints(Endpoints {
            weather: server.uri(),
            geocoding: server.uri(),
            feeds: server.uri(),
            quotes: server.uri(),
        })
        .unwrap()
    }

    async fn mock_geocoding(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mock_forecast(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_cache_key_from_params() {
        let params = WeatherParams {
            city: "Paris".to_string(),
            unit: Unit::Celsius,
        };
        assert_eq!(params.cache_key(), "weathercache:Paris:c");

        let auto = WeatherParams {
            city: "  ".to_string(),
            unit: Unit::Fahrenheit,
        };
        assert_eq!(auto.cache_key(), "weathercache:auto:f");
    }

    #[test]
    fn test_distinct_params_never_collide() {
        let base = WeatherParams {
            city: "Paris".to_string(),
            unit: Unit::Celsius,
        };
        let other_city = WeatherParams {
            city: "Lyon".to_string(),
            ..base.clone()
        };
        let other_unit = WeatherParams {
            unit: Unit::Fahrenheit,
            ..base.clone()
        };
        assert_ne!(base.cache_key(), other_city.cache_key());
        assert_ne!(base.cache_key(), other_unit.cache_key());
    }

    #[test]
    fn test_unit_persists_as_short_form() {
        let store = Store::in_memory();
        let mut widget = WeatherWidget::load(&store);
        widget.toggle_unit(&store);
        assert_eq!(store.get("weather:unit", String::new()), "f");
        assert_eq!(WeatherParams::load(&store).unit, Unit::Fahrenheit);
    }

    #[tokio::test]
    async fn test_cold_cache_explicit_city_scenario() {
        let server = MockServer::start().await;
        mock_geocoding(
            &server,
            serde_json::json!({
                "results": [{"latitude": 48.85, "longitude": 2.35, "name": "Paris"}]
            }),
        )
        .await;
        mock_forecast(
            &server,
            serde_json::json!({
                "current_weather": {"temperature": 21.4, "weathercode": 2},
                "timezone": "Europe/Paris"
            }),
        )
        .await;

        let store = Store::in_memory();
        let lookup = WeatherLookup::new(test_client(&server), NoGeolocator, store.clone());
        let params = WeatherParams {
            city: "Paris".to_string(),
            unit: Unit::Celsius,
        };

        let outcome =
            refresh::run_refresh(&store, &params.cache_key(), || lookup.fetch(&params)).await;

        let RefreshOutcome::Fetched(rendered) = outcome else {
            panic!("expected a fetched rendering, got {outcome:?}");
        };
        assert!(rendered.contains("21°C"));
        assert!(rendered.contains("Partly cloudy"));
        assert!(rendered.contains("Paris"));

        let entry: Option<CacheEntry> = store.get("weathercache:Paris:c", None);
        assert!(entry.is_some(), "cache entry written under the params key");
    }

    #[tokio::test]
    async fn test_geocoding_miss_is_city_not_found_and_writes_nothing() {
        let server = MockServer::start().await;
        mock_geocoding(&server, serde_json::json!({})).await;

        let store = Store::in_memory();
        let lookup = WeatherLookup::new(test_client(&server), NoGeolocator, store.clone());
        let params = WeatherParams {
            city: "Nowhereville".to_string(),
            unit: Unit::Celsius,
        };

        let outcome =
            refresh::run_refresh(&store, &params.cache_key(), || lookup.fetch(&params)).await;
        assert_eq!(
            outcome,
            RefreshOutcome::Failed("City not found: Nowhereville".to_string())
        );

        let entry: Option<CacheEntry> = store.get(&params.cache_key(), None);
        assert!(entry.is_none());
    }

    #[tokio::test]
    async fn test_auto_location_geolocates_once_then_reuses_coords() {
        let server = MockServer::start().await;
        mock_forecast(
            &server,
            serde_json::json!({
                "current_weather": {"temperature": 12.0, "weathercode": 0},
                "timezone": "Europe/Berlin"
            }),
        )
        .await;

        let store = Store::in_memory();
        let calls = Arc::new(AtomicUsize::new(0));
        let geolocator = FixedGeolocator {
            coords: Coordinates {
                lat: 52.5,
                lon: 13.4,
                city: None,
            },
            calls: calls.clone(),
        };
        let lookup = WeatherLookup::new(test_client(&server), geolocator, store.clone());
        let params = WeatherParams::default();

        lookup.fetch(&params).await.unwrap();
        lookup.fetch(&params).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let coords: Option<Coordinates> = store.get("weather:coords", None);
        assert_eq!(coords.map(|c| (c.lat, c.lon)), Some((52.5, 13.4)));
    }

    #[tokio::test]
    async fn test_auto_location_without_position_fails() {
        let server = MockServer::start().await;
        let store = Store::in_memory();
        let lookup = WeatherLookup::new(test_client(&server), NoGeolocator, store.clone());

        let err = lookup.fetch(&WeatherParams::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Location unavailable");
    }

    #[tokio::test]
    async fn test_missing_current_weather_is_generic_failure() {
        let server = MockServer::start().await;
        mock_geocoding(
            &server,
            serde_json::json!({
                "results": [{"latitude": 1.0, "longitude": 2.0, "name": "X"}]
            }),
        )
        .await;
        mock_forecast(&server, serde_json::json!({"timezone": "UTC"})).await;

        let store = Store::in_memory();
        let lookup = WeatherLookup::new(test_client(&server), NoGeolocator, store);
        let params = WeatherParams {
            city: "X".to_string(),
            unit: Unit::Celsius,
        };
        let err = lookup.fetch(&params).await.unwrap_err();
        assert_eq!(err.to_string(), "Weather unavailable");
    }

    #[tokio::test]
    async fn test_fahrenheit_requests_unit_and_renders_symbol() {
        let server = MockServer::start().await;
        mock_geocoding(
            &server,
            serde_json::json!({
                "results": [{"latitude": 40.7, "longitude": -74.0, "name": "New York"}]
            }),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("temperature_unit", "fahrenheit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current_weather": {"temperature": 70.6, "weathercode": 1},
                "timezone": "America/New_York"
            })))
            .mount(&server)
            .await;

        let store = Store::in_memory();
        let lookup = WeatherLookup::new(test_client(&server), NoGeolocator, store);
        let params = WeatherParams {
            city: "New York".to_string(),
            unit: Unit::Fahrenheit,
        };
        let rendered = lookup.fetch(&params).await.unwrap();
        assert!(rendered.contains("71°F"));
    }
}
