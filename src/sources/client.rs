// Shared HTTP client for the widget data sources.
// Holds one reqwest client plus the base URLs of every source, so tests can
// point individual sources at a mock server.

use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Base URLs for every external source.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Open-Meteo forecast API.
    pub weather: String,
    /// Open-Meteo geocoding API.
    pub geocoding: String,
    /// rss2json feed conversion API.
    pub feeds: String,
    /// ZenQuotes random quote API.
    pub quotes: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            weather: "https://api.open-meteo.com".to_string(),
            geocoding: "https://geocoding-api.open-meteo.com".to_string(),
            feeds: "https://api.rss2json.com".to_string(),
            quotes: "https://zenquotes.io".to_string(),
        }
    }
}

/// HTTP client shared by all widget lookups.
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
    pub endpoints: Endpoints,
}

impl SourceClient {
    /// Create a client with the production endpoints.
    pub fn new() -> Result<Self> {
        Self::with_endpoints(Endpoints::default())
    }

    /// Create a client against explicit base URLs (tests).
    pub fn with_endpoints(endpoints: Endpoints) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("startdeck-tui"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, endpoints })
    }

    /// GET a URL with query parameters and deserialize the JSON body.
    pub(crate) async fn get_json<T, P>(&self, url: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let response = self.client.get(url).query(params).send().await?;
        let value = response.error_for_status()?.json().await?;
        Ok(value)
    }
}
