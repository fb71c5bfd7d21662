// Device-position lookup behind a trait seam.
// A terminal has no geolocation capability, so the shipped implementation
// resolves the machine's public IP to coarse coordinates. Tests inject fakes.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{DeckError, Result};

use super::weather::Coordinates;

/// Geolocation gives up after this long.
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(6);

/// Single-shot position lookup. Fails with `LocationUnavailable` when the
/// capability is missing, denied, or times out.
pub trait Geolocate {
    fn locate(&self) -> impl Future<Output = Result<Coordinates>> + Send;
}

/// IP-based locator backed by ip-api.com.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

impl IpGeolocator {
    pub fn new() -> Self {
        Self::with_endpoint("http://ip-api.com".to_string())
    }

    pub fn with_endpoint(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    async fn locate_inner(&self) -> Result<Coordinates> {
        let url = format!("{}/json", self.endpoint);
        let response: IpApiResponse = self.client.get(&url).send().await?.json().await?;
        if response.status != "success" {
            return Err(DeckError::LocationUnavailable);
        }
        Ok(Coordinates {
            lat: response.lat,
            lon: response.lon,
            city: None,
        })
    }
}

impl Geolocate for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates> {
        match tokio::time::timeout(GEOLOCATION_TIMEOUT, self.locate_inner()).await {
            Ok(Ok(coords)) => Ok(coords),
            // Transport errors and timeouts both read as "no position".
            Ok(Err(_)) | Err(_) => Err(DeckError::LocationUnavailable),
        }
    }
}
