// Third-party HTTP sources consumed by the widgets.
// Each source module adds typed endpoint methods to the shared client.

pub mod client;
pub mod geolocate;
pub mod news;
pub mod quote;
pub mod weather;

pub use client::{Endpoints, SourceClient};
pub use geolocate::{Geolocate, IpGeolocator};
pub use weather::Coordinates;
