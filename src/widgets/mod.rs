// Widget controllers.
// Each widget owns its parameters and render state; the network-backed ones
// (weather, news, quote) drive their lookups through the refresh protocol.

pub mod bookmarks;
pub mod calendar;
pub mod clock;
pub mod news;
pub mod quote;
pub mod todos;
pub mod weather;

pub use bookmarks::BookmarksWidget;
pub use clock::ClockWidget;
pub use news::NewsWidget;
pub use quote::QuoteWidget;
pub use todos::TodosWidget;
pub use weather::WeatherWidget;
