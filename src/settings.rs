// Settings: theme and per-widget visibility, plus the global reset.
// Everything lives in the store under the same keys the widgets read.

use serde::{Deserialize, Serialize};

use crate::store::Store;

/// Color theme, persisted under `theme`. A terminal gives no signal for
/// `Auto` to follow, so it renders dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn cycled(&self) -> Self {
        match self {
            Theme::Auto => Theme::Light,
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
        }
    }

    pub fn is_dark(&self) -> bool {
        !matches!(self, Theme::Light)
    }
}

/// Identifies a widget panel for visibility and focus purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Weather,
    Calendar,
    Todos,
    News,
    Quote,
    Bookmarks,
}

/// Fixed panel order on screen.
pub const ALL_WIDGETS: [WidgetKind; 6] = [
    WidgetKind::Weather,
    WidgetKind::Calendar,
    WidgetKind::Todos,
    WidgetKind::News,
    WidgetKind::Quote,
    WidgetKind::Bookmarks,
];

impl WidgetKind {
    /// Stable id used in the `widget:<id>:visible` keys.
    pub fn id(&self) -> &'static str {
        match self {
            WidgetKind::Weather => "weather-widget",
            WidgetKind::Calendar => "calendar-widget",
            WidgetKind::Todos => "todo-widget",
            WidgetKind::News => "news-widget",
            WidgetKind::Quote => "quote-widget",
            WidgetKind::Bookmarks => "bookmarks-widget",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WidgetKind::Weather => "Weather",
            WidgetKind::Calendar => "Calendar",
            WidgetKind::Todos => "To-Do",
            WidgetKind::News => "News",
            WidgetKind::Quote => "Quote",
            WidgetKind::Bookmarks => "Bookmarks",
        }
    }
}

#[derive(Debug)]
pub struct Settings {
    pub theme: Theme,
}

impl Settings {
    pub fn load(store: &Store) -> Self {
        Self {
            theme: store.get("theme", Theme::Auto),
        }
    }

    pub fn cycle_theme(&mut self, store: &Store) {
        self.theme = self.theme.cycled();
        store.set("theme", &self.theme);
    }

    pub fn is_visible(store: &Store, widget: WidgetKind) -> bool {
        store.get(&visibility_key(widget), true)
    }

    pub fn set_visible(store: &Store, widget: WidgetKind, visible: bool) {
        store.set(&visibility_key(widget), &visible);
    }
}

fn visibility_key(widget: WidgetKind) -> String {
    format!("widget:{}:visible", widget.id())
}
