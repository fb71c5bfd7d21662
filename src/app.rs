// App state and main event loop.
// Owns every widget, dispatches keyboard input, and applies completed
// lookups coming back over the fetch-result channel.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::Result;
use crate::refresh::{self, RefreshOutcome, WidgetView};
use crate::settings::{ALL_WIDGETS, Settings, WidgetKind};
use crate::sources::quote::{Quote, fallback_quote};
use crate::sources::{IpGeolocator, SourceClient};
use crate::store::Store;
use crate::ui;
use crate::widgets::news::NewsLookup;
use crate::widgets::weather::WeatherLookup;
use crate::widgets::{
    BookmarksWidget, ClockWidget, NewsWidget, QuoteWidget, TodosWidget, WeatherWidget,
};

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// A completed lookup, sent from a spawned task back to the event loop.
#[derive(Debug)]
pub enum FetchResult {
    Weather {
        generation: u64,
        outcome: RefreshOutcome,
    },
    News {
        generation: u64,
        outcome: RefreshOutcome,
    },
    Quote {
        generation: u64,
        quote: Quote,
    },
}

/// What the next keystroke means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EditCity,
    AddFeed,
    AddTodo,
    AddBookmark,
}

impl InputMode {
    pub fn prompt(&self) -> &'static str {
        match self {
            InputMode::Normal => "",
            InputMode::EditCity => "City (blank for auto): ",
            InputMode::AddFeed => "Feed URL: ",
            InputMode::AddTodo => "New task: ",
            InputMode::AddBookmark => "Bookmark (url title): ",
        }
    }
}

/// Main application state.
pub struct App {
    pub store: Store,
    pub settings: Settings,
    pub weather: WeatherWidget,
    pub news: NewsWidget,
    pub clock: ClockWidget,
    pub todos: TodosWidget,
    pub bookmarks: BookmarksWidget,
    pub quote: QuoteWidget,
    /// Visible widgets in panel order; focus indexes into this.
    pub visible: Vec<WidgetKind>,
    pub focus: usize,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub toast: Option<(String, Instant)>,
    pub show_help: bool,
    pub should_quit: bool,
    weather_lookup: WeatherLookup<IpGeolocator>,
    news_lookup: NewsLookup,
    client: SourceClient,
    tx: UnboundedSender<FetchResult>,
    rx: UnboundedReceiver<FetchResult>,
}

impl App {
    pub fn new(store: Store) -> Result<Self> {
        let client = SourceClient::new()?;
        let weather_lookup =
            WeatherLookup::new(client.clone(), IpGeolocator::new(), store.clone());
        let news_lookup = NewsLookup::new(client.clone());
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            settings: Settings::load(&store),
            weather: WeatherWidget::load(&store),
            news: NewsWidget::load(&store),
            clock: ClockWidget::load(&store),
            todos: TodosWidget::load(&store),
            bookmarks: BookmarksWidget::load(&store),
            quote: QuoteWidget::new(),
            visible: Vec::new(),
            focus: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            toast: None,
            show_help: false,
            should_quit: false,
            weather_lookup,
            news_lookup,
            client,
            tx,
            rx,
            store,
        };
        app.rebuild_visible();
        Ok(app)
    }

    /// Main event loop.
    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        self.load_visible_widgets();
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
            while let Ok(result) = self.rx.try_recv() {
                self.apply_fetch_result(result);
            }
            self.expire_toast();
        }
        Ok(())
    }

    /// The widget the keyboard currently targets.
    pub fn focused(&self) -> Option<WidgetKind> {
        self.visible.get(self.focus).copied()
    }

    /// Kick off lookups for the network widgets that are on screen.
    /// Hidden widgets load lazily when restored.
    fn load_visible_widgets(&mut self) {
        if self.visible.contains(&WidgetKind::Weather) {
            self.refresh_weather();
        }
        if self.visible.contains(&WidgetKind::News) {
            self.refresh_news();
        }
        if self.visible.contains(&WidgetKind::Quote) {
            self.refresh_quote();
        }
    }

    fn rebuild_visible(&mut self) {
        self.visible = ALL_WIDGETS
            .into_iter()
            .filter(|widget| Settings::is_visible(&self.store, *widget))
            .collect();
        if self.focus >= self.visible.len() {
            self.focus = 0;
        }
    }

    /// Handle keyboard and other events.
    fn handle_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if self.input_mode != InputMode::Normal {
                self.handle_input_key(key.code);
            } else {
                self.handle_normal_key(key.code);
            }
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.cycle_focus(1),
            KeyCode::BackTab => self.cycle_focus(-1),
            KeyCode::Char('m') => self.settings.cycle_theme(&self.store),
            KeyCode::Char('2') => self.clock.toggle_format(&self.store),
            KeyCode::Char('x') => self.hide_focused(),
            KeyCode::Char('X') => self.restore_all(),
            KeyCode::Char('0') => self.reset_all(),
            KeyCode::Char('r') => self.refresh_focused(),
            _ => self.handle_widget_key(code),
        }
    }

    fn handle_widget_key(&mut self, code: KeyCode) {
        match self.focused() {
            Some(WidgetKind::Weather) => match code {
                KeyCode::Char('u') => {
                    self.weather.toggle_unit(&self.store);
                    self.refresh_weather();
                }
                KeyCode::Char('c') => {
                    self.input_buffer = self.weather.params.city.clone();
                    self.input_mode = InputMode::EditCity;
                }
                _ => {}
            },
            Some(WidgetKind::News) => match code {
                KeyCode::Char(']') | KeyCode::Right => {
                    if self.news.select_offset(&self.store, 1) {
                        self.refresh_news();
                    }
                }
                KeyCode::Char('[') | KeyCode::Left => {
                    if self.news.select_offset(&self.store, -1) {
                        self.refresh_news();
                    }
                }
                KeyCode::Char('a') => {
                    self.input_buffer.clear();
                    self.input_mode = InputMode::AddFeed;
                }
                _ => {}
            },
            Some(WidgetKind::Todos) => match code {
                KeyCode::Char('a') => {
                    self.input_buffer.clear();
                    self.input_mode = InputMode::AddTodo;
                }
                KeyCode::Char(' ') => self.todos.toggle_selected(&self.store),
                KeyCode::Char('d') => {
                    if self.todos.remove_selected(&self.store).is_some() {
                        self.show_toast("Task deleted. Press z to undo.");
                    }
                }
                KeyCode::Char('z') => {
                    if self.todos.undo_delete(&self.store) {
                        self.show_toast("Task restored!");
                    }
                }
                KeyCode::Char('J') => self.todos.move_selected(&self.store, true),
                KeyCode::Char('K') => self.todos.move_selected(&self.store, false),
                KeyCode::Char('j') | KeyCode::Down => self.todos.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.todos.select_prev(),
                _ => {}
            },
            Some(WidgetKind::Bookmarks) => match code {
                KeyCode::Char('a') => {
                    self.input_buffer.clear();
                    self.input_mode = InputMode::AddBookmark;
                }
                KeyCode::Char('d') => {
                    if self.bookmarks.remove_selected(&self.store).is_some() {
                        self.show_toast("Bookmark deleted!");
                    }
                }
                KeyCode::Char('J') => self.bookmarks.move_selected(&self.store, true),
                KeyCode::Char('K') => self.bookmarks.move_selected(&self.store, false),
                KeyCode::Char('j') | KeyCode::Down => self.bookmarks.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.bookmarks.select_prev(),
                _ => {}
            },
            Some(WidgetKind::Quote) => {
                if code == KeyCode::Char('n') {
                    self.refresh_quote();
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Enter => self.commit_input(),
            KeyCode::Char(c) => self.input_buffer.push(c),
            _ => {}
        }
    }

    fn commit_input(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        let mode = self.input_mode;
        self.input_mode = InputMode::Normal;
        match mode {
            InputMode::Normal => {}
            InputMode::EditCity => {
                self.weather.set_city(&self.store, &input);
                self.refresh_weather();
            }
            InputMode::AddFeed => {
                if !input.trim().is_empty() {
                    self.news.add_feed(&self.store, &input);
                    self.refresh_news();
                    self.show_toast("Feed added!");
                }
            }
            InputMode::AddTodo => {
                if !input.trim().is_empty() {
                    self.todos.add(&self.store, &input);
                    self.show_toast("Task added!");
                }
            }
            InputMode::AddBookmark => {
                if self.bookmarks.add_from_input(&self.store, &input) {
                    self.show_toast("Bookmark added!");
                } else if !input.trim().is_empty() {
                    self.show_toast("Bookmarks need a URL and a title.");
                }
            }
        }
    }

    fn cycle_focus(&mut self, offset: isize) {
        if self.visible.is_empty() {
            return;
        }
        let len = self.visible.len() as isize;
        self.focus = (self.focus as isize + offset).rem_euclid(len) as usize;
    }

    /// Manual refresh; on an error panel this is the retry control.
    fn refresh_focused(&mut self) {
        match self.focused() {
            Some(WidgetKind::Weather) => self.refresh_weather(),
            Some(WidgetKind::News) => self.refresh_news(),
            Some(WidgetKind::Quote) => self.refresh_quote(),
            _ => {}
        }
    }

    pub fn refresh_weather(&mut self) {
        let cache_key = self.weather.params.cache_key();
        if let Some(rendered) = refresh::read_fresh(&self.store, &cache_key) {
            self.weather.slot.show(rendered);
            return;
        }
        let generation = self.weather.slot.begin();
        let lookup = self.weather_lookup.clone();
        let params = self.weather.params.clone();
        let store = self.store.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome =
                refresh::run_refresh(&store, &params.cache_key(), || lookup.fetch(&params)).await;
            let _ = tx.send(FetchResult::Weather { generation, outcome });
        });
    }

    pub fn refresh_news(&mut self) {
        let cache_key = self.news.cache_key();
        if let Some(rendered) = refresh::read_fresh(&self.store, &cache_key) {
            self.news.slot.show(rendered);
            return;
        }
        let generation = self.news.slot.begin();
        let lookup = self.news_lookup.clone();
        let feed_url = self.news.selected.clone();
        let store = self.store.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome =
                refresh::run_refresh(&store, &cache_key, || lookup.fetch(&feed_url)).await;
            let _ = tx.send(FetchResult::News { generation, outcome });
        });
    }

    pub fn refresh_quote(&mut self) {
        let generation = self.quote.slot.begin();
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let quote = client
                .fetch_random_quote()
                .await
                .unwrap_or_else(|_| fallback_quote());
            let _ = tx.send(FetchResult::Quote { generation, quote });
        });
    }

    fn apply_fetch_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::Weather {
                generation,
                outcome,
            } => {
                self.weather.slot.complete(generation, outcome);
            }
            FetchResult::News {
                generation,
                outcome,
            } => {
                self.news.slot.complete(generation, outcome);
            }
            FetchResult::Quote { generation, quote } => {
                self.quote.complete(generation, quote);
            }
        }
    }

    fn hide_focused(&mut self) {
        let Some(widget) = self.focused() else {
            return;
        };
        Settings::set_visible(&self.store, widget, false);
        self.rebuild_visible();
        self.show_toast(format!("{} hidden. Press X to restore.", widget.title()));
    }

    fn restore_all(&mut self) {
        for widget in ALL_WIDGETS {
            Settings::set_visible(&self.store, widget, true);
        }
        self.rebuild_visible();
        self.load_idle_widgets();
    }

    /// Reset every stored setting and list, then reload from defaults.
    fn reset_all(&mut self) {
        self.store.clear();
        self.settings = Settings::load(&self.store);
        self.weather = WeatherWidget::load(&self.store);
        self.news = NewsWidget::load(&self.store);
        self.clock = ClockWidget::load(&self.store);
        self.todos = TodosWidget::load(&self.store);
        self.bookmarks = BookmarksWidget::load(&self.store);
        self.quote = QuoteWidget::new();
        self.rebuild_visible();
        self.load_visible_widgets();
        self.show_toast("Settings reset!");
    }

    /// Refresh network widgets that have never loaded (after a restore).
    fn load_idle_widgets(&mut self) {
        if self.weather.slot.view == WidgetView::Idle {
            self.refresh_weather();
        }
        if self.news.slot.view == WidgetView::Idle {
            self.refresh_news();
        }
        if self.quote.slot.view == WidgetView::Idle {
            self.refresh_quote();
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some((message.into(), Instant::now()));
    }

    fn expire_toast(&mut self) {
        if let Some((_, shown_at)) = &self.toast
            && shown_at.elapsed() >= TOAST_DURATION
        {
            self.toast = None;
        }
    }
}
