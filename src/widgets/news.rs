// News widget controller.
// Fetches the selected feed through the conversion service and manages the
// user-extensible feed list.

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};
use crate::refresh::RefreshSlot;
use crate::sources::SourceClient;
use crate::sources::news::FeedItem;
use crate::store::Store;

/// How many items of a feed are rendered.
const MAX_ITEMS: usize = 6;

/// A selectable feed, persisted in the `newsFeeds` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDescriptor {
    pub name: String,
    pub url: String,
}

pub fn default_feeds() -> Vec<FeedDescriptor> {
    vec![
        FeedDescriptor {
            name: "Google News".to_string(),
            url: "https://news.google.com/rss?hl=en-US&gl=US&ceid=US:en".to_string(),
        },
        FeedDescriptor {
            name: "Hacker News".to_string(),
            url: "https://news.ycombinator.com/rss".to_string(),
        },
        FeedDescriptor {
            name: "BBC World".to_string(),
            url: "http://feeds.bbci.co.uk/news/world/rss.xml".to_string(),
        },
    ]
}

/// News panel state.
#[derive(Debug)]
pub struct NewsWidget {
    pub feeds: Vec<FeedDescriptor>,
    /// URL of the selected feed; part of the cache key.
    pub selected: String,
    pub slot: RefreshSlot,
}

impl NewsWidget {
    pub fn load(store: &Store) -> Self {
        let feeds = store.get("newsFeeds", default_feeds());
        let first_url = feeds
            .first()
            .map(|feed| feed.url.clone())
            .unwrap_or_default();
        let selected = store.get("newsFeedSelected", first_url);
        Self {
            feeds,
            selected,
            slot: RefreshSlot::new(),
        }
    }

    pub fn cache_key(&self) -> String {
        format!("newscache:{}", self.selected)
    }

    /// Index of the selected feed in the list, if it is still listed.
    pub fn selected_index(&self) -> Option<usize> {
        self.feeds.iter().position(|feed| feed.url == self.selected)
    }

    /// Display name of the selected feed.
    pub fn selected_name(&self) -> &str {
        self.selected_index()
            .map(|i| self.feeds[i].name.as_str())
            .unwrap_or(self.selected.as_str())
    }

    /// Select the next/previous feed in the list and persist the choice.
    /// Returns true when the selection actually changed.
    pub fn select_offset(&mut self, store: &Store, offset: isize) -> bool {
        if self.feeds.is_empty() {
            return false;
        }
        let current = self.selected_index().unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(self.feeds.len() as isize) as usize;
        let url = self.feeds[next].url.clone();
        if url == self.selected {
            return false;
        }
        self.selected = url;
        store.set("newsFeedSelected", &self.selected);
        true
    }

    /// Add a custom feed URL, persist the list, and select it.
    /// The display name is the URL stripped of its scheme and leading `www.`.
    pub fn add_feed(&mut self, store: &Store, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        self.feeds.push(FeedDescriptor {
            name: display_name(url),
            url: url.to_string(),
        });
        store.set("newsFeeds", &self.feeds);
        self.selected = url.to_string();
        store.set("newsFeedSelected", &self.selected);
    }
}

fn display_name(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    stripped
        .strip_prefix("www.")
        .unwrap_or(stripped)
        .to_string()
}

/// The news lookup, cloneable into a spawned refresh task.
#[derive(Debug, Clone)]
pub struct NewsLookup {
    client: SourceClient,
}

impl NewsLookup {
    pub fn new(client: SourceClient) -> Self {
        Self { client }
    }

    /// Fetch and render the selected feed. Every failure mode, including an
    /// empty feed, surfaces as the generic `NewsUnavailable`.
    pub async fn fetch(&self, feed_url: &str) -> Result<String> {
        self.fetch_inner(feed_url)
            .await
            .map_err(|_| DeckError::NewsUnavailable)
    }

    async fn fetch_inner(&self, feed_url: &str) -> Result<String> {
        let response = self.client.fetch_feed(feed_url).await?;
        if response.items.is_empty() {
            return Err(DeckError::EmptyFeed);
        }
        Ok(render_items(&response.items))
    }
}

fn render_items(items: &[FeedItem]) -> String {
    items
        .iter()
        .take(MAX_ITEMS)
        .map(|item| {
            let byline = item.byline();
            if byline.is_empty() {
                format!("• {}\n  {}", item.title, item.link)
            } else {
                format!("• {}\n  {}  {}", item.title, byline, item.link)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
