// Bookmarks widget.
// Title + URL pairs with add, remove, and keyboard reordering, persisted
// under `bookmarks`.

use ratatui::widgets::ListState;
use serde::{Deserialize, Serialize};

use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

#[derive(Debug)]
pub struct BookmarksWidget {
    pub bookmarks: Vec<Bookmark>,
    pub list_state: ListState,
}

impl BookmarksWidget {
    pub fn load(store: &Store) -> Self {
        let bookmarks: Vec<Bookmark> = store.get("bookmarks", Vec::new());
        let mut list_state = ListState::default();
        if !bookmarks.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            bookmarks,
            list_state,
        }
    }

    /// Parse "url title words..." input and append. Both parts are required.
    pub fn add_from_input(&mut self, store: &Store, input: &str) -> bool {
        let Some((url, title)) = input.trim().split_once(' ') else {
            return false;
        };
        let (url, title) = (url.trim(), title.trim());
        if url.is_empty() || title.is_empty() {
            return false;
        }
        self.bookmarks.push(Bookmark {
            title: title.to_string(),
            url: url.to_string(),
        });
        store.set("bookmarks", &self.bookmarks);
        if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }
        true
    }

    pub fn remove_selected(&mut self, store: &Store) -> Option<String> {
        let i = self.list_state.selected()?;
        if i >= self.bookmarks.len() {
            return None;
        }
        let removed = self.bookmarks.remove(i);
        store.set("bookmarks", &self.bookmarks);
        if self.bookmarks.is_empty() {
            self.list_state.select(None);
        } else if i >= self.bookmarks.len() {
            self.list_state.select(Some(self.bookmarks.len() - 1));
        }
        Some(removed.title)
    }

    pub fn move_selected(&mut self, store: &Store, down: bool) {
        let Some(i) = self.list_state.selected() else {
            return;
        };
        let target = if down { i + 1 } else { i.wrapping_sub(1) };
        if target >= self.bookmarks.len() {
            return;
        }
        self.bookmarks.swap(i, target);
        store.set("bookmarks", &self.bookmarks);
        self.list_state.select(Some(target));
    }

    pub fn select_next(&mut self) {
        if self.bookmarks.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.bookmarks.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_prev(&mut self) {
        if self.bookmarks.is_empty() {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(i));
    }
}
