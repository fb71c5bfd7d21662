// To-do widget.
// Add, toggle, remove with single-level undo, and keyboard reordering.
// Every mutation persists the whole list under `todos`.

use ratatui::widgets::ListState;
use serde::{Deserialize, Serialize};

use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub text: String,
    pub done: bool,
}

#[derive(Debug)]
pub struct TodosWidget {
    pub todos: Vec<Todo>,
    pub list_state: ListState,
    last_deleted: Option<(usize, Todo)>,
}

impl TodosWidget {
    pub fn load(store: &Store) -> Self {
        let todos: Vec<Todo> = store.get("todos", Vec::new());
        let mut list_state = ListState::default();
        if !todos.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            todos,
            list_state,
            last_deleted: None,
        }
    }

    pub fn add(&mut self, store: &Store, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.todos.push(Todo {
            text: text.to_string(),
            done: false,
        });
        store.set("todos", &self.todos);
        if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }
    }

    pub fn toggle_selected(&mut self, store: &Store) {
        if let Some(i) = self.list_state.selected()
            && let Some(todo) = self.todos.get_mut(i)
        {
            todo.done = !todo.done;
            store.set("todos", &self.todos);
        }
    }

    /// Remove the selected item, remembering it for a single-level undo.
    pub fn remove_selected(&mut self, store: &Store) -> Option<String> {
        let i = self.list_state.selected()?;
        if i >= self.todos.len() {
            return None;
        }
        let removed = self.todos.remove(i);
        self.last_deleted = Some((i, removed.clone()));
        store.set("todos", &self.todos);
        self.clamp_selection();
        Some(removed.text)
    }

    /// Restore the last deleted item at its original index.
    pub fn undo_delete(&mut self, store: &Store) -> bool {
        let Some((index, todo)) = self.last_deleted.take() else {
            return false;
        };
        let index = index.min(self.todos.len());
        self.todos.insert(index, todo);
        store.set("todos", &self.todos);
        self.list_state.select(Some(index));
        true
    }

    /// Move the selected item up or down one slot.
    pub fn move_selected(&mut self, store: &Store, down: bool) {
        let Some(i) = self.list_state.selected() else {
            return;
        };
        let target = if down { i + 1 } else { i.wrapping_sub(1) };
        if target >= self.todos.len() {
            return;
        }
        self.todos.swap(i, target);
        store.set("todos", &self.todos);
        self.list_state.select(Some(target));
    }

    pub fn select_next(&mut self) {
        if self.todos.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.todos.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_prev(&mut self) {
        if self.todos.is_empty() {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(i));
    }

    fn clamp_selection(&mut self) {
        if self.todos.is_empty() {
            self.list_state.select(None);
        } else if let Some(i) = self.list_state.selected()
            && i >= self.todos.len()
        {
            self.list_state.select(Some(self.todos.len() - 1));
        }
    }
}
