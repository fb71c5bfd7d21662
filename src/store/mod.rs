// Key-value store module.
// Persists settings, widget lists, and cached lookup results between sessions.

pub mod kv;
pub mod paths;

pub use kv::Store;
