// Store path utilities.
// Maps the flat key namespace onto one JSON file per key under the store root.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base store directory (~/.local/share/startdeck on Linux).
pub fn store_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "startdeck").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Encode a store key as a filename.
///
/// Keys embed colons and full URLs (`weathercache:Paris:c`,
/// `newscache:https://...`), so the encoding must be injective: two distinct
/// keys must never map to the same file. Alphanumerics, `-` and `.` pass
/// through; every other byte becomes `%XX`.
pub fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Filename (with extension) for a store key.
pub fn key_file(key: &str) -> String {
    format!("{}.json", encode_key(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_passthrough() {
        assert_eq!(encode_key("todos"), "todos");
        assert_eq!(encode_key("clock24h"), "clock24h");
    }

    #[test]
    fn test_encode_escapes_separators() {
        assert_eq!(encode_key("weather:city"), "weather%3Acity");
        assert_eq!(
            encode_key("newscache:http://a/b"),
            "newscache%3Ahttp%3A%2F%2Fa%2Fb"
        );
    }

    #[test]
    fn test_encode_is_injective_on_lookalike_keys() {
        // A literal '%' in a key must not collide with an escape sequence.
        assert_ne!(encode_key("a%3Ab"), encode_key("a:b"));
        assert_ne!(encode_key("a:b"), encode_key("a_b"));
    }

    #[test]
    fn test_key_file_extension() {
        assert_eq!(key_file("theme"), "theme.json");
    }
}
