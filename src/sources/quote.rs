// ZenQuotes random quote endpoint.
// The quote widget never errors: any failure falls back to a fixed quote.

use serde::Deserialize;

use crate::error::{DeckError, Result};

use super::client::SourceClient;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quote {
    /// Quote text.
    pub q: String,
    /// Author.
    pub a: String,
}

/// Shown whenever the quote source is unreachable or returns nothing.
pub fn fallback_quote() -> Quote {
    Quote {
        q: "Be yourself; everyone else is already taken.".to_string(),
        a: "Oscar Wilde".to_string(),
    }
}

impl SourceClient {
    /// Fetch one random quote. The API returns a one-element array.
    pub async fn fetch_random_quote(&self) -> Result<Quote> {
        let url = format!("{}/api/random", self.endpoints.quotes);
        let quotes: Vec<Quote> = self.get_json(&url, &[] as &[(&str, &str)]).await?;
        quotes
            .into_iter()
            .next()
            .ok_or_else(|| DeckError::Other("empty quote response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_quote_is_attributed() {
        let quote = fallback_quote();
        assert_eq!(quote.a, "Oscar Wilde");
        assert!(!quote.q.is_empty());
    }
}
