// Quote widget.
// Random quote on demand; failures render the fixed fallback quote instead
// of an error panel. Deliberately uncached.

use crate::refresh::{RefreshSlot, WidgetView};
use crate::sources::quote::Quote;

#[derive(Debug, Default)]
pub struct QuoteWidget {
    pub slot: RefreshSlot,
}

impl QuoteWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a completed fetch; the caller substitutes the fallback quote on
    /// failure, so this only ever renders.
    pub fn complete(&mut self, generation: u64, quote: Quote) -> bool {
        let rendered = render_quote(&quote);
        // Reuse the slot's generation check via a synthetic outcome.
        self.slot.complete(
            generation,
            crate::refresh::RefreshOutcome::Fetched(rendered),
        )
    }

    pub fn view(&self) -> &WidgetView {
        &self.slot.view
    }
}

pub fn render_quote(quote: &Quote) -> String {
    format!("\u{201c}{}\u{201d}\n- {}", quote.q, quote.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::quote::fallback_quote;

    #[test]
    fn test_render_includes_text_and_author() {
        let rendered = render_quote(&fallback_quote());
        assert!(rendered.contains("Be yourself"));
        assert!(rendered.contains("Oscar Wilde"));
    }

    #[test]
    fn test_stale_quote_is_discarded() {
        let mut widget = QuoteWidget::new();
        let first = widget.slot.begin();
        let second = widget.slot.begin();
        assert!(widget.complete(second, fallback_quote()));
        assert!(!widget.complete(first, Quote {
            q: "old".to_string(),
            a: "nobody".to_string(),
        }));
    }
}
