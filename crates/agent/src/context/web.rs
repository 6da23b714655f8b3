//! Web search results rendered as a prompt block.

use crate::persona::WEB_RESULTS_HEADER;
use gargi_core::search::SearchHit;

/// A rendered search block and the URLs that fed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebContext {
    pub text: String,
    pub sources: Vec<String>,
}

impl WebContext {
    /// No block, no sources.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.sources.is_empty()
    }

    /// One `- {title}: {content}` line per hit, content capped at
    /// `max_snippet_chars`. Sources are the non-empty URLs in hit order.
    pub fn from_hits(hits: &[SearchHit], max_snippet_chars: usize) -> Self {
        if hits.is_empty() {
            return Self::empty();
        }

        let lines: Vec<String> = hits
            .iter()
            .map(|h| format!("- {}: {}", h.title, truncate(&h.content, max_snippet_chars)))
            .collect();

        Self {
            text: format!("{WEB_RESULTS_HEADER}{}", lines.join("\n")),
            sources: hits
                .iter()
                .filter(|h| !h.url.trim().is_empty())
                .map(|h| h.url.clone())
                .collect(),
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
