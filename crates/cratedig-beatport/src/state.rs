//! Embedded page state.
//!
//! Beatport pages are server-rendered with their data injected as a JSON
//! blob in a `<script id="__NEXT_DATA__">` element. That blob is the data
//! source for both search and release extraction.

use serde_json::Value;

use crate::binding::{STATE_ID, STATE_TAG};
use crate::error::ScrapeError;
use crate::fetch::Document;

/// Locate and decode the embedded state blob of a page.
pub fn embedded_state(document: &Document) -> Result<Value, ScrapeError> {
    let text = document
        .element_text(STATE_TAG, STATE_ID)
        .ok_or_else(|| ScrapeError::MissingEmbeddedState {
            url: document.url().to_string(),
        })?;

    serde_json::from_str(&text).map_err(|source| ScrapeError::InvalidEmbeddedState {
        url: document.url().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(script: &str) -> Document {
        Document::new(
            "https://www.beatport.com/search/releases",
            format!("<html><body>{script}</body></html>"),
        )
    }

    #[test]
    fn test_embedded_state_decodes_blob() {
        let doc = page(r#"<script id="__NEXT_DATA__">{"buildId": "b1", "props": {}}</script>"#);
        let state = embedded_state(&doc).unwrap();
        assert_eq!(state["buildId"], "b1");
    }

    #[test]
    fn test_embedded_state_missing_marker() {
        let doc = page(r#"<script id="other">{}</script>"#);
        assert!(matches!(
            embedded_state(&doc),
            Err(ScrapeError::MissingEmbeddedState { .. })
        ));
    }

    #[test]
    fn test_embedded_state_invalid_json() {
        let doc = page(r#"<script id="__NEXT_DATA__">{not json</script>"#);
        let err = embedded_state(&doc).unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidEmbeddedState { .. }));
        assert!(err.to_string().starts_with("could not decode embedded page state"));
    }
}
