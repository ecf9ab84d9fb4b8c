//! Display strings for search candidates.

use std::fmt;

/// Builds the one-line summary shown next to a search candidate.
pub trait ResultFormatter: fmt::Debug + Send + Sync {
    fn format_result(&self, artists: &str, title: &str, detail: &str, track_count: usize)
        -> String;
}

/// Plain-text formatter: `Artists - Title {detail} [N tracks]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl ResultFormatter for PlainFormatter {
    fn format_result(
        &self,
        artists: &str,
        title: &str,
        detail: &str,
        track_count: usize,
    ) -> String {
        let mut line = format!("{artists} - {title}");
        let detail = detail.trim();
        if !detail.is_empty() {
            line.push_str(" {");
            line.push_str(detail);
            line.push('}');
        }
        let noun = if track_count == 1 { "track" } else { "tracks" };
        format!("{line} [{track_count} {noun}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatter_full() {
        let line = PlainFormatter.format_result("A, B", "Test EP", "2021 Label CAT001", 4);
        assert_eq!(line, "A, B - Test EP {2021 Label CAT001} [4 tracks]");
    }

    #[test]
    fn test_plain_formatter_single_track_without_detail() {
        let line = PlainFormatter.format_result("A", "Single", "  ", 1);
        assert_eq!(line, "A - Single [1 track]");
    }
}
