//! Staged blob naming.
//!
//! Staged names must not collide across uploads (two users uploading
//! `proposal.pdf` in the same project lifetime must produce two distinct
//! blobs) and must be safe to embed in a URL path segment.

use chrono::Utc;

/// Builds a collision-avoiding staged name for an uploaded file.
///
/// The name is `{unix-millis}-{sanitised-filename}`. The original filename
/// is kept (sanitised) so staged blobs remain recognisable in the staging
/// service's own tooling; the millisecond timestamp prefix avoids collisions
/// between repeated uploads of the same document.
///
/// Sanitisation replaces path separators and whitespace with `_` and drops
/// any character outside a conservative ASCII set. An empty or fully
/// sanitised-away filename falls back to `upload`.
pub fn staged_name(original_filename: &str) -> String {
    format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        sanitise(original_filename)
    )
}

fn sanitise(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ' ' | '\t' => '_',
            c => c,
        })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_name_keeps_filename() {
        let name = staged_name("proposal.pdf");
        assert!(name.ends_with("-proposal.pdf"));
    }

    #[test]
    fn test_staged_name_has_timestamp_prefix() {
        let name = staged_name("rfp.pdf");
        let (prefix, _) = name.split_once('-').unwrap();
        assert!(prefix.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_sanitise_replaces_separators() {
        assert_eq!(sanitise("a/b\\c d.pdf"), "a_b_c_d.pdf");
    }

    #[test]
    fn test_sanitise_drops_unsafe_characters() {
        assert_eq!(sanitise("tender%$£(v2).pdf"), "tenderv2.pdf");
    }

    #[test]
    fn test_sanitise_empty_falls_back() {
        assert_eq!(sanitise(""), "upload");
        assert_eq!(sanitise("£££"), "upload");
    }
}
