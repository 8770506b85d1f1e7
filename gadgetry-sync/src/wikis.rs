//! Wiki-list refresh: rebuild the interwiki data file from a wikistats
//! table feed.
//!
//! The feed is tab-separated with a header row; only the `prefix` and
//! `loclang` columns matter. The output is a `{prefix: localized name}`
//! JSON object the gadget ships as a data file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gadgetry_core::config::SOURCE_ROOT;

use crate::error::SyncError;
use crate::writer::{write_if_changed, WriteResult};

/// What a wiki-list refresh produced.
#[derive(Debug)]
pub struct WikiListReport {
    /// Number of wikis in the rebuilt list.
    pub count: usize,
    pub path: PathBuf,
    pub result: WriteResult,
}

/// Parse `feed` and write the JSON data file to `<root>/src/<file>`.
pub fn refresh_wiki_list(root: &Path, file: &str, feed: &str) -> Result<WikiListReport, SyncError> {
    let wikis = parse_wiki_list(feed)?;
    let mut json = serde_json::to_string_pretty(&wikis)?;
    json.push('\n');

    let path = root.join(SOURCE_ROOT).join(file);
    let result = write_if_changed(&path, &json)?;
    Ok(WikiListReport {
        count: wikis.len(),
        path,
        result,
    })
}

/// Extract `{prefix: localized name}` from a wikistats table feed.
///
/// A header without the required columns is fatal; a data row without them
/// is dropped with a warning.
pub fn parse_wiki_list(feed: &str) -> Result<BTreeMap<String, String>, SyncError> {
    let mut lines = feed.lines().map(|line| line.trim_end_matches('\r'));
    let header = lines
        .next()
        .ok_or_else(|| SyncError::Feed("empty feed".to_owned()))?;

    let columns: Vec<&str> = header.split('\t').collect();
    let prefix_idx = column(&columns, "prefix")?;
    let loclang_idx = column(&columns, "loclang")?;

    let mut wikis = BTreeMap::new();
    for line in lines.filter(|line| !line.is_empty()) {
        let fields: Vec<&str> = line.split('\t').collect();
        match (field(&fields, prefix_idx), field(&fields, loclang_idx)) {
            (Some(prefix), Some(loclang)) => {
                wikis.insert(prefix.to_owned(), loclang.to_owned());
            }
            _ => tracing::warn!("dropping malformed feed row: {line:?}"),
        }
    }
    Ok(wikis)
}

fn column(header: &[&str], name: &str) -> Result<usize, SyncError> {
    header
        .iter()
        .position(|c| *c == name)
        .ok_or_else(|| SyncError::Feed(format!("feed header has no {name:?} column")))
}

fn field<'a>(fields: &[&'a str], idx: usize) -> Option<&'a str> {
    fields.get(idx).copied().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FEED: &str = "id\tprefix\tlang\tloclang\tgood\n\
                        1\ten\tEnglish\tEnglish\t6000000\n\
                        2\tfr\tFrench\tfran\u{e7}ais\t2000000\n\
                        3\tde\tGerman\tDeutsch\t2500000\n";

    #[test]
    fn parses_prefix_to_localized_name() {
        let wikis = parse_wiki_list(FEED).unwrap();
        assert_eq!(wikis.len(), 3);
        assert_eq!(wikis["fr"], "fran\u{e7}ais");
        assert_eq!(wikis["de"], "Deutsch");
    }

    #[test]
    fn header_without_required_columns_is_fatal() {
        let err = parse_wiki_list("id\tlang\tgood\n1\ten\t1\n").unwrap_err();
        assert!(matches!(err, SyncError::Feed(_)));
        assert!(err.to_string().contains("prefix"));
    }

    #[test]
    fn short_rows_are_dropped_not_fatal() {
        let feed = "prefix\tloclang\nen\tEnglish\nbroken\nfr\tfran\u{e7}ais\n";
        let wikis = parse_wiki_list(feed).unwrap();
        assert_eq!(wikis.len(), 2);
        assert!(!wikis.contains_key("broken"));
    }

    #[test]
    fn crlf_feeds_parse_cleanly() {
        let feed = "prefix\tloclang\r\nen\tEnglish\r\n";
        let wikis = parse_wiki_list(feed).unwrap();
        assert_eq!(wikis["en"], "English");
    }

    #[test]
    fn data_file_is_sorted_pretty_json() {
        let tmp = TempDir::new().unwrap();
        let report = refresh_wiki_list(tmp.path(), "wikis.json", FEED).unwrap();

        assert_eq!(report.count, 3);
        assert!(matches!(report.result, WriteResult::Written { .. }));

        let written = fs::read_to_string(tmp.path().join("src/wikis.json")).unwrap();
        assert_eq!(
            written,
            "{\n  \"de\": \"Deutsch\",\n  \"en\": \"English\",\n  \"fr\": \"fran\u{e7}ais\"\n}\n"
        );

        let again = refresh_wiki_list(tmp.path(), "wikis.json", FEED).unwrap();
        assert!(matches!(again.result, WriteResult::Unchanged { .. }));
    }
}
