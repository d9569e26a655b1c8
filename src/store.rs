use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::record::DetectedRecord;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Pretty JSON, UTF-8 as-is. Parent directories are created when missing.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    write_text(path, &text)
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), bytes = text.len(), "wrote file");
    Ok(())
}

pub fn load_urls(path: &Path) -> Result<Vec<String>> {
    read_json(path)
}

pub fn save_urls(path: &Path, urls: &[String]) -> Result<()> {
    write_json(path, urls)
}

pub fn load_raw(path: &Path) -> Result<Vec<DetectedRecord>> {
    read_json(path)
}

pub fn save_raw(path: &Path, records: &[DetectedRecord]) -> Result<()> {
    write_json(path, records)
}

/// Concatenate raw dumps in order. The first record seen for a URL wins.
pub fn merge_raw(inputs: &[impl AsRef<Path>]) -> Result<Vec<DetectedRecord>> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for input in inputs {
        let path = input.as_ref();
        let records = load_raw(path)?;
        let total = records.len();
        let before = merged.len();
        merged.extend(records.into_iter().filter(|r| seen.insert(r.record.url.clone())));
        info!(
            "{}: {} records, {} new",
            path.display(),
            total,
            merged.len() - before
        );
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;

    fn record(url: &str, title: &str) -> DetectedRecord {
        let mut record = RawRecord::empty(url);
        record.title = title.to_string();
        DetectedRecord {
            record,
            detected: None,
        }
    }

    #[test]
    fn raw_dump_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/raw.json");
        let records = vec![record("https://x.test/a/b/1-saté", "Saté ayam")];

        save_raw(&path, &records).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Saté ayam"));
        assert!(text.contains("\n  "));
        assert_eq!(load_raw(&path).unwrap(), records);
    }

    #[test]
    fn urls_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let urls = vec!["https://x.test/a/b/1-x".to_string(), "https://x.test/a/b/2-y".to_string()];
        save_urls(&path, &urls).unwrap();
        assert_eq!(load_urls(&path).unwrap(), urls);
    }

    #[test]
    fn merge_keeps_first_record_per_url() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        save_raw(&a, &[record("https://x.test/a/b/1-x", "first"), record("https://x.test/a/b/2-y", "y")]).unwrap();
        save_raw(&b, &[record("https://x.test/a/b/1-x", "second"), record("https://x.test/a/b/3-z", "z")]).unwrap();

        let merged = merge_raw(&[&a, &b]).unwrap();
        let titles: Vec<_> = merged.iter().map(|r| r.record.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "y", "z"]);
    }

    #[test]
    fn missing_or_invalid_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_raw(&dir.path().join("missing.json")).is_err());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{not json").unwrap();
        let err = load_raw(&bad).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
