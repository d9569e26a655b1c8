use anyhow::Result;
use indexmap::IndexSet;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::detect::Detector;
use crate::fetch::PageSource;
use crate::parser;
use crate::record::DetectedRecord;

/// Extraction stats returned after completion.
#[derive(Debug, Default, PartialEq)]
pub struct ExtractStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// Fetch, parse and detect every URL in order. A failed fetch skips that URL only.
pub async fn extract_batch<S: PageSource>(
    source: &S,
    urls: &[String],
    detector: &Detector,
) -> Result<(Vec<DetectedRecord>, ExtractStats)> {
    let total = urls.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta}) {msg}")?
            .progress_chars("=> "),
    );

    let mut records = Vec::with_capacity(total);
    let mut errors = 0usize;

    for url in urls {
        pb.set_message(url.clone());
        match source.fetch(url).await {
            Ok(html) => {
                let record = parser::parse_recipe(&html, url);
                let detected = detector.detect(&record);
                records.push(DetectedRecord {
                    record,
                    detected: Some(detected),
                });
            }
            Err(e) => {
                pb.suspend(|| warn!("Failed to process {}: {}", url, e));
                errors += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    let ok = records.len();
    info!("Extracted {} pages ({} ok, {} errors)", total, ok, errors);

    Ok((records, ExtractStats { total, ok, errors }))
}

/// URLs in first-seen order without repeats, capped at `limit`.
pub fn unique_urls(urls: Vec<String>, limit: Option<usize>) -> Vec<String> {
    let unique: IndexSet<String> = urls.into_iter().collect();
    unique.into_iter().take(limit.unwrap_or(usize::MAX)).collect()
}

/// Run detection for records loaded without it (older dumps). Returns how many were filled.
pub fn fill_detection(records: &mut [DetectedRecord], detector: &Detector) -> usize {
    let mut filled = 0;
    for r in records.iter_mut().filter(|r| r.detected.is_none()) {
        r.detected = Some(detector.detect(&r.record));
        filled += 1;
    }
    filled
}
