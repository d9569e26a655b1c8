use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use serde::Deserialize;

use super::normalize::clean;

const DEFAULT_SYNONYMS: &str = include_str!("../../config/synonyms.toml");

#[derive(Debug, Deserialize)]
struct SynonymEntry {
    canonical: String,
    #[serde(default)]
    variants: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SynonymFile {
    #[serde(default)]
    synonym: Vec<SynonymEntry>,
}

/// Variant → canonical ingredient names, longest variant first.
#[derive(Debug, Clone, Default)]
pub struct SynonymMap {
    variants: Vec<(String, String)>,
    canonicals: HashSet<String>,
}

impl SynonymMap {
    /// The curated table shipped in `config/synonyms.toml`.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(DEFAULT_SYNONYMS)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .context("Failed to parse synonym table")?;
        Self::from_config(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .build()
            .with_context(|| format!("Failed to read synonym table {}", path.display()))?;
        Self::from_config(cfg)
    }

    fn from_config(cfg: Config) -> Result<Self> {
        let file: SynonymFile = cfg.try_deserialize().context("Invalid synonym table")?;
        Ok(Self::from_entries(
            file.synonym
                .into_iter()
                .flat_map(|e| e.variants.into_iter().map(move |v| (v, e.canonical.clone()))),
        ))
    }

    /// Build from `(variant, canonical)` pairs. Both sides are cleaned the same way
    /// ingredient text is, so canonical names are stable under normalization.
    pub fn from_entries(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut variants: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(v, c)| (clean(&v), clean(&c)))
            .filter(|(v, c)| !v.is_empty() && !c.is_empty())
            .collect();
        variants.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });
        variants.dedup_by(|a, b| a.0 == b.0);

        let canonicals = variants.iter().map(|(_, c)| c.clone()).collect();
        Self { variants, canonicals }
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.canonicals.contains(name)
    }

    /// Canonical term for the longest variant occurring in `text`.
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.variants
            .iter()
            .find(|(variant, _)| text.contains(variant.as_str()))
            .map(|(_, canonical)| canonical.as_str())
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }
}
