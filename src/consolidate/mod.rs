pub mod normalize;
pub mod synonyms;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::{info, warn};

use crate::record::{Category, CategoryTags, DetectedRecord, EnrichedRecord};
use normalize::{normalize_ingredient, normalize_unit};
use synonyms::SynonymMap;

/// Labels promoted per category for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabularies {
    promoted: BTreeMap<Category, BTreeSet<String>>,
}

impl Vocabularies {
    pub fn labels(&self, category: Category) -> impl Iterator<Item = &str> {
        self.promoted
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn contains(&self, category: Category, label: &str) -> bool {
        self.promoted.get(&category).is_some_and(|set| set.contains(label))
    }

    pub fn len(&self, category: Category) -> usize {
        self.promoted.get(&category).map_or(0, BTreeSet::len)
    }
}

/// Every distinct normalized ingredient and unit in the corpus, unfiltered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ontology {
    pub ingredients: BTreeSet<String>,
    pub units: BTreeSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryReport {
    pub promoted: usize,
    pub candidates: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ConsolidationReport {
    pub per_category: BTreeMap<Category, CategoryReport>,
    /// Records dropped because an earlier record already had their slug.
    pub duplicates: usize,
    pub ingredients: usize,
    pub units: usize,
}

impl ConsolidationReport {
    fn log(&self) {
        info!("Consolidation results:");
        for (category, r) in &self.per_category {
            info!("  {} promoted: {} / {}", category, r.promoted, r.candidates);
        }
        info!("  Unique ingredients: {}", self.ingredients);
        info!("  Unique units: {}", self.units);
        if self.duplicates > 0 {
            info!("  Duplicate slugs dropped: {}", self.duplicates);
        }
    }
}

pub struct Consolidated {
    pub records: Vec<EnrichedRecord>,
    pub vocabularies: Vocabularies,
    pub ontology: Ontology,
    pub report: ConsolidationReport,
}

pub struct Consolidator {
    min_frequency: usize,
    synonyms: SynonymMap,
}

impl Consolidator {
    pub fn new(min_frequency: usize, synonyms: SynonymMap) -> Self {
        Self {
            min_frequency,
            synonyms,
        }
    }

    /// Count labels over the whole batch, promote the frequent ones, and rewrite each
    /// record with promoted tags and normalized ingredient names.
    pub fn process(&self, batch: Vec<DetectedRecord>) -> Consolidated {
        let (batch, duplicates) = dedup_by_slug(batch);
        let counts = count_labels(&batch);
        let vocabularies = promote(&counts, self.min_frequency);

        let mut ontology = Ontology::default();
        let mut records = Vec::with_capacity(batch.len());

        for DetectedRecord { mut record, detected } in batch {
            let detected = detected.unwrap_or_default();
            let mut tags = CategoryTags::default();
            for category in Category::ALL {
                let kept = detected
                    .labels(category)
                    .iter()
                    .filter(|l| vocabularies.contains(category, l))
                    .cloned();
                tags.labels_mut(category).extend(kept);
            }

            for line in &mut record.ingredients {
                if !line.product.is_empty() {
                    let norm = normalize_ingredient(&line.product, &self.synonyms);
                    if !norm.is_empty() {
                        ontology.ingredients.insert(norm.clone());
                    }
                    line.product_norm = Some(norm);
                }
                let unit = normalize_unit(&line.unit);
                if !unit.is_empty() {
                    ontology.units.insert(unit);
                }
            }

            records.push(EnrichedRecord { record, tags });
        }

        let report = ConsolidationReport {
            per_category: Category::ALL
                .iter()
                .map(|&c| {
                    let r = CategoryReport {
                        promoted: vocabularies.len(c),
                        candidates: counts.get(&c).map_or(0, HashMap::len),
                    };
                    (c, r)
                })
                .collect(),
            duplicates,
            ingredients: ontology.ingredients.len(),
            units: ontology.units.len(),
        };
        report.log();

        Consolidated {
            records,
            vocabularies,
            ontology,
            report,
        }
    }
}

/// Keep the first record per slug; the slug names the recipe node in the graph.
fn dedup_by_slug(batch: Vec<DetectedRecord>) -> (Vec<DetectedRecord>, usize) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(batch.len());
    let mut dropped = 0;
    for r in batch {
        if seen.insert(r.record.slug.clone()) {
            kept.push(r);
        } else {
            warn!("Dropping {}: slug '{}' already used", r.record.url, r.record.slug);
            dropped += 1;
        }
    }
    (kept, dropped)
}

type LabelCounts = HashMap<Category, HashMap<String, usize>>;

/// Number of records carrying each label, per category.
fn count_labels(batch: &[DetectedRecord]) -> LabelCounts {
    let mut counts: LabelCounts = HashMap::new();
    for detected in batch.iter().filter_map(|r| r.detected.as_ref()) {
        for category in Category::ALL {
            let per_label = counts.entry(category).or_default();
            for label in detected.labels(category) {
                *per_label.entry(label.clone()).or_default() += 1;
            }
        }
    }
    counts
}

fn promote(counts: &LabelCounts, min_frequency: usize) -> Vocabularies {
    let promoted = Category::ALL
        .iter()
        .map(|&category| {
            let labels = counts
                .get(&category)
                .into_iter()
                .flatten()
                .filter(|(_, &n)| n >= min_frequency)
                .map(|(label, _)| label.clone())
                .collect();
            (category, labels)
        })
        .collect();
    Vocabularies { promoted }
}

// ── Tests ──
