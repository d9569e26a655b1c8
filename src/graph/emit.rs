use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use sha2::{Digest, Sha256};

use super::model::{Graph, Object, Term};
use super::namespaces::{Namespaces, PROV, RDFS, RDF_TYPE, SCHEMA, SKOS, XSD};
use crate::consolidate::normalize::normalize_unit;
use crate::consolidate::{Ontology, Vocabularies};
use crate::record::{Category, EnrichedRecord, IngredientLine};

static NON_SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

const FOODON_UNMAPPED: &str = "FoodOn:unmapped";
const OM_UNMAPPED: &str = "OM:unmapped";

/// Where the graph came from, recorded on the dataset node.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub source: String,
    /// Left out of the graph when `None`, which keeps output reproducible.
    pub generated_at: Option<DateTime<Utc>>,
}

/// Lowercase, runs of anything outside `[a-z0-9]` become one `-`, edges trimmed.
pub fn slugify(text: &str) -> String {
    NON_SLUG_RE
        .replace_all(&text.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Blank node label for ingredient line `index` of recipe `slug`.
pub fn usage_id(slug: &str, index: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(slug.as_bytes());
    hasher.update([0u8]);
    hasher.update(index.to_string().as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("u{}", &digest[..16])
}

fn schema(local: &str) -> String {
    format!("{}{}", SCHEMA, local)
}

/// Build the knowledge graph for a consolidated corpus.
pub fn emit(
    records: &[EnrichedRecord],
    vocabularies: &Vocabularies,
    ontology: &Ontology,
    ns: &Namespaces,
    provenance: &Provenance,
) -> Graph {
    let mut g = Graph::new();

    for record in records {
        emit_recipe(&mut g, record, ns);
    }

    for category in Category::ALL {
        for label in vocabularies.labels(category) {
            let Some(node) = category_node(ns, category, label) else {
                continue;
            };
            g.add(&node, RDF_TYPE, Object::iri(schema("DefinedTerm")));
            g.add(&node, &schema("name"), Object::literal(label.replace('-', " ")));
            g.add(&node, &ns.kb("categoryType"), Object::literal(category.key()));
        }
    }

    for name in &ontology.ingredients {
        let Some(node) = local_node(&ns.ingredient, name) else {
            continue;
        };
        g.add(&node, RDF_TYPE, Object::iri(ns.kb("Ingredient")));
        g.add(&node, &format!("{}label", RDFS), Object::literal(name.as_str()));
        g.add(&node, &format!("{}exactMatch", SKOS), Object::literal(FOODON_UNMAPPED));
    }

    for name in &ontology.units {
        let Some(node) = local_node(&ns.unit, name) else {
            continue;
        };
        g.add(&node, RDF_TYPE, Object::iri(ns.kb("Unit")));
        g.add(&node, &format!("{}label", RDFS), Object::literal(name.as_str()));
        g.add(&node, &format!("{}closeMatch", SKOS), Object::literal(OM_UNMAPPED));
    }

    emit_dataset(&mut g, records.len(), ns, provenance);
    g
}

fn emit_recipe(g: &mut Graph, enriched: &EnrichedRecord, ns: &Namespaces) {
    let record = &enriched.record;
    let recipe = Term::iri(format!("{}{}", ns.recipe, record.slug));

    g.add(&recipe, RDF_TYPE, Object::iri(schema("Recipe")));
    let scalars = [
        ("name", record.title.as_str()),
        ("description", record.description.as_str()),
        ("image", record.image.as_deref().unwrap_or_default()),
        ("recipeInstructions", record.instructions.as_str()),
        ("recipeYield", record.recipe_yield.as_str()),
    ];
    if !record.url.is_empty() {
        g.add(&recipe, &schema("url"), Object::iri(record.url.as_str()));
    }
    for (property, value) in scalars {
        if !value.is_empty() {
            g.add(&recipe, &schema(property), Object::literal(value));
        }
    }

    for category in Category::ALL {
        let predicate = match category {
            Category::Cuisine => schema("recipeCuisine"),
            Category::MainIngredient => ns.kb("hasPrimaryIngredient"),
            Category::DishType => ns.kb("hasDishType"),
            Category::CookingMethod => ns.kb("usesCookingMethod"),
            Category::Region => ns.kb("hasCuisineRegion"),
        };
        for label in enriched.tags.labels(category) {
            if let Some(node) = category_node(ns, category, label) {
                g.add(&recipe, &predicate, node);
            }
        }
    }

    for (index, line) in record.ingredients.iter().enumerate() {
        let usage = Term::Blank(usage_id(&record.slug, index));
        emit_usage(g, &usage, line, ns);
        g.add(&recipe, &ns.kb("hasIngredientUsage"), usage);
        g.add(&recipe, &schema("recipeIngredient"), Object::literal(summary(line)));
    }
}

fn emit_usage(g: &mut Graph, usage: &Term, line: &IngredientLine, ns: &Namespaces) {
    g.add(usage, RDF_TYPE, Object::iri(ns.kb("IngredientUsage")));

    let name = line.product_norm.as_deref().unwrap_or(&line.product);
    if let Some(ingredient) = local_node(&ns.ingredient, name) {
        g.add(usage, &ns.kb("ingredient"), ingredient);
    }
    if !line.amount.is_empty() {
        g.add(usage, &schema("value"), Object::literal(line.amount.as_str()));
    }
    if !line.unit.is_empty() {
        g.add(usage, &schema("unitText"), Object::literal(line.unit.as_str()));
        if let Some(unit) = local_node(&ns.unit, &normalize_unit(&line.unit)) {
            g.add(usage, &ns.kb("unit"), unit);
        }
    }
}

fn emit_dataset(g: &mut Graph, recipes: usize, ns: &Namespaces, provenance: &Provenance) {
    let dataset = Term::iri(ns.kb("dataset"));
    g.add(&dataset, RDF_TYPE, Object::iri(format!("{}Entity", PROV)));
    if !provenance.source.is_empty() {
        g.add(
            &dataset,
            &format!("{}wasDerivedFrom", PROV),
            Object::iri(provenance.source.as_str()),
        );
    }
    g.add(
        &dataset,
        &ns.kb("recipeCount"),
        Object::Typed {
            value: recipes.to_string(),
            datatype: format!("{}integer", XSD),
        },
    );
    if let Some(at) = provenance.generated_at {
        g.add(
            &dataset,
            &format!("{}generatedAtTime", PROV),
            Object::Typed {
                value: at.to_rfc3339_opts(SecondsFormat::Secs, true),
                datatype: format!("{}dateTime", XSD),
            },
        );
    }
}

/// "amount unit product", skipping empty parts.
fn summary(line: &IngredientLine) -> String {
    [line.amount.as_str(), line.unit.as_str(), line.product.as_str()]
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn category_node(ns: &Namespaces, category: Category, label: &str) -> Option<Term> {
    local_node(ns.category_ns(category), label)
}

/// Node `namespace + slugify(name)`; nothing when the name has no slug.
fn local_node(namespace: &str, name: &str) -> Option<Term> {
    let slug = slugify(name);
    (!slug.is_empty()).then(|| Term::iri(format!("{}{}", namespace, slug)))
}

// ── Tests ──
