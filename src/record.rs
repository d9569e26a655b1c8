use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Yield written on every record; the source pages never state it reliably.
pub const DEFAULT_YIELD: &str = "4 personen";

/// One recipe page turned into structured fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub url: String,
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "raw_text")]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "yield", default = "default_yield")]
    pub recipe_yield: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
}

fn default_yield() -> String {
    DEFAULT_YIELD.to_string()
}

impl RawRecord {
    /// Empty record for `url`; extraction fills in whatever the page offers.
    pub fn empty(url: &str) -> Self {
        Self {
            url: url.to_string(),
            slug: slug_from_url(url),
            title: String::new(),
            description: String::new(),
            image: None,
            recipe_yield: default_yield(),
            instructions: String::new(),
            ingredients: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub raw: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub unit: String,
    pub product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_norm: Option<String>,
}

impl IngredientLine {
    /// Line that matched no quantity pattern.
    pub fn bare(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            amount: String::new(),
            unit: String::new(),
            product: raw.to_string(),
            product_norm: None,
        }
    }
}

/// Derive the recipe slug from its URL: last path segment without the `<id>-` prefix.
pub fn slug_from_url(url: &str) -> String {
    let clean = url.split('#').next().unwrap_or_default();
    let clean = clean.split('?').next().unwrap_or_default();
    let last = clean.trim_matches('/').rsplit('/').next().unwrap_or_default();

    match last.split_once('-') {
        Some((id, rest)) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => {
            rest.to_string()
        }
        _ => last.to_string(),
    }
}

// ── Categories ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Cuisine,
    DishType,
    MainIngredient,
    CookingMethod,
    Region,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Cuisine,
        Category::DishType,
        Category::MainIngredient,
        Category::CookingMethod,
        Category::Region,
    ];

    /// Key used in JSON dumps and as the graph's `categoryType` literal.
    pub fn key(self) -> &'static str {
        match self {
            Category::Cuisine => "cuisine",
            Category::DishType => "dish_type",
            Category::MainIngredient => "main_ingredient",
            Category::CookingMethod => "cooking_method",
            Category::Region => "region",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Labels per category. Used both for detector output and for the final,
/// vocabulary-filtered tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTags {
    #[serde(default, alias = "cuisines")]
    pub cuisine: BTreeSet<String>,
    #[serde(default, alias = "dish_types")]
    pub dish_type: BTreeSet<String>,
    #[serde(default, alias = "main_ingredients")]
    pub main_ingredient: BTreeSet<String>,
    #[serde(default, alias = "cooking_methods")]
    pub cooking_method: BTreeSet<String>,
    #[serde(default, alias = "regions")]
    pub region: BTreeSet<String>,
}

impl CategoryTags {
    pub fn labels(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Cuisine => &self.cuisine,
            Category::DishType => &self.dish_type,
            Category::MainIngredient => &self.main_ingredient,
            Category::CookingMethod => &self.cooking_method,
            Category::Region => &self.region,
        }
    }

    pub fn labels_mut(&mut self, category: Category) -> &mut BTreeSet<String> {
        match category {
            Category::Cuisine => &mut self.cuisine,
            Category::DishType => &mut self.dish_type,
            Category::MainIngredient => &mut self.main_ingredient,
            Category::CookingMethod => &mut self.cooking_method,
            Category::Region => &mut self.region,
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.labels(*c).is_empty())
    }
}

/// Raw dump element: the extracted record plus what the detector proposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedRecord {
    #[serde(flatten)]
    pub record: RawRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected: Option<CategoryTags>,
}

/// Record after consolidation: only promoted tags, normalized ingredient names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: RawRecord,
    pub tags: CategoryTags,
}

// ── Tests ──
