pub mod rules;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::record::{Category, CategoryTags, RawRecord};
use rules::RuleTable;

/// How much of the description is considered for dish types.
const DISH_TYPE_DESCRIPTION_CHARS: usize = 200;
/// Primary ingredients are usually listed first.
const MAIN_INGREDIENT_LINES: usize = 3;

struct Rule {
    pattern: Regex,
    label: &'static str,
}

/// Compiled rule tables, one per category.
pub struct Detector {
    rules: Vec<(Category, Vec<Rule>)>,
}

impl Detector {
    pub fn new() -> Result<Self> {
        let rules = Category::ALL
            .iter()
            .map(|&category| Ok((category, compile(table_for(category))?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Propose candidate labels for every category. Pure function of the record's text.
    pub fn detect(&self, record: &RawRecord) -> CategoryTags {
        let mut tags = CategoryTags::default();
        for (category, rules) in &self.rules {
            let fields = fields_for(*category, record);
            let labels = tags.labels_mut(*category);
            for rule in rules {
                if fields.iter().any(|f| rule.pattern.is_match(f)) {
                    labels.insert(rule.label.to_string());
                }
            }
        }
        tags
    }
}

fn table_for(category: Category) -> RuleTable {
    match category {
        Category::Cuisine => rules::CUISINE,
        Category::DishType => rules::DISH_TYPE,
        Category::MainIngredient => rules::MAIN_INGREDIENT,
        Category::CookingMethod => rules::COOKING_METHOD,
        Category::Region => rules::REGION,
    }
}

fn compile(table: RuleTable) -> Result<Vec<Rule>> {
    table
        .iter()
        .map(|&(pattern, label)| {
            let pattern = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Invalid detection pattern for {}: {}", label, pattern))?;
            Ok(Rule { pattern, label })
        })
        .collect()
}

/// The record fields a category looks at. Each field is matched on its own.
fn fields_for(category: Category, record: &RawRecord) -> Vec<String> {
    match category {
        Category::Cuisine => vec![record.url.clone()],
        Category::DishType => vec![
            record.title.clone(),
            record.description.chars().take(DISH_TYPE_DESCRIPTION_CHARS).collect(),
        ],
        Category::MainIngredient => {
            let top: Vec<&str> = record
                .ingredients
                .iter()
                .take(MAIN_INGREDIENT_LINES)
                .map(|i| i.product.as_str())
                .collect();
            vec![record.title.clone(), top.join(" ")]
        }
        Category::CookingMethod => vec![record.instructions.clone()],
        Category::Region => vec![record.title.clone(), record.description.clone()],
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ingredients::parse_line;

    fn record(url: &str, title: &str, description: &str, instructions: &str, ingredients: &[&str]) -> RawRecord {
        let mut rec = RawRecord::empty(url);
        rec.title = title.to_string();
        rec.description = description.to_string();
        rec.instructions = instructions.to_string();
        rec.ingredients = ingredients.iter().map(|l| parse_line(l)).collect();
        rec
    }

    fn labels(tags: &CategoryTags, category: Category) -> Vec<&str> {
        tags.labels(category).iter().map(String::as_str).collect()
    }

    #[test]
    fn all_tables_compile() {
        let detector = Detector::new().unwrap();
        assert_eq!(detector.rules.len(), Category::ALL.len());
    }

    #[test]
    fn rendang_padang() {
        let rec = record(
            "https://www.kokkieblanda.nl/indonesian/daging-rundvlees/1909-rendang-padang",
            "Rendang Padang",
            "Een stoofgerecht uit Sumatra.",
            "Het vlees stoven in kokosmelk.",
            &["1 kg rundvlees", "1 liter santen"],
        );
        let tags = Detector::new().unwrap().detect(&rec);
        assert_eq!(labels(&tags, Category::Cuisine), vec!["indonesian"]);
        assert_eq!(labels(&tags, Category::DishType), vec!["stoofgerecht"]);
        assert_eq!(labels(&tags, Category::MainIngredient), vec!["daging-rundvlees"]);
        assert_eq!(labels(&tags, Category::CookingMethod), vec!["stoven"]);
        assert_eq!(labels(&tags, Category::Region), vec!["Padang", "Sumatra"]);
    }

    #[test]
    fn cuisine_only_from_url() {
        let rec = record("https://x.test/korea/soep/5-kimchi", "Indonesian style /thailand", "", "", &[]);
        let tags = Detector::new().unwrap().detect(&rec);
        assert_eq!(labels(&tags, Category::Cuisine), vec!["korean"]);
    }

    #[test]
    fn main_ingredient_uses_first_three_lines_only() {
        let rec = record(
            "https://x.test/a/b/1-x",
            "Gerecht",
            "",
            "",
            &["1 ui", "2 el olie", "zout", "500 gr kip"],
        );
        let tags = Detector::new().unwrap().detect(&rec);
        assert!(tags.main_ingredient.is_empty());
    }

    #[test]
    fn dish_type_ignores_late_description() {
        let mut description = "a".repeat(DISH_TYPE_DESCRIPTION_CHARS);
        description.push_str(" sambal");
        let rec = record("https://x.test/a/b/1-x", "Iets", &description, "", &[]);
        let tags = Detector::new().unwrap().detect(&rec);
        assert!(tags.dish_type.is_empty());
    }

    #[test]
    fn multiple_labels_collapse_to_set() {
        let rec = record("https://x.test/a/b/1-x", "Sate en saté", "soto sop", "koken en roerbakken, wokken", &[]);
        let tags = Detector::new().unwrap().detect(&rec);
        assert_eq!(labels(&tags, Category::DishType), vec!["sate", "soep"]);
        assert_eq!(labels(&tags, Category::CookingMethod), vec!["koken", "wokken"]);
    }

    #[test]
    fn nothing_matches() {
        let rec = record("https://x.test/", "", "", "", &[]);
        assert!(Detector::new().unwrap().detect(&rec).is_empty());
    }
}
