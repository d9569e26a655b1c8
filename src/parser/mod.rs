pub mod html;
pub mod ingredients;
pub mod sections;

use crate::record::RawRecord;
use html::Page;

/// HTML → content lines → sections → record. Never fails; missing parts stay empty.
pub fn parse_recipe(html: &str, url: &str) -> RawRecord {
    let page = Page::parse(html);
    let mut record = RawRecord::empty(url);
    record.title = page.title();
    record.image = page.image(url);

    let lines = page.content_lines();
    if lines.is_empty() {
        return record;
    }

    let segments = sections::segment(&lines);
    record.description = segments.description;
    record.instructions = segments.instructions;
    record.ingredients = ingredients::parse_lines(&segments.ingredient_lines);
    record
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const RENDANG_URL: &str =
        "https://www.kokkieblanda.nl/indonesian/daging-rundvlees/1909-rendang-padang";

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn rendang_fixture() {
        let rec = parse_recipe(&fixture("rendang"), RENDANG_URL);
        assert_eq!(rec.slug, "rendang-padang");
        assert_eq!(rec.title, "Rendang Padang");
        assert_eq!(
            rec.image.as_deref(),
            Some("https://www.kokkieblanda.nl/images/recepten/rendang.jpg")
        );
        assert!(rec.description.starts_with("Rendang is het bekendste gerecht"));
        assert!(!rec.description.contains("Ingrediënten"));
        assert_eq!(rec.recipe_yield, "4 personen");

        let products: Vec<&str> = rec.ingredients.iter().map(|i| i.product.as_str()).collect();
        assert_eq!(
            products,
            vec![
                "rundvlees",
                "santen",
                "kecap manis",
                "sjalotten",
                "knoflook",
                "gember",
                "sereh",
                "sambal oelek",
            ]
        );
        assert_eq!(rec.ingredients[0].amount, "1");
        assert_eq!(rec.ingredients[0].unit, "kg");
        assert_eq!(rec.ingredients[7].amount, "100");
        assert_eq!(rec.ingredients[7].unit, "gr");

        assert!(rec.instructions.contains("Stoof het vlees"));
        assert!(!rec.instructions.to_lowercase().contains("copyright"));
    }

    #[test]
    fn soto_fixture_with_split_marker() {
        let url = "https://www.kokkieblanda.nl/indonesian/soep/2210-soto-ayam";
        let rec = parse_recipe(&fixture("soto_ayam"), url);
        assert_eq!(rec.slug, "soto-ayam");
        assert_eq!(rec.title, "Soto ayam");
        assert!(rec.description.contains("Java"));
        assert_eq!(rec.ingredients.len(), 4);
        assert_eq!(rec.ingredients[0].product, "kip");
        assert_eq!(rec.ingredients[3].product, "zout");
        assert_eq!(rec.ingredients[3].amount, "");
        assert!(rec.instructions.contains("koken"));
    }

    #[test]
    fn page_without_article() {
        let rec = parse_recipe("<html><body><h1>Oops</h1><p>nothing</p></body></html>", RENDANG_URL);
        assert_eq!(rec.title, "Oops");
        assert!(rec.description.is_empty());
        assert!(rec.ingredients.is_empty());
        assert!(rec.instructions.is_empty());
        assert!(rec.image.is_none());
    }

    #[test]
    fn garbage_input_does_not_panic() {
        let rec = parse_recipe("<<<>>> \u{0} not html", "not a url");
        assert_eq!(rec.slug, "not a url");
        assert!(rec.title.is_empty());
    }
}
