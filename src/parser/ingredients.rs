use std::sync::LazyLock;

use regex::Regex;

use crate::record::IngredientLine;

static TRAILING_QTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([\d.,/]+)\s*([a-zA-Z.]+)?\)$").unwrap());
static LEADING_QTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d.,/\s]+)\s+([a-zA-Z.]+)?\s*(.*)$").unwrap());

/// Units accepted after a leading quantity. Anything else is part of the product.
const UNIT_WHITELIST: &[&str] = &[
    // metric
    "gr", "g", "kg", "ml", "l", "cl", "dl", "cm", "gram", "kilo", "liter",
    // culinary
    "tl", "el", "theel", "eetl", "tsp", "tbsp", "cup", "cups", "theelepel", "theelepels",
    "eetlepel", "eetlepels", "cop", "theell",
    // containers and pieces
    "stuks", "stuk", "teentje", "teentjes", "blok", "blokken", "blik", "blikken", "pakje",
    "pakjes", "zakje", "zakjes", "fles", "flessen", "pot", "potten", "stengel", "stengels",
    "stokje", "stokjes", "blaadje", "blaadjes", "takje", "takjes", "kop", "koppen", "glazen",
    "glas", "kom", "kommen", "doosje", "doosjes", "tablet", "tabletten", "schijfje",
    "schijfjes", "plakje", "plakjes", "segment", "segmenten", "partje", "partjes",
    // vague
    "snuf", "snufje", "snufjes", "handvol", "scheut", "scheutje", "scheutjes", "mespunt",
    "mespuntje", "beetje",
];

pub fn is_known_unit(token: &str) -> bool {
    let lower = token.to_lowercase();
    let stripped = lower.trim_end_matches('.');
    UNIT_WHITELIST.contains(&stripped)
}

/// Parse retained ingredient lines. Lines shorter than two characters are dropped.
pub fn parse_lines(lines: &[String]) -> Vec<IngredientLine> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| l.chars().count() >= 2)
        .map(parse_line)
        .collect()
}

/// Split one line into amount, unit and product.
///
/// A leading quantity wins; otherwise a trailing `(500 g)` is used; otherwise the
/// whole line is the product.
pub fn parse_line(line: &str) -> IngredientLine {
    let line = line.trim();

    let (clean, trailing) = match TRAILING_QTY_RE.captures(line) {
        Some(caps) => {
            let start = caps.get(0).map_or(line.len(), |m| m.start());
            let amount = caps[1].to_string();
            let unit = caps.get(2).map_or("", |m| m.as_str()).to_string();
            (line[..start].trim(), Some((amount, unit)))
        }
        None => (line, None),
    };

    if let Some(caps) = LEADING_QTY_RE.captures(clean) {
        let amount = caps[1].trim().to_string();
        let rest = caps.get(3).map_or("", |m| m.as_str());
        let (unit, product) = match caps.get(2).map(|m| m.as_str()) {
            Some(candidate) if is_known_unit(candidate) => (candidate.to_string(), rest.to_string()),
            Some(candidate) => (String::new(), format!("{} {}", candidate, rest)),
            None => (String::new(), rest.to_string()),
        };
        return IngredientLine {
            raw: line.to_string(),
            amount,
            unit,
            product: product.trim().to_string(),
            product_norm: None,
        };
    }

    match trailing {
        Some((amount, unit)) => IngredientLine {
            raw: line.to_string(),
            amount,
            unit,
            product: clean.to_string(),
            product_norm: None,
        },
        None => IngredientLine::bare(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_unit_product() {
        let ing = parse_line("2 el kecap manis");
        assert_eq!(ing.amount, "2");
        assert_eq!(ing.unit, "el");
        assert_eq!(ing.product, "kecap manis");
        assert_eq!(ing.raw, "2 el kecap manis");
    }

    #[test]
    fn trailing_parenthesis_fallback() {
        let ing = parse_line("sambal oelek (100 gr)");
        assert_eq!(ing.amount, "100");
        assert_eq!(ing.unit, "gr");
        assert_eq!(ing.product, "sambal oelek");
        assert_eq!(ing.raw, "sambal oelek (100 gr)");
    }

    #[test]
    fn leading_quantity_beats_trailing() {
        let ing = parse_line("1 blik tomaten (400 gr)");
        assert_eq!(ing.amount, "1");
        assert_eq!(ing.unit, "blik");
        assert_eq!(ing.product, "tomaten");
    }

    #[test]
    fn unknown_unit_folds_into_product() {
        let ing = parse_line("3 rode uien");
        assert_eq!(ing.amount, "3");
        assert_eq!(ing.unit, "");
        assert_eq!(ing.product, "rode uien");
    }

    #[test]
    fn fractions_and_dotted_units() {
        let ing = parse_line("1 1/2 theel. ketoembar");
        assert_eq!(ing.amount, "1 1/2");
        assert_eq!(ing.unit, "theel.");
        assert_eq!(ing.product, "ketoembar");

        let ing = parse_line("0,5 L kokosmelk");
        assert_eq!(ing.amount, "0,5");
        assert_eq!(ing.unit, "L");
        assert_eq!(ing.product, "kokosmelk");
    }

    #[test]
    fn bare_product_kept() {
        let ing = parse_line("zout en peper");
        assert_eq!(ing.amount, "");
        assert_eq!(ing.unit, "");
        assert_eq!(ing.product, "zout en peper");
    }

    #[test]
    fn trailing_amount_without_unit() {
        let ing = parse_line("eieren (4)");
        assert_eq!(ing.amount, "4");
        assert_eq!(ing.unit, "");
        assert_eq!(ing.product, "eieren");
    }

    #[test]
    fn short_lines_dropped() {
        let parsed = parse_lines(&["x".to_string(), " ".to_string(), "2 el olie".to_string()]);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].product, "olie");
    }

    #[test]
    fn parsing_is_deterministic() {
        let line = "250 gr kipfilet, in blokjes";
        assert_eq!(parse_line(line), parse_line(line));
    }
}
