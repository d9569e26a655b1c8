use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static HEADER_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^(ingrediënten|ingredienten|bahan-bahan|bahan-bahant|bahan|bahan-bahan saus|ingrediënten saus|taburan|garnering|saus|pelengkap|complementair|serveer|serveer suggestie|presentatie)\b.*[:;]?$",
        r"^(cara[- ]membuat|cara[- ]masak|bereiding|penyajian|methode)\b.*[:;]?$",
        r"^(i|ngrediënten|ngredienten)\b.*[:;]?$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const INGREDIENT_MARKERS: &[&str] = &["ingrediënten", "ingredienten", "bahan-bahan", "bahan"];
// Spice pastes are listed with the ingredients.
const PASTE_MARKERS: &[&str] = &["haluskan", "bumbu", "boemboe", "pasta"];
const INSTRUCTION_MARKERS: &[&str] = &["bereiding", "cara membuat", "details"];

const INSTRUCTION_NOISE: &[&str] = &[
    "copyright",
    "previous article",
    "next article",
    "details",
    "vorige artikel",
    "volgende artikel",
];
const INSTRUCTION_VERBS: &[&str] = &["snijd", "verhit", "bak ", "kook ", "voeg ", "roer ", "meng ", "wrijf "];

const MAX_INGREDIENT_CHARS: usize = 120;
const FALLBACK_DESCRIPTION_LINES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Ingredients,
    Instructions,
}

/// Body text split into its three parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segments {
    pub description: String,
    pub ingredient_lines: Vec<String>,
    pub instructions: String,
}

/// Single pass over the content lines, switching section on marker lines.
pub fn segment(lines: &[String]) -> Segments {
    let lines: Vec<&str> = lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()).collect();

    let mut current: Option<SectionKind> = None;
    let mut first_marker: Option<usize> = None;
    let mut ingredient_lines = Vec::new();
    let mut instruction_lines = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();

        // "i" / "ngrediënten" split across two lines
        if lower == "i" && lines.get(i + 1).is_some_and(|n| n.to_lowercase().starts_with("ngrediënten")) {
            first_marker.get_or_insert(i);
            current = Some(SectionKind::Ingredients);
            continue;
        }
        if lower.starts_with("ngrediënten") && i > 0 && lines[i - 1].to_lowercase() == "i" {
            continue;
        }

        if let Some(kind) = marker_kind(&lower) {
            first_marker.get_or_insert(i);
            current = Some(kind);
            continue;
        }

        match current {
            Some(SectionKind::Ingredients) => ingredient_lines.push(line.to_string()),
            Some(SectionKind::Instructions) => {
                if !INSTRUCTION_NOISE.iter().any(|n| lower.contains(n)) {
                    instruction_lines.push(line.to_string());
                }
            }
            None => {}
        }
    }

    let intro = match first_marker {
        Some(idx) => &lines[..idx],
        None => &lines[..lines.len().min(FALLBACK_DESCRIPTION_LINES)],
    };

    Segments {
        description: collapse_whitespace(&intro.join(" ")),
        ingredient_lines: ingredient_lines.into_iter().filter(|l| keep_ingredient(l)).collect(),
        instructions: instruction_lines.join("\n"),
    }
}

/// Exact, case-insensitive marker match after stripping trailing punctuation.
fn marker_kind(lower: &str) -> Option<SectionKind> {
    let key = lower.trim_end_matches([':', ';', '.']).trim_end();
    if INGREDIENT_MARKERS.contains(&key) || PASTE_MARKERS.contains(&key) {
        Some(SectionKind::Ingredients)
    } else if INSTRUCTION_MARKERS.contains(&key) {
        Some(SectionKind::Instructions)
    } else {
        None
    }
}

/// Drop sub-headers, leaked instructions and overly long lines.
fn keep_ingredient(line: &str) -> bool {
    let lower = line.to_lowercase();
    let lower = lower.trim();
    if HEADER_RES.iter().any(|re| re.is_match(lower)) {
        return false;
    }
    if line.chars().count() > MAX_INGREDIENT_CHARS {
        return false;
    }
    !INSTRUCTION_VERBS.iter().any(|v| lower.contains(v))
}

pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn splits_description_ingredients_instructions() {
        let seg = segment(&lines(
            "Een klassieker uit Padang.\nHeerlijk   pittig.\nIngrediënten:\n500 gr rundvlees\n2 el kecap manis\nBereiding\nStoof het vlees.\nCopyright 2020 kokkieblanda",
        ));
        assert_eq!(seg.description, "Een klassieker uit Padang. Heerlijk pittig.");
        assert_eq!(seg.ingredient_lines, vec!["500 gr rundvlees", "2 el kecap manis"]);
        assert_eq!(seg.instructions, "Stoof het vlees.");
    }

    #[test]
    fn paste_marker_counts_as_ingredients() {
        let seg = segment(&lines("Intro\nBahan\n1 kg kip\nBumbu:\n3 sjalotten\nCara membuat\nKook alles."));
        assert_eq!(seg.ingredient_lines, vec!["1 kg kip", "3 sjalotten"]);
        assert_eq!(seg.instructions, "Kook alles.");
    }

    #[test]
    fn split_marker_across_lines() {
        let seg = segment(&lines("Intro tekst\nI\nngrediënten\n2 el olie\nBereiding\nBak de uien."));
        assert_eq!(seg.description, "Intro tekst");
        assert_eq!(seg.ingredient_lines, vec!["2 el olie"]);
        assert_eq!(seg.instructions, "Bak de uien.");
    }

    #[test]
    fn no_marker_uses_first_lines() {
        let seg = segment(&lines("a\nb\nc\nd\ne\nf\ng"));
        assert_eq!(seg.description, "a b c d e");
        assert!(seg.ingredient_lines.is_empty());
        assert!(seg.instructions.is_empty());
    }

    #[test]
    fn ingredient_filters() {
        let long = "x".repeat(MAX_INGREDIENT_CHARS + 1);
        let text = format!(
            "Ingrediënten\nSaus:\n{}\nSnijd de ui fijn\n1 ui\nGarnering\n2 eieren",
            long
        );
        let seg = segment(&lines(&text));
        assert_eq!(seg.ingredient_lines, vec!["1 ui", "2 eieren"]);
    }

    #[test]
    fn article_footer_lines_leave_instructions() {
        let seg = segment(&lines(
            "Intro\nBereiding\nStoof het vlees.\nDetails: gepubliceerd 12 maart 2019\nNext article: Sate ayam",
        ));
        assert_eq!(seg.instructions, "Stoof het vlees.");
    }

    #[test]
    fn marker_requires_exact_line() {
        assert_eq!(marker_kind("bereiding:"), Some(SectionKind::Instructions));
        assert_eq!(marker_kind("boemboe"), Some(SectionKind::Ingredients));
        assert_eq!(marker_kind("bereiding van de saus"), None);
    }

    #[test]
    fn empty_input() {
        assert_eq!(segment(&[]), Segments::default());
    }
}
