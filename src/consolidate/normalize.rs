use super::synonyms::SynonymMap;

/// Word endings that carry no meaning for ingredient identity ("salamblaadjes", "jeruk blad").
const FILLER_SUFFIXES: &[&str] = &["blaadjes", "blad"];

/// Canonical ingredient name for a raw product string. Idempotent.
pub fn normalize_ingredient(text: &str, synonyms: &SynonymMap) -> String {
    let cleaned = clean(text);
    if cleaned.is_empty() || synonyms.is_canonical(&cleaned) {
        return cleaned;
    }
    if let Some(canonical) = synonyms.lookup(&cleaned) {
        return canonical.to_string();
    }

    let stripped = strip_fillers(cleaned);
    match synonyms.lookup(&stripped) {
        Some(canonical) => canonical.to_string(),
        None => stripped,
    }
}

/// Unit names compare case-insensitively and without a trailing period.
pub fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase().trim_end_matches('.').trim().to_string()
}

/// Lowercase, drop punctuation noise, collapse whitespace, drop leading quantity remnants.
pub fn clean(text: &str) -> String {
    let spaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ',' | '*' | '\\' | '/' | '(' | ')' => ' ',
            c => c,
        })
        .collect();
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_start_matches(|c: char| c.is_numeric() || c.is_whitespace() || matches!(c, '.' | ',' | '/'))
        .to_string()
}

fn strip_fillers(mut text: String) -> String {
    loop {
        let next = clean(
            &text
                .split(' ')
                .map(strip_word_fillers)
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        );
        if next == text {
            return next;
        }
        text = next;
    }
}

fn strip_word_fillers(mut word: &str) -> &str {
    while let Some(rest) = FILLER_SUFFIXES.iter().find_map(|s| word.strip_suffix(s)) {
        word = rest;
    }
    word
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn norm(text: &str) -> String {
        normalize_ingredient(text, &SynonymMap::builtin().unwrap())
    }

    #[test]
    fn cleans_noise() {
        assert_eq!(norm("  Rode Ui, fijngesneden. "), "rode ui fijngesneden");
        assert_eq!(norm("*bawang/merah\\"), "bawang merah");
        assert_eq!(norm("kipfilet (zonder vel)"), "kipfilet zonder vel");
        assert_eq!(norm("½ theelepel zout"), "theelepel zout");
        assert_eq!(norm("1,5 kg rijst"), "kg rijst");
    }

    #[test]
    fn applies_synonyms() {
        assert_eq!(norm("santen"), "kokosmelk");
        assert_eq!(norm("Dikke santen"), "kokosmelk");
        assert_eq!(norm("kokosmelk"), "kokosmelk");
        assert_eq!(norm("ketjap manis"), "kecap manis");
        assert_eq!(norm("daun salam"), "salam blad");
        assert_eq!(norm("salamblaadjes"), "salam blad");
    }

    #[test]
    fn strips_filler_suffixes() {
        assert_eq!(norm("citroenblad"), "citroen");
        assert_eq!(norm("kerrie blaadjes"), "kerrie");
        assert_eq!(norm("bladerdeeg"), "bladerdeeg");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(norm(""), "");
        assert_eq!(norm(" ., */ "), "");
        assert_eq!(norm("½"), "");
    }

    #[test]
    fn unit_normalization() {
        assert_eq!(normalize_unit(" EL. "), "el");
        assert_eq!(normalize_unit("gr"), "gr");
        assert_eq!(normalize_unit(""), "");
    }

    #[test]
    fn canonical_names_are_fixed_points() {
        let map = SynonymMap::builtin().unwrap();
        for name in ["kokosmelk", "salam blad", "kecap manis", "jeruk purut", "gember"] {
            assert_eq!(normalize_ingredient(name, &map), name);
        }
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(s in "\\PC{0,40}") {
            let map = SynonymMap::builtin().unwrap();
            let once = normalize_ingredient(&s, &map);
            prop_assert_eq!(normalize_ingredient(&once, &map), once);
        }

        #[test]
        fn normalization_is_idempotent_on_ingredient_like_text(
            words in prop::collection::vec(
                prop::sample::select(vec![
                    "2", "½", "1/2", "el", "santen", "blad", "blaadjes", "salam", "daun",
                    "ketjap", "manis", ",", ".", "*", "/", "(", ")", "citroen", "kip",
                ]),
                0..8,
            )
        ) {
            let map = SynonymMap::builtin().unwrap();
            let once = normalize_ingredient(&words.join(" "), &map);
            prop_assert_eq!(normalize_ingredient(&once, &map), once);
        }

        #[test]
        fn unit_normalization_is_idempotent(s in "\\PC{0,12}") {
            let once = normalize_unit(&s);
            prop_assert_eq!(normalize_unit(&once), once);
        }
    }
}
