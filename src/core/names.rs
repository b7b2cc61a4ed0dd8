//! Display-time name casing.
//!
//! Names are stored exactly as entered and only title-cased when rendered.

/// Words rendered entirely in lowercase when they appear as a separate word.
const LOWERCASE_WORDS: [&str; 3] = ["AND", "OF", "FAMILY"];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Title-cases a free-form name, keeping every separator exactly as written.
///
/// `"mary-jane o'brien"` becomes `"Mary-Jane O'Brien"`; connector words such as
/// `"family"` stay lowercase (`"Smith family"`).
#[must_use]
pub fn proper_name_case(name: &str) -> String {
    if name.chars().all(is_word_char) {
        return capitalize(name);
    }

    let mut out = String::with_capacity(name.len());
    let mut run_start = 0;
    let mut in_word = None;

    for (idx, c) in name.char_indices() {
        let word = is_word_char(c);
        if in_word.is_some_and(|current| current != word) {
            push_run(&mut out, &name[run_start..idx], in_word == Some(true));
            run_start = idx;
        }
        in_word = Some(word);
    }
    push_run(&mut out, &name[run_start..], in_word == Some(true));
    out
}

fn push_run(out: &mut String, run: &str, is_word: bool) {
    if !is_word {
        out.push_str(run);
    } else if LOWERCASE_WORDS.contains(&run.to_uppercase().as_str()) {
        out.push_str(&run.to_lowercase());
    } else {
        out.push_str(&proper_name_case(run));
    }
}

/// `"Last, First"` for roster display, with both parts title-cased.
#[must_use]
pub fn display_name(last_name: &str, first_name: &str) -> String {
    let last = proper_name_case(last_name.trim());
    let first = proper_name_case(first_name.trim());
    match (last.is_empty(), first.is_empty()) {
        (false, false) => format!("{last}, {first}"),
        (false, true) => last,
        (true, _) => first,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word() {
        assert_eq!(proper_name_case("smith"), "Smith");
        assert_eq!(proper_name_case("MCDONALD"), "Mcdonald");
        assert_eq!(proper_name_case(""), "");
    }

    #[test]
    fn test_punctuation_preserved() {
        assert_eq!(proper_name_case("mary-jane o'brien"), "Mary-Jane O'Brien");
        assert_eq!(proper_name_case("  doe,  jr. "), "  Doe,  Jr. ");
    }

    #[test]
    fn test_connector_words_lowercased() {
        assert_eq!(proper_name_case("smith family"), "Smith family");
        assert_eq!(proper_name_case("SMITH AND JONES"), "Smith and Jones");
        assert_eq!(proper_name_case("friends of the park"), "Friends of The Park");
    }

    #[test]
    fn test_connector_match_is_whole_word() {
        assert_eq!(proper_name_case("anderson"), "Anderson");
        assert_eq!(proper_name_case("offord family"), "Offord family");
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(proper_name_case("éloïse dupré"), "Éloïse Dupré");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("o'brien", "mary"), "O'Brien, Mary");
        assert_eq!(display_name("acme family", ""), "Acme family");
        assert_eq!(display_name("", "cher"), "Cher");
    }
}
