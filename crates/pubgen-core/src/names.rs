//! Author-name normalization: "Last, First Middle" to "Last, F.\,M.".

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::config_file::HighlightedAuthor;

/// Spacer placed between consecutive initials.
pub const INITIAL_SPACER: &str = r"\,";

/// Accented characters that LaTeX needs spelled out in author names.
const UNICODE_TO_LATEX: &[(char, &str)] = &[
    ('\u{e4}', r#"\"a"#),
    ('\u{eb}', r#"\"e"#),
    ('\u{ef}', r#"\"\i"#),
    ('\u{f6}', r#"\"o"#),
    ('\u{fc}', r#"\"u"#),
    ('\u{c4}', r#"\"A"#),
    ('\u{d6}', r#"\"O"#),
    ('\u{dc}', r#"\"U"#),
    ('\u{e9}', r"\'e"),
    ('\u{e8}', r"\`e"),
    ('\u{e1}', r"\'a"),
    ('\u{e0}', r"\`a"),
    ('\u{ed}', r"\'\i"),
    ('\u{f3}', r"\'o"),
    ('\u{fa}', r"\'u"),
    ('\u{107}', r"\'c"),
    ('\u{10d}', r"\v{c}"),
    ('\u{161}', r"\v{s}"),
    ('\u{17e}', r"\v{z}"),
    ('\u{159}', r"\v{r}"),
    ('\u{f1}', r"\~n"),
    ('\u{f8}', r"{\o}"),
    ('\u{142}', r"{\l}"),
    ('\u{e6}', r"{\ae}"),
];

/// Decides whether a raw author name is the highlighted author, and what to
/// print in its place.
pub trait AuthorIdentity {
    fn matches(&self, full_name: &str) -> bool;
    fn display(&self) -> &str;
}

impl AuthorIdentity for HighlightedAuthor {
    fn matches(&self, full_name: &str) -> bool {
        !self.pattern.is_empty() && full_name.contains(&self.pattern)
    }

    fn display(&self) -> &str {
        &self.display
    }
}

/// Replace accented characters with their LaTeX escapes.
///
/// Input is NFC-composed first so that decomposed accents still hit the
/// table. Characters without an entry pass through unchanged.
pub fn unicode_to_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        match UNICODE_TO_LATEX.iter().find(|(u, _)| *u == c) {
            Some((_, latex)) => out.push_str(latex),
            None => out.push(c),
        }
    }
    out
}

/// Format a raw INSPIRE author name for display.
///
/// Precedence: highlighted identity, then exact-match override, then the
/// initialing rules. Names without a comma are transliterated and returned
/// as they are.
pub fn format_author_name(
    full_name: &str,
    overrides: &HashMap<String, String>,
    highlight: &dyn AuthorIdentity,
) -> String {
    if highlight.matches(full_name) {
        return highlight.display().to_string();
    }

    if let Some(name) = overrides.get(full_name) {
        return name.clone();
    }

    let Some((last, rest)) = full_name.split_once(',') else {
        return unicode_to_latex(full_name);
    };

    let last_name = unicode_to_latex(last.trim());
    let initials: Vec<String> = rest.split_whitespace().map(initial_for).collect();

    format!("{}, {}", last_name, initials.join(INITIAL_SPACER))
}

/// "Shi-Fan" -> "S.-F.", "M." -> "M.", "Oliver" -> "O.".
fn initial_for(token: &str) -> String {
    if token.contains('-') {
        return token
            .split('-')
            .filter_map(|part| part.chars().next())
            .map(|c| format!("{c}."))
            .collect::<Vec<_>>()
            .join("-");
    }

    if token.chars().count() <= 2 && token.ends_with('.') {
        return token.to_string();
    }

    match token.chars().next() {
        Some(c) => format!("{c}."),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(name: &str) -> String {
        format_author_name(name, &HashMap::new(), &HighlightedAuthor::default())
    }

    #[test]
    fn first_and_middle_names_become_initials() {
        assert_eq!(fmt("Ivanov, Mikhail Mikhailovich"), r"Ivanov, M.\,M.");
        assert_eq!(fmt("Hill, J. Colin"), r"Hill, J.\,C.");
    }

    #[test]
    fn hyphenated_given_names() {
        assert_eq!(fmt("Zhao, Shi-Fan"), "Zhao, S.-F.");
        assert_eq!(fmt("Kim, Jae-Won Ho"), r"Kim, J.-W.\,H.");
    }

    #[test]
    fn highlighted_author_short_circuits() {
        let bold = HighlightedAuthor::default().display;
        assert_eq!(fmt("Philcox, Oliver H.E."), bold);
        assert_eq!(fmt("Philcox, Oliver"), bold);
        assert_eq!(fmt("Philcox, O."), bold);
    }

    #[test]
    fn highlighted_author_beats_override() {
        let mut overrides = HashMap::new();
        overrides.insert("Philcox, Oliver".to_string(), "Someone else".to_string());
        let out = format_author_name(
            "Philcox, Oliver",
            &overrides,
            &HighlightedAuthor::default(),
        );
        assert_eq!(out, HighlightedAuthor::default().display);
    }

    #[test]
    fn override_is_returned_verbatim_and_is_a_fixed_point() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "de la Torre, Maria Jose".to_string(),
            "de la Torre, M.-J.".to_string(),
        );
        let highlight = HighlightedAuthor::default();
        let once = format_author_name("de la Torre, Maria Jose", &overrides, &highlight);
        let twice = format_author_name(&once, &overrides, &highlight);
        assert_eq!(once, "de la Torre, M.-J.");
        assert_eq!(once, twice);
    }

    #[test]
    fn highlighted_literal_is_a_fixed_point() {
        let bold = fmt("Philcox, Oliver H.E.");
        assert_eq!(fmt(&bold), bold);
    }

    #[test]
    fn surname_is_transliterated() {
        assert_eq!(fmt("Müller, Hans"), r#"M\"uller, H."#);
        assert_eq!(fmt("Sánchez, Ariel G."), r"S\'anchez, A.\,G.");
        assert_eq!(fmt("Dvořák, Jan"), r"Dvo\v{r}\'ak, J.");
    }

    #[test]
    fn decomposed_accents_are_composed_first() {
        assert_eq!(unicode_to_latex("Mu\u{308}ller"), r#"M\"uller"#);
    }

    #[test]
    fn name_without_comma_falls_back_to_transliteration() {
        assert_eq!(fmt("Planck Collaboration"), "Planck Collaboration");
        assert_eq!(fmt("Wrocław Group"), r"Wroc{\l}aw Group");
    }

    #[test]
    fn already_initialed_tokens_are_kept() {
        assert_eq!(fmt("Smith, J. R."), r"Smith, J.\,R.");
    }

    #[test]
    fn empty_given_names() {
        assert_eq!(fmt("Smith,"), "Smith, ");
    }

    #[test]
    fn custom_identity() {
        let me = HighlightedAuthor {
            pattern: "Curie".into(),
            display: r"\textbf{Curie, M.}".into(),
        };
        assert_eq!(
            format_author_name("Curie, Marie", &HashMap::new(), &me),
            r"\textbf{Curie, M.}"
        );
        assert_eq!(
            format_author_name("Philcox, Oliver", &HashMap::new(), &me),
            "Philcox, O."
        );
    }
}
