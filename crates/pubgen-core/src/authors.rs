use crate::config_file::PubsConfig;
use crate::names::{AuthorIdentity, format_author_name};
use crate::record::Record;

/// Author lists longer than this are checked by pairwise ordering instead of
/// an exact sort comparison.
const EXACT_SORT_MAX_AUTHORS: usize = 20;

/// Marker appended after a truncated contributing-author list.
pub const ET_AL: &str = r", \textit{et al.}";

/// Major-author rendering: every author, comma separated.
pub fn format_author_list_major(record: &Record, config: &PubsConfig) -> String {
    format_names(record.author_names(), config)
}

/// Contributing-author rendering.
///
/// - Short lists (up to `contributing.truncate_above`) are rendered in full.
/// - If the highlighted author sits before `contributing.highlight_cutoff`,
///   list everyone up to and including them, then "et al.".
/// - Otherwise list the first author and note the highlighted author in the
///   "et al." marker.
pub fn format_author_list_contributing(record: &Record, config: &PubsConfig) -> String {
    let policy = config.contributing;
    if record.authors.len() <= policy.truncate_above {
        return format_author_list_major(record, config);
    }

    let highlight = &config.highlighted_author;
    match highlight_position(record, highlight) {
        Some(pos) if pos < policy.highlight_cutoff => {
            let shown = format_names(record.author_names().take(pos + 1), config);
            format!("{shown}{ET_AL}")
        }
        _ => {
            let first = format_names(record.author_names().take(1), config);
            format!(r"{first}{ET_AL} (inc.\,\,{})", highlight.display())
        }
    }
}

fn format_names<'a>(names: impl Iterator<Item = &'a str>, config: &PubsConfig) -> String {
    names
        .map(|name| {
            format_author_name(
                name,
                &config.author_name_overrides,
                &config.highlighted_author,
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Zero-based index of the first author matching `highlight`.
pub fn highlight_position(record: &Record, highlight: &dyn AuthorIdentity) -> Option<usize> {
    record.author_names().position(|name| highlight.matches(name))
}

/// Whether the author list looks alphabetically ordered by surname.
///
/// Lists of up to 20 authors must be exactly sorted. Longer collaboration
/// lists count as alphabetized when at least 80% of adjacent pairs are in
/// non-decreasing order.
pub fn detect_alphabetized(record: &Record) -> bool {
    let last_names: Vec<String> = record
        .author_names()
        .map(|name| {
            name.split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_lowercase()
        })
        .collect();

    let n = last_names.len();
    if n <= 1 {
        return false;
    }

    if n <= EXACT_SORT_MAX_AUTHORS {
        return last_names.is_sorted();
    }

    let sorted_pairs = last_names.windows(2).filter(|w| w[0] <= w[1]).count();
    // sorted_pairs / (n - 1) >= 0.8
    sorted_pairs * 5 >= (n - 1) * 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Author;

    fn with_authors(names: &[&str]) -> Record {
        Record {
            authors: names.iter().map(|n| Author::new(*n)).collect(),
            ..Default::default()
        }
    }

    fn numbered(n: usize, highlight_at: Option<usize>) -> Record {
        let names: Vec<String> = (0..n)
            .map(|i| {
                if Some(i) == highlight_at {
                    "Philcox, Oliver H.E.".to_string()
                } else {
                    format!("Author{i}, First")
                }
            })
            .collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        with_authors(&refs)
    }

    #[test]
    fn major_lists_everyone() {
        let r = with_authors(&["Ivanov, Mikhail", "Philcox, Oliver", "Zhao, Shi-Fan"]);
        assert_eq!(
            format_author_list_major(&r, &PubsConfig::default()),
            r"Ivanov, M., \textbf{Philcox, O.\,H.\,E.}, Zhao, S.-F."
        );
    }

    #[test]
    fn short_contributing_list_equals_major() {
        let config = PubsConfig::default();
        for n in 0..=6 {
            let r = numbered(n, n.checked_sub(1));
            assert_eq!(
                format_author_list_contributing(&r, &config),
                format_author_list_major(&r, &config),
                "n = {n}"
            );
        }
    }

    #[test]
    fn early_highlight_lists_through_highlight() {
        let r = numbered(10, Some(2));
        assert_eq!(
            format_author_list_contributing(&r, &PubsConfig::default()),
            r"Author0, F., Author1, F., \textbf{Philcox, O.\,H.\,E.}, \textit{et al.}"
        );
    }

    #[test]
    fn late_highlight_lists_first_author_only() {
        let r = numbered(10, Some(8));
        assert_eq!(
            format_author_list_contributing(&r, &PubsConfig::default()),
            r"Author0, F., \textit{et al.} (inc.\,\,\textbf{Philcox, O.\,H.\,E.})"
        );
    }

    #[test]
    fn absent_highlight_matches_late_highlight() {
        let absent = numbered(10, None);
        let late = numbered(10, Some(6));
        let config = PubsConfig::default();
        assert_eq!(
            format_author_list_contributing(&absent, &config),
            format_author_list_contributing(&late, &config)
        );
    }

    #[test]
    fn cutoff_boundary() {
        let config = PubsConfig::default();
        let at_five = format_author_list_contributing(&numbered(8, Some(5)), &config);
        assert!(at_five.starts_with("Author0, F., Author1, F."));
        assert!(at_five.ends_with(r"\textbf{Philcox, O.\,H.\,E.}, \textit{et al.}"));

        let at_six = format_author_list_contributing(&numbered(8, Some(6)), &config);
        assert!(at_six.starts_with(r"Author0, F., \textit{et al.} (inc."));
    }

    #[test]
    fn alphabetized_small_lists() {
        assert!(detect_alphabetized(&with_authors(&[
            "Adams, A.",
            "Brown, B.",
            "Carter, C."
        ])));
        assert!(!detect_alphabetized(&with_authors(&[
            "Brown, B.",
            "Adams, A.",
            "Carter, C."
        ])));
    }

    #[test]
    fn alphabetized_is_case_insensitive() {
        assert!(detect_alphabetized(&with_authors(&["adams, A.", "Brown, B."])));
    }

    #[test]
    fn single_or_no_author_not_alphabetized() {
        assert!(!detect_alphabetized(&with_authors(&[])));
        assert!(!detect_alphabetized(&with_authors(&["Adams, A."])));
    }

    #[test]
    fn large_lists_tolerate_some_disorder() {
        // 25 surnames, 4 adjacent swaps: 20 of 24 pairs still ordered.
        let mut names: Vec<String> = (0..25).map(|i| format!("Name{i:02}, X.")).collect();
        for i in [0, 6, 12, 18] {
            names.swap(i, i + 1);
        }
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        assert!(detect_alphabetized(&with_authors(&refs)));

        let mut reversed = names.clone();
        reversed.reverse();
        let refs: Vec<&str> = reversed.iter().map(String::as_str).collect();
        assert!(!detect_alphabetized(&with_authors(&refs)));
    }
}
