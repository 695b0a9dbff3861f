//! Post-processing of the BibTeX export: drop excluded entries and mark
//! selected ones for the website bibliography.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Lines added to a selected entry, right after its first line.
pub const SELECTION_LINES: [&str; 2] = ["    selected = {true},", "    bibtex_show = {true},"];

static KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@\w+\{([^,]+),").unwrap());
static SELECTED_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*selected\s*=").unwrap());

/// Which keys to drop and which to mark.
#[derive(Debug, Clone, Copy)]
pub struct BibSelection<'a> {
    pub excluded: &'a HashSet<String>,
    pub selected: &'a HashSet<String>,
}

/// What [`postprocess`] did to the blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BibSummary {
    /// Entries written out, including unparsed ones.
    pub kept: usize,
    /// Entries removed because their key is excluded.
    pub dropped: usize,
    /// Entries that gained the selection lines on this pass.
    pub marked: usize,
    /// Entries without a recognisable key, passed through untouched.
    pub unparsed: usize,
}

/// Split a BibTeX blob into entries.
///
/// Leading whitespace is dropped, then the text is cut at every newline
/// immediately followed by `@`. The newline belongs to neither side.
/// Entries that are only whitespace are discarded.
pub fn split_entries(raw: &str) -> Vec<&str> {
    let content = raw.trim_start();
    let mut entries = Vec::new();
    let mut start = 0;
    for (pos, _) in content.match_indices("\n@") {
        entries.push(&content[start..pos]);
        start = pos + 1;
    }
    entries.push(&content[start..]);
    entries.retain(|e| !e.trim().is_empty());
    entries
}

/// The citation key of an entry (`@article{KEY,`), trimmed.
pub fn entry_key(entry: &str) -> Option<&str> {
    KEY_RE
        .captures(entry)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Whether the entry already declares a `selected = ...` field.
pub fn has_selection_field(entry: &str) -> bool {
    SELECTED_FIELD_RE.is_match(entry)
}

/// Insert [`SELECTION_LINES`] after the first line of `entry`.
pub fn inject_selection(entry: &str) -> String {
    let injected = format!("{}\n{}\n", SELECTION_LINES[0], SELECTION_LINES[1]);
    match entry.find('\n') {
        Some(nl) => format!("{}{}{}", &entry[..=nl], injected, &entry[nl + 1..]),
        None => format!("{entry}\n{injected}"),
    }
}

/// Filter and mark every entry of `raw`; entries are re-joined with `\n`.
pub fn postprocess(raw: &str, selection: &BibSelection<'_>) -> (String, BibSummary) {
    let mut summary = BibSummary::default();
    let mut out: Vec<String> = Vec::new();

    for entry in split_entries(raw) {
        let Some(key) = entry_key(entry) else {
            tracing::debug!(
                start = entry.lines().next().unwrap_or_default(),
                "passing through BibTeX entry without a key"
            );
            summary.unparsed += 1;
            out.push(entry.to_string());
            continue;
        };

        if selection.excluded.contains(key) {
            tracing::debug!(key, "dropping excluded BibTeX entry");
            summary.dropped += 1;
            continue;
        }

        if selection.selected.contains(key) && !has_selection_field(entry) {
            summary.marked += 1;
            out.push(inject_selection(entry));
        } else {
            out.push(entry.to_string());
        }
    }

    summary.kept = out.len();
    tracing::info!(
        kept = summary.kept,
        dropped = summary.dropped,
        marked = summary.marked,
        unparsed = summary.unparsed,
        "post-processed BibTeX"
    );
    (out.join("\n"), summary)
}
