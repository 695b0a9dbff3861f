use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use pubgen_bib::BibSummary;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Top-level phase line, e.g. "Fetching BibTeX from INSPIRE...".
pub fn print_phase(w: &mut dyn Write, message: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", message.bold())
    } else {
        writeln!(w, "{}", message)
    }
}

pub fn print_fetched_papers(w: &mut dyn Write, count: usize) -> std::io::Result<()> {
    writeln!(w, "  Fetched {} papers", count)
}

pub fn print_fetched_bibtex(w: &mut dyn Write, bytes: usize) -> std::io::Result<()> {
    writeln!(w, "  Fetched BibTeX ({} bytes)", bytes)
}

pub fn print_wrote(w: &mut dyn Write, path: &Path, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "  {} {}", "Wrote".green(), path.display())
    } else {
        writeln!(w, "  Wrote {}", path.display())
    }
}

/// One-line account of what BibTeX post-processing changed.
pub fn print_bib_summary(
    w: &mut dyn Write,
    summary: &BibSummary,
    color: ColorMode,
) -> std::io::Result<()> {
    let mut msg = format!(
        "{} entries kept, {} excluded, {} newly selected",
        summary.kept, summary.dropped, summary.marked
    );
    if summary.unparsed > 0 {
        msg.push_str(&format!(", {} passed through unparsed", summary.unparsed));
    }
    if color.enabled() {
        writeln!(w, "  {}", msg.dimmed())
    } else {
        writeln!(w, "  {}", msg)
    }
}

/// Dry-run preview: a blank line, a `=== title ===` header, then the body.
pub fn print_preview(
    w: &mut dyn Write,
    title: &str,
    body: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    let header = format!("=== {} ===", title);
    if color.enabled() {
        writeln!(w, "{}", header.cyan())?;
    } else {
        writeln!(w, "{}", header)?;
    }
    writeln!(w, "{}", body)
}

/// First `max` characters of `s`, never splitting a character.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
