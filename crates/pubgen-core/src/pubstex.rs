//! Rendering of `pubs.tex`: one `\item` per record, grouped into the
//! Major Author, Contributing Author and Other Works sections.

use crate::authors::{
    detect_alphabetized, format_author_list_contributing, format_author_list_major,
};
use crate::classify::{Role, classify};
use crate::config_file::PubsConfig;
use crate::pubinfo::{Published, ResolvedReference, resolve_arxiv_id, resolve_reference};
use crate::record::Record;
use crate::title::get_title;

const VSKIP: &str = r"\vskip 4 pt ";

/// Journal/status text plus the arXiv link for one record.
pub fn format_reference(record: &Record, config: &PubsConfig) -> String {
    let arxiv_id = resolve_arxiv_id(record, config);
    let arxiv = if arxiv_id.is_empty() {
        String::new()
    } else {
        format!(r"(\href{{https://arxiv.org/abs/{arxiv_id}}}{{arXiv}})")
    };

    let resolved = resolve_reference(record, config);
    tracing::debug!(
        texkey = record.texkey(),
        status = resolved.status_name(),
        "resolved reference"
    );

    let mut reference = match resolved {
        ResolvedReference::Published(p) => format_published(&p, config),
        ResolvedReference::Submitted { journal, .. } => {
            format!(r"\textit{{submitted to {journal}}}")
        }
        ResolvedReference::Accepted { journal, .. } => {
            format!(r"\textit{{accepted by {journal}}}")
        }
        ResolvedReference::BookChapter { verbatim, .. }
        | ResolvedReference::WhitePaper { verbatim, .. } => verbatim,
        ResolvedReference::Unpublished { .. } => return arxiv,
    };

    if !arxiv.is_empty() {
        reference.push(' ');
        reference.push_str(&arxiv);
    }
    reference
}

fn format_published(p: &Published, config: &PubsConfig) -> String {
    let mut out = match &p.doi {
        Some(doi) => format!(r"\href{{https://doi.org/{doi}}}{{\textit{{{}}}}}", p.journal),
        None => format!(r"\textit{{{}}}", p.journal),
    };

    let issue_style = p
        .upstream_journal
        .as_deref()
        .is_some_and(|j| config.journal_styles.issue_style.contains(j));

    if issue_style {
        if !p.volume.is_empty() {
            out.push_str(&format!(" {}", p.volume));
        }
        if !p.pages.is_empty() {
            out.push_str(&format!(" {}", p.pages));
        }
    } else {
        if !p.volume.is_empty() {
            out.push_str(&format!(r" \textbf{{{}}}", p.volume));
        }
        if !p.pages.is_empty() {
            out.push_str(&format!(", {}", p.pages));
        }
    }

    out.push_str(&format!(" ({})", p.year));
    out
}

/// One `\item` line. `role` picks the author-list rendering; excluded
/// records are rendered like major ones if asked for.
pub fn format_item(record: &Record, config: &PubsConfig, role: Role) -> String {
    let star = if detect_alphabetized(record) { "*" } else { "" };
    let authors = match role {
        Role::Contributing => format_author_list_contributing(record, config),
        Role::Major | Role::Exclude => format_author_list_major(record, config),
    };
    let title = get_title(record, config);
    let reference = format_reference(record, config);

    let line = format!(r"    \item {star}{authors}, ``{title}'', {reference}.");
    match line.strip_suffix("..") {
        Some(trimmed) => format!("{trimmed}."),
        None => line,
    }
}

/// The complete `pubs.tex` document. Lines are joined with `\n` and there
/// is no trailing newline.
pub fn generate_pubstex(records: &[Record], config: &PubsConfig) -> String {
    let mut major = Vec::new();
    let mut contributing = Vec::new();
    for record in records {
        match classify(record.texkey(), config) {
            Role::Major => major.push(format_item(record, config, Role::Major)),
            Role::Contributing => {
                contributing.push(format_item(record, config, Role::Contributing))
            }
            Role::Exclude => {}
        }
    }
    tracing::info!(
        major = major.len(),
        contributing = contributing.len(),
        excluded = records.len() - major.len() - contributing.len(),
        "assembled publication list"
    );

    let mut lines: Vec<String> = Vec::new();

    lines.push(r"\textit{\textbf{Major Author}}".into());
    lines.push(r"\begin{enumerate}".into());
    lines.extend(major);
    lines.extend(
        config
            .extra_major_author
            .iter()
            .map(|extra| extra.trim_end().to_string()),
    );
    lines.push(r"\end{enumerate}".into());
    lines.push(String::new());
    lines.push(VSKIP.into());
    lines.push(String::new());

    lines.push(r"\textit{\textbf{Contributing Author}}".into());
    lines.push(String::new());
    lines.push(r"\begin{enumerate}[resume]".into());
    lines.extend(contributing);
    lines.push(r"\end{enumerate}".into());
    lines.push(String::new());
    lines.push(VSKIP.into());
    lines.push(String::new());

    lines.push(r"\textit{\textbf{Other Works}}".into());
    lines.push(r"\begin{enumerate}[resume]".into());
    lines.push(config.other_works.trim_end().to_string());
    lines.push(r"\end{enumerate}".into());

    lines.join("\n")
}
