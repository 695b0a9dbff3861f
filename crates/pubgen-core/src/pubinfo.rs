//! Publication-reference resolution: upstream publication info merged with
//! manual overrides into a status-tagged reference.

use crate::config_file::{DeclaredStatus, JournalStyles, PubsConfig};
use crate::record::{PublicationInfo, Record};

/// Journal details for a published record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Published {
    /// Display form, after `journal_map` translation.
    pub journal: String,
    pub volume: String,
    pub pages: String,
    pub year: String,
    pub doi: Option<String>,
    /// Upstream journal title; `None` when the details came from an override.
    pub upstream_journal: Option<String>,
}

/// Where a record stands, with only the fields that status carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedReference {
    Published(Published),
    Submitted {
        journal: String,
        doi: Option<String>,
    },
    Accepted {
        journal: String,
        doi: Option<String>,
    },
    BookChapter {
        verbatim: String,
        doi: Option<String>,
    },
    WhitePaper {
        verbatim: String,
        doi: Option<String>,
    },
    Unpublished {
        doi: Option<String>,
    },
}

impl ResolvedReference {
    pub fn status_name(&self) -> &'static str {
        match self {
            ResolvedReference::Published(_) => "published",
            ResolvedReference::Submitted { .. } => "submitted",
            ResolvedReference::Accepted { .. } => "accepted",
            ResolvedReference::BookChapter { .. } => "book_chapter",
            ResolvedReference::WhitePaper { .. } => "white_paper",
            ResolvedReference::Unpublished { .. } => "unpublished",
        }
    }
}

/// Resolve `record` against `config`.
///
/// A non-empty override DOI replaces the upstream one. Upstream publication
/// info with a journal name always means "published", whatever status an
/// override declares; only records without it fall back to the override.
pub fn resolve_reference(record: &Record, config: &PubsConfig) -> ResolvedReference {
    let texkey = record.texkey();
    let ovr = config.override_for(texkey);

    let doi = ovr
        .and_then(|o| o.doi.as_deref())
        .filter(|d| !d.is_empty())
        .unwrap_or(record.first_doi());
    let doi = (!doi.is_empty()).then(|| doi.to_string());

    if let Some(pi) = record.first_publication_info()
        && !pi.journal_title.is_empty()
    {
        return ResolvedReference::Published(Published {
            journal: config.journal_display(&pi.journal_title).to_string(),
            volume: pi.journal_volume.clone(),
            pages: resolve_pages(pi, &config.journal_styles),
            year: pi.year.clone(),
            doi,
            upstream_journal: Some(pi.journal_title.clone()),
        });
    }

    let Some(ovr) = ovr else {
        return ResolvedReference::Unpublished { doi };
    };

    match ovr.declared_status() {
        Some(DeclaredStatus::Published) => ResolvedReference::Published(Published {
            journal: ovr.journal.clone(),
            volume: ovr.volume.clone(),
            pages: ovr.pages.clone(),
            year: ovr.year.clone(),
            doi,
            upstream_journal: None,
        }),
        Some(DeclaredStatus::Submitted) => ResolvedReference::Submitted {
            journal: ovr.journal.clone(),
            doi,
        },
        Some(DeclaredStatus::Accepted) => ResolvedReference::Accepted {
            journal: ovr.journal.clone(),
            doi,
        },
        Some(DeclaredStatus::BookChapter) => ResolvedReference::BookChapter {
            verbatim: ovr.verbatim_ref.clone(),
            doi,
        },
        Some(DeclaredStatus::WhitePaper) => ResolvedReference::WhitePaper {
            verbatim: ovr.verbatim_ref.clone(),
            doi,
        },
        None => ResolvedReference::Unpublished { doi },
    }
}

/// Pages string for an upstream publication-info block.
///
/// Priority: issue (for issue-as-pages journals), then a distinct page
/// range, then article id, then start page.
pub fn resolve_pages(pi: &PublicationInfo, styles: &JournalStyles) -> String {
    let journal = pi.journal_title.as_str();

    if styles.issue_as_pages.contains(journal) && !pi.journal_issue.is_empty() {
        return pi.journal_issue.clone();
    }

    let start = pi.page_start.as_str();
    let end = pi.page_end.as_str();
    if !start.is_empty() && !end.is_empty() && start != end {
        if !styles.page_range.contains(journal) {
            // APS-style: the start page is the article number.
            return start.to_string();
        }
        // Letter pages (L42-L45) are not set in math mode.
        if start.starts_with(|c: char| c.is_alphabetic()) {
            return format!("{start}-{end}");
        }
        return format!("${start}-{end}$");
    }

    if !pi.artid.is_empty() {
        return pi.artid.clone();
    }

    start.to_string()
}

/// The arXiv id to link: override first (even if empty), then upstream.
pub fn resolve_arxiv_id<'a>(record: &'a Record, config: &'a PubsConfig) -> &'a str {
    match config
        .override_for(record.texkey())
        .and_then(|o| o.arxiv_id.as_deref())
    {
        Some(id) => id,
        None => record.first_arxiv_id(),
    }
}
