//! Bibliographic records as returned by the INSPIRE-HEP literature API.
//!
//! Every field is optional upstream, so every field here defaults to empty.
//! Accessors return `&str` and fall back to `""` rather than `Option` because
//! the formatting pipeline treats "missing" and "empty" identically.

use serde::{Deserialize, Deserializer};

/// One bibliographic item (the `metadata` object of a search hit).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub texkeys: Vec<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub titles: Vec<TitleVariant>,
    #[serde(default)]
    pub arxiv_eprints: Vec<IdentifierValue>,
    #[serde(default)]
    pub dois: Vec<IdentifierValue>,
    #[serde(default)]
    pub publication_info: Vec<PublicationInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Author {
    /// "Last, First Middle".
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleVariant {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentifierValue {
    #[serde(default)]
    pub value: String,
}

/// A publication-info block. INSPIRE mixes strings and integers for these
/// fields, so all of them are normalized to strings on the way in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicationInfo {
    #[serde(default, deserialize_with = "string_or_number")]
    pub journal_title: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub journal_volume: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub journal_issue: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub page_start: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub page_end: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub artid: String,
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

impl Author {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
        }
    }
}

impl Record {
    /// The stable identifier used for overrides and classification.
    pub fn texkey(&self) -> &str {
        self.texkeys.first().map(String::as_str).unwrap_or("")
    }

    pub fn first_arxiv_id(&self) -> &str {
        self.arxiv_eprints
            .first()
            .map(|e| e.value.as_str())
            .unwrap_or("")
    }

    pub fn first_doi(&self) -> &str {
        self.dois.first().map(|d| d.value.as_str()).unwrap_or("")
    }

    pub fn first_publication_info(&self) -> Option<&PublicationInfo> {
        self.publication_info.first()
    }

    /// True when the first publication-info block names a journal.
    pub fn has_journal(&self) -> bool {
        self.first_publication_info()
            .is_some_and(|pi| !pi.journal_title.is_empty())
    }

    /// The title variant tagged as coming from arXiv, if any.
    pub fn arxiv_title(&self) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.source.eq_ignore_ascii_case("arxiv"))
            .map(|t| t.title.as_str())
    }

    pub fn author_names(&self) -> impl Iterator<Item = &str> {
        self.authors.iter().map(|a| a.full_name.as_str())
    }
}
