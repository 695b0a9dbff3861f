use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::record::string_or_number;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML config {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid YAML config {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Config text that failed to deserialize; no file involved.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// On-disk configuration format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.toml` is TOML; everything else (including `.yaml`/`.yml`) is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Run configuration. Read once, never mutated afterwards.
///
/// Collection keys may be present but empty (`title_overrides:` with no
/// value in YAML); those deserialize to the empty collection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PubsConfig {
    pub author_query: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub exclude: HashSet<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub contributing_author: HashSet<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub overrides: HashMap<String, Override>,
    #[serde(deserialize_with = "null_as_default")]
    pub title_overrides: HashMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub author_name_overrides: HashMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub journal_map: HashMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub extra_major_author: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub other_works: String,
    #[serde(deserialize_with = "null_as_default")]
    pub selected_papers: HashSet<String>,
    pub output_pubstex: Option<String>,
    pub output_pubstex_ci: Option<String>,
    pub output_bibtex: Option<String>,
    pub highlighted_author: HighlightedAuthor,
    pub journal_styles: JournalStyles,
    pub contributing: ContributingPolicy,
}

/// Manual per-texkey corrections to upstream data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Override {
    pub arxiv_id: Option<String>,
    pub doi: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub journal: String,
    #[serde(deserialize_with = "string_or_number")]
    pub volume: String,
    #[serde(deserialize_with = "string_or_number")]
    pub pages: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(deserialize_with = "string_or_number")]
    pub verbatim_ref: String,
}

/// Publication status an override may declare for a record with no
/// upstream publication info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredStatus {
    Published,
    Submitted,
    Accepted,
    BookChapter,
    WhitePaper,
}

impl DeclaredStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "published" => Some(Self::Published),
            "submitted" => Some(Self::Submitted),
            "accepted" => Some(Self::Accepted),
            "book_chapter" => Some(Self::BookChapter),
            "white_paper" => Some(Self::WhitePaper),
            _ => None,
        }
    }
}

impl Override {
    /// The declared status, if present and recognised.
    pub fn declared_status(&self) -> Option<DeclaredStatus> {
        let raw = self.status.as_deref()?;
        let parsed = DeclaredStatus::parse(raw);
        if parsed.is_none() {
            tracing::warn!(status = raw, "ignoring unrecognised override status");
        }
        parsed
    }
}

/// The author whose name is rendered specially and who anchors the
/// contributing-author truncation rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HighlightedAuthor {
    /// Substring looked for in the raw "Last, First" name.
    #[serde(rename = "match")]
    pub pattern: String,
    /// Literal emitted in place of the formatted name.
    pub display: String,
}

impl Default for HighlightedAuthor {
    fn default() -> Self {
        Self {
            pattern: "Philcox".to_string(),
            display: r"\textbf{Philcox, O.\,H.\,E.}".to_string(),
        }
    }
}

/// Journal-specific formatting quirks, keyed by the upstream journal title.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JournalStyles {
    /// Page ranges rendered as `$start-end$`.
    pub page_range: HashSet<String>,
    /// Issue number used in place of pages.
    pub issue_as_pages: HashSet<String>,
    /// "volume pages" without bold volume.
    pub issue_style: HashSet<String>,
}

impl Default for JournalStyles {
    fn default() -> Self {
        Self {
            page_range: ["Mon.Not.Roy.Astron.Soc.", "JHEAp"]
                .into_iter()
                .map(String::from)
                .collect(),
            issue_as_pages: ["Proc.Nat.Acad.Sci.", "Proc.Roy.Soc.Lond.A"]
                .into_iter()
                .map(String::from)
                .collect(),
            issue_style: ["JCAP"].into_iter().map(String::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ContributingPolicy {
    /// Author lists longer than this are truncated.
    pub truncate_above: usize,
    /// Highlighted author positions below this are listed explicitly.
    pub highlight_cutoff: usize,
}

impl Default for ContributingPolicy {
    fn default() -> Self {
        Self {
            truncate_above: 6,
            highlight_cutoff: 6,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PubsConfig {
    pub fn override_for(&self, texkey: &str) -> Option<&Override> {
        self.overrides.get(texkey)
    }

    /// Explicit title: `title_overrides` first, then `overrides.<key>.title`.
    pub fn title_override(&self, texkey: &str) -> Option<&str> {
        self.title_overrides
            .get(texkey)
            .map(String::as_str)
            .or_else(|| self.override_for(texkey).and_then(|o| o.title.as_deref()))
    }

    /// Translate an upstream journal title through `journal_map`.
    pub fn journal_display<'a>(&'a self, journal: &'a str) -> &'a str {
        self.journal_map
            .get(journal)
            .map(String::as_str)
            .unwrap_or(journal)
    }
}

/// Parse configuration text in the given format.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<PubsConfig, ParseError> {
    match format {
        ConfigFormat::Toml => Ok(toml::from_str(content)?),
        ConfigFormat::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

/// Load a config file, picking the format from its extension.
pub fn load_from_path(path: &Path) -> Result<PubsConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, ConfigFormat::from_path(path)).map_err(|err| {
        let path = path.to_path_buf();
        match err {
            ParseError::Toml(source) => ConfigError::Toml { path, source },
            ParseError::Yaml(source) => ConfigError::Yaml { path, source },
        }
    })
}
