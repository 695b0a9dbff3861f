//! Turns INSPIRE-HEP literature records into a LaTeX publication list.
//!
//! Every formatting step is a pure function of a [`Record`] and the
//! read-only [`PubsConfig`]. Network access lives behind [`RecordSource`].

pub mod authors;
pub mod classify;
pub mod config_file;
pub mod names;
pub mod pubinfo;
pub mod pubstex;
pub mod record;
pub mod source;
pub mod title;

// Re-export for convenience
pub use classify::{Role, classify};
pub use config_file::{
    ConfigError, ConfigFormat, ParseError, PubsConfig, load_from_path, parse_config,
};
pub use names::{AuthorIdentity, format_author_name};
pub use pubinfo::{ResolvedReference, resolve_reference};
pub use pubstex::{format_item, format_reference, generate_pubstex};
pub use record::Record;
pub use source::{
    FetchError, InspireClient, RecordSource, RetryPolicy, fetch_bibtex_with_retry,
    fetch_records_with_retry,
};
pub use title::{clean_title, get_title};
