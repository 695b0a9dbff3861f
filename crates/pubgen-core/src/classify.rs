use std::fmt;

use crate::config_file::PubsConfig;

/// Which section of the publication list a record belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Major,
    Contributing,
    Exclude,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Major => write!(f, "major"),
            Role::Contributing => write!(f, "contributing"),
            Role::Exclude => write!(f, "exclude"),
        }
    }
}

/// Exclusion is checked first, then the contributing set; everything else
/// is a major-author paper.
pub fn classify(texkey: &str, config: &PubsConfig) -> Role {
    let role = if config.exclude.contains(texkey) {
        Role::Exclude
    } else if config.contributing_author.contains(texkey) {
        Role::Contributing
    } else {
        Role::Major
    };
    tracing::debug!(texkey, %role, "classified");
    role
}
