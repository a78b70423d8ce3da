//! Error types for profile configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::analysis::AnalysisKind;

/// Errors raised while loading or validating analysis profiles.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Failed to read the profile file.
    #[error("failed to read profile file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile file is not valid TOML for the profile schema.
    #[error("failed to parse profiles: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two profiles declare the same analysis kind.
    #[error("duplicate profile for analysis '{0}'")]
    Duplicate(AnalysisKind),

    /// Profile has no column that can be searched.
    #[error("profile '{0}' has no target column with a source column")]
    NoEligibleColumns(AnalysisKind),

    /// Substring profiles need an identity column to match against.
    #[error("profile '{0}' uses substring search but has no identity column")]
    MissingIdentityColumn(AnalysisKind),
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
