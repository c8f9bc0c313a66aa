//! # Error Handling
//!
//! Provides the unified `PatchError` enum used across the crate.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate. The variants mirror the failure
/// taxonomy of the patch engine: wrapped IO/plist errors, fatal configuration
/// errors, and fatal structural errors. Soft-skip conditions are not errors;
/// they are logged and processing continues.
#[derive(Debug, Display, From)]
pub enum PatchError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for property-list decode/encode errors.
    #[display("Plist Error: {_0}")]
    Plist(plist::Error),

    /// Fatal configuration error, raised before any mutation.
    /// The message names the offending field.
    #[from(ignore)]
    #[display("Configuration Error: {_0}")]
    Config(String),

    /// Fatal structural error: an artifact the engine must patch is missing
    /// a required declaration or file. Raised after locating but before
    /// mutating the affected artifact.
    #[from(ignore)]
    #[display("Structure Error: {_0}")]
    Structure(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for PatchError {}

/// Helper type alias for Result using PatchError.
pub type PatchResult<T> = Result<T, PatchError>;
