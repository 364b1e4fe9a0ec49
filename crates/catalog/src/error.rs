//! Error types for the catalog crate.
//!
//! Loading and validating a catalog is the only fallible part of the
//! system; the recommendation core itself never fails.

use crate::types::RestaurantId;
use thiserror::Error;

/// Errors that can occur while loading, parsing or validating a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file was not valid JSON for the expected record layout
    #[error("Parse error in {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two restaurants share an identifier
    #[error("Duplicate restaurant id {0}")]
    DuplicateId(RestaurantId),

    /// Referenced entity doesn't exist (e.g., promotion for an unknown restaurant)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: RestaurantId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
