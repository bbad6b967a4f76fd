//! Error types for schema construction.

use thiserror::Error;

/// Errors that can occur while building a measurement schema.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A measurement range is inverted.
    #[error("measurement \"{name}\" has min {min} greater than max {max}")]
    InvalidRange {
        /// The offending measurement name.
        name: String,
        /// Configured minimum.
        min: f32,
        /// Configured maximum.
        max: f32,
    },

    /// A measurement step is zero or negative.
    #[error("measurement \"{name}\" has non-positive step {step}")]
    InvalidStep {
        /// The offending measurement name.
        name: String,
        /// Configured step.
        step: f32,
    },

    /// The same measurement name appears twice in one schema.
    #[error("duplicate measurement name \"{name}\" (measurement names must be unique across the whole schema)")]
    DuplicateMeasurement {
        /// The duplicated name.
        name: String,
    },

    /// A `linked` relation points at a measurement the schema does not define.
    #[error("measurement \"{name}\" is linked to unknown measurement \"{linked}\"")]
    DanglingLink {
        /// The measurement carrying the link.
        name: String,
        /// The missing link target.
        linked: String,
    },

    /// The schema defines no groups at all.
    #[error("schema has no measurement groups")]
    Empty,
}

/// Result type for schema construction.
pub type SchemaResult<T> = Result<T, SchemaError>;
