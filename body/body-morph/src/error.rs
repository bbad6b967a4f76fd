//! Error types for morph controller operations.

use thiserror::Error;

/// Errors that can occur during morph controller operations.
///
/// Note what is *not* here: writing while no scene is attached is an
/// expected transient state (the asset is still loading) and degrades to
/// a state-only update, and out-of-range slider values are clamped
/// silently. Only schema/UI desyncs surface as errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MorphError {
    /// The measurement name is not part of the active schema.
    ///
    /// This indicates the UI and schema have drifted; it is never
    /// swallowed silently.
    #[error("unknown measurement \"{name}\" (active schema has {available} measurements)")]
    UnknownMeasurement {
        /// The unrecognized measurement name.
        name: String,
        /// Number of measurements the active schema defines.
        available: usize,
    },

    /// The group key is not part of the active schema.
    #[error("unknown measurement group \"{key}\"")]
    UnknownGroup {
        /// The unrecognized group key.
        key: String,
    },
}

/// Result type for morph controller operations.
pub type MorphResult<T> = Result<T, MorphError>;
