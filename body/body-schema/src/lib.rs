//! Declarative measurement schemas for the body morph controller.
//!
//! A schema is a per-gender table grouping named measurements under UI
//! categories. Each measurement carries its slider range, step, tick
//! count, associated shape keys, an optional mirrored (`linked`)
//! partner, and an optional conditional gate.
//!
//! # Layer 0 Crate
//!
//! Pure data and validation; no controller logic and no renderer
//! dependencies.
//!
//! # Invariants
//!
//! - Measurement names are unique across the whole schema for a gender.
//! - `min ≤ max` and `step > 0` for every measurement.
//! - `linked` relations resolve to measurements the schema defines.
//! - [`MeasurementState`] is always fully populated, never partial.
//!
//! # Example
//!
//! ```
//! use body_schema::schema_for;
//! use body_types::Gender;
//!
//! let schema = schema_for(Gender::Female).unwrap();
//! let state = schema.default_state();
//!
//! assert_eq!(state.len(), schema.measurement_count());
//! assert!(state.is_all_zero());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod presets;
mod schema;
mod state;

pub use config::MeasurementConfig;
pub use error::{SchemaError, SchemaResult};
pub use presets::{
    schema_for, BOTTOM_GROUP, FEMALE_BOTTOM_BLEND, FEMALE_HEAD_BLEND, FEMALE_STOMACH_BLEND,
    HEAD_GROUP, MALE_BOTTOM_BLEND, MALE_HEAD_BLEND, MALE_STOMACH_BLEND, SHOULDERS_GROUP,
    STOMACH_GROUP, TRAPEZOID_KEY, TRIMESTER,
};
pub use schema::{MeasurementGroup, MeasurementSchema, SchemaBuilder};
pub use state::MeasurementState;
