//! The current measurement vector.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The current value of every measurement in the active schema.
///
/// Always fully populated: every schema name has a value from creation
/// on, never a partial map. The morph controller is the single writer;
/// UI code reads it and submits changes through the controller only.
///
/// # Examples
///
/// ```
/// use body_schema::MeasurementState;
///
/// let mut state = MeasurementState::from_names(["shoulderWidth", "stomachSize"]);
/// assert_eq!(state.len(), 2);
///
/// assert!(state.set("shoulderWidth", 0.6));
/// assert!((state.get("shoulderWidth").unwrap_or(0.0) - 0.6).abs() < 1e-6);
///
/// // Names outside the schema are rejected, keeping the state total.
/// assert!(!state.set("unknown", 1.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementState {
    values: HashMap<String, f32>,
}

impl MeasurementState {
    /// Creates a state with every named measurement at zero.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: names.into_iter().map(|n| (n.into(), 0.0)).collect(),
        }
    }

    /// Returns the current value of a measurement.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    /// Writes a measurement value.
    ///
    /// Returns false (and writes nothing) if the name is not part of the
    /// state; new names are never inserted after creation.
    pub fn set(&mut self, name: &str, value: f32) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Returns true if the state tracks the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of tracked measurements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the state tracks no measurements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Resets every measurement to zero.
    pub fn zero_all(&mut self) {
        for value in self.values.values_mut() {
            *value = 0.0;
        }
    }

    /// Resets the named measurements to zero.
    ///
    /// Names the state does not track are ignored.
    pub fn zero_many<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            if let Some(value) = self.values.get_mut(name) {
                *value = 0.0;
            }
        }
    }

    /// Returns true if every tracked value is zero.
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.values.values().all(|v| v.abs() < f32::EPSILON)
    }
}
