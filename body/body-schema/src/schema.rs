//! Measurement groups and the validated schema container.

use serde::{Deserialize, Serialize};

use crate::{MeasurementConfig, MeasurementState, SchemaError, SchemaResult};

/// A UI category grouping related measurements.
///
/// Groups and the measurements inside them keep their declaration order,
/// which is the order the UI presents them in.
///
/// # Examples
///
/// ```
/// use body_schema::{MeasurementConfig, MeasurementGroup};
///
/// let group = MeasurementGroup::new("stomach", "Stomach", "torso")
///     .with_measurement(
///         "stomachSize",
///         MeasurementConfig::new("stomachSize", -1.0, 1.0, 0.01).unwrap(),
///     );
///
/// assert!(group.contains("stomachSize"));
/// assert_eq!(group.names(), vec!["stomachSize"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementGroup {
    /// Stable group key (used for scoped resets).
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Icon identifier the UI renders next to the label.
    pub icon: String,
    /// Measurements in declaration order.
    pub measurements: Vec<(String, MeasurementConfig)>,
}

impl MeasurementGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: icon.into(),
            measurements: Vec::new(),
        }
    }

    /// Appends a measurement to the group.
    #[must_use]
    pub fn with_measurement(mut self, name: impl Into<String>, config: MeasurementConfig) -> Self {
        self.measurements.push((name.into(), config));
        self
    }

    /// Returns true if the group defines the given measurement.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.measurements.iter().any(|(n, _)| n == name)
    }

    /// Returns the measurement names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.measurements.iter().map(|(n, _)| n.as_str()).collect()
    }
}

/// A validated per-gender measurement schema.
///
/// Built through [`MeasurementSchema::builder`], which enforces the
/// schema invariants: at least one group, measurement names unique
/// across the whole schema, and `linked` relations resolving to
/// measurements the schema actually defines.
///
/// # Examples
///
/// ```
/// use body_schema::{MeasurementConfig, MeasurementGroup, MeasurementSchema};
///
/// let schema = MeasurementSchema::builder()
///     .with_group(
///         MeasurementGroup::new("head", "Head", "head").with_measurement(
///             "headShape",
///             MeasurementConfig::new("headShape", 0.0, 1.0, 0.01).unwrap(),
///         ),
///     )
///     .build()
///     .unwrap();
///
/// assert!(schema.contains("headShape"));
/// assert_eq!(schema.group_of("headShape"), Some("head"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSchema {
    groups: Vec<MeasurementGroup>,
}

impl MeasurementSchema {
    /// Starts a schema builder.
    #[must_use]
    pub const fn builder() -> SchemaBuilder {
        SchemaBuilder { groups: Vec::new() }
    }

    /// Returns the groups in declaration order.
    #[must_use]
    pub fn groups(&self) -> &[MeasurementGroup] {
        &self.groups
    }

    /// Looks up a group by key.
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&MeasurementGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// Looks up the configuration of a measurement by name.
    #[must_use]
    pub fn config(&self, name: &str) -> Option<&MeasurementConfig> {
        self.groups.iter().find_map(|group| {
            group
                .measurements
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, config)| config)
        })
    }

    /// Returns the key of the group that owns a measurement.
    #[must_use]
    pub fn group_of(&self, name: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|group| group.contains(name))
            .map(|group| group.key.as_str())
    }

    /// Returns true if any group defines the given measurement.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.groups.iter().any(|group| group.contains(name))
    }

    /// Returns every measurement name, in group declaration order.
    #[must_use]
    pub fn measurement_names(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|group| group.measurements.iter().map(|(n, _)| n.as_str()))
            .collect()
    }

    /// Returns the total number of measurements across all groups.
    #[must_use]
    pub fn measurement_count(&self) -> usize {
        self.groups.iter().map(|g| g.measurements.len()).sum()
    }

    /// Builds the all-zero default measurement state.
    ///
    /// The state is fully populated: every schema name gets a value.
    /// Zero is the semantic "neutral/unset" value, distinct from the
    /// schema minimum for ranges spanning negative to positive.
    #[must_use]
    pub fn default_state(&self) -> MeasurementState {
        MeasurementState::from_names(self.measurement_names())
    }
}

/// Builder enforcing the schema invariants at construction time.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    groups: Vec<MeasurementGroup>,
}

impl SchemaBuilder {
    /// Appends a group.
    #[must_use]
    pub fn with_group(mut self, group: MeasurementGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Validates and builds the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is empty, a measurement name is
    /// duplicated across groups, or a `linked` relation is dangling or
    /// self-referential.
    pub fn build(self) -> SchemaResult<MeasurementSchema> {
        if self.groups.is_empty() {
            return Err(SchemaError::Empty);
        }

        let schema = MeasurementSchema {
            groups: self.groups,
        };

        let mut seen: Vec<&str> = Vec::new();
        for group in &schema.groups {
            for (name, _) in &group.measurements {
                if seen.contains(&name.as_str()) {
                    return Err(SchemaError::DuplicateMeasurement { name: name.clone() });
                }
                seen.push(name);
            }
        }

        for group in &schema.groups {
            for (name, config) in &group.measurements {
                if let Some(linked) = &config.linked {
                    if linked == name || !schema.contains(linked) {
                        return Err(SchemaError::DanglingLink {
                            name: name.clone(),
                            linked: linked.clone(),
                        });
                    }
                }
            }
        }

        Ok(schema)
    }
}
