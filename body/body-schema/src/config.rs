//! Per-measurement slider configuration.

use serde::{Deserialize, Serialize};

use crate::{SchemaError, SchemaResult};

/// Configuration for a single user-facing measurement slider.
///
/// A measurement maps one scalar slider onto one or more shape keys.
/// Out-of-range input is a recoverable condition handled by
/// [`MeasurementConfig::clamp`], never an error.
///
/// # Examples
///
/// ```
/// use body_schema::MeasurementConfig;
///
/// let config = MeasurementConfig::new("shoulderWidth", -1.0, 1.0, 0.01)
///     .unwrap()
///     .with_shape_key("shoulderWidth")
///     .with_linked("stomachSize");
///
/// assert!((config.clamp(2.5) - 1.0).abs() < 1e-6);
/// assert!((config.normalize(0.0) - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementConfig {
    /// Minimum slider value.
    pub min: f32,
    /// Maximum slider value.
    pub max: f32,
    /// Slider step.
    pub step: f32,
    /// Number of tick marks the UI renders.
    pub tick_count: u32,
    /// Shape keys this measurement writes to under the generic handler.
    pub shape_keys: Vec<String>,
    /// Mirrored measurement carrying the same physical value.
    ///
    /// Setting either member of a linked pair updates both, in the same
    /// state transaction. Links are declared here and resolved
    /// generically by the controller.
    pub linked: Option<String>,
    /// Whether this measurement is gated behind a conditional unlock.
    ///
    /// While the gate is locked the value is forced to 0 regardless of
    /// the slider position (the slider is rendered disabled, not hidden).
    pub gated: bool,
}

impl MeasurementConfig {
    /// Default tick count for sliders.
    pub const DEFAULT_TICK_COUNT: u32 = 5;

    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `min > max` or `step <= 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use body_schema::MeasurementConfig;
    ///
    /// assert!(MeasurementConfig::new("ok", 0.0, 1.0, 0.01).is_ok());
    /// assert!(MeasurementConfig::new("bad", 1.0, 0.0, 0.01).is_err());
    /// assert!(MeasurementConfig::new("bad", 0.0, 1.0, 0.0).is_err());
    /// ```
    pub fn new(name: &str, min: f32, max: f32, step: f32) -> SchemaResult<Self> {
        if min > max {
            return Err(SchemaError::InvalidRange {
                name: name.to_owned(),
                min,
                max,
            });
        }
        if step <= 0.0 {
            return Err(SchemaError::InvalidStep {
                name: name.to_owned(),
                step,
            });
        }
        Ok(Self {
            min,
            max,
            step,
            tick_count: Self::DEFAULT_TICK_COUNT,
            shape_keys: Vec::new(),
            linked: None,
            gated: false,
        })
    }

    /// Sets the tick count.
    #[must_use]
    pub const fn with_tick_count(mut self, tick_count: u32) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Adds an associated shape key.
    #[must_use]
    pub fn with_shape_key(mut self, key: impl Into<String>) -> Self {
        self.shape_keys.push(key.into());
        self
    }

    /// Adds several associated shape keys.
    #[must_use]
    pub fn with_shape_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shape_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Declares the mirrored measurement for this one.
    #[must_use]
    pub fn with_linked(mut self, linked: impl Into<String>) -> Self {
        self.linked = Some(linked.into());
        self
    }

    /// Marks this measurement as gated behind a conditional unlock.
    #[must_use]
    pub const fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    /// Clamps a raw slider value into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Normalizes a value to `[0, 1]` over the configured range.
    ///
    /// A degenerate range (`min == max`) normalizes to 0.
    #[must_use]
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= f32::EPSILON {
            return 0.0;
        }
        ((self.clamp(value) - self.min) / span).clamp(0.0, 1.0)
    }
}
