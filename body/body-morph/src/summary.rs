//! The completion payload handed to the host application.

use body_schema::MeasurementState;
use body_types::{BodyType, ShapeKeySnapshot};
use serde::{Deserialize, Serialize};

/// Everything the host needs to persist or restore an editing session.
///
/// Produced by the controller when the user finishes editing. The
/// snapshot and code are read from the live meshes at that moment, so
/// the payload reflects what is actually on screen, not a cached value.
///
/// # Examples
///
/// ```
/// use body_morph::MorphController;
/// use body_types::Gender;
///
/// let controller = MorphController::new(Gender::Male).unwrap();
/// let summary = controller.finish();
///
/// assert_eq!(summary.alphanumeric_code, controller.code());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSummary {
    /// Selected body type.
    pub shape: BodyType,
    /// Effective shape-key weights at completion time.
    pub shape_keys: ShapeKeySnapshot,
    /// Slider values at completion time.
    pub slider_values: MeasurementState,
    /// Compact shape code for the snapshot.
    pub alphanumeric_code: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_field_names() {
        let summary = CompletionSummary {
            shape: BodyType::Slim,
            shape_keys: ShapeKeySnapshot::new(),
            slider_values: MeasurementState::from_names(["shoulderWidth"]),
            alphanumeric_code: "s0".to_owned(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["shape"], "slim");
        assert!(json.get("shape_keys").is_some());
        assert!(json.get("slider_values").is_some());
        assert_eq!(json["alphanumeric_code"], "s0");
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut shape_keys = ShapeKeySnapshot::new();
        shape_keys.set("trapezoid", 0.4);

        let summary = CompletionSummary {
            shape: BodyType::Average,
            shape_keys,
            slider_values: MeasurementState::from_names(["shoulderWidth"]),
            alphanumeric_code: "a40q".to_owned(),
        };

        let json = serde_json::to_string(&summary).unwrap();
        let parsed: CompletionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, parsed);
    }
}
