//! Per-mesh morph target registry surface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ShapeKeySnapshot;

/// The morph target surface a deformable mesh exposes.
///
/// Mirrors what the asset loader hands over for each deformable node:
/// a dictionary mapping symbolic shape-key names to indices, and a
/// mutable array of per-index blend weights ("influences").
///
/// # Invariant
///
/// Every index in the dictionary must be a valid index into
/// `influences`; [`MorphTargets::is_consistent`] checks this.
///
/// # Examples
///
/// ```
/// use body_types::MorphTargets;
///
/// let mut targets = MorphTargets::from_keys(["shoulderWidth", "trapezoid"]);
/// assert_eq!(targets.key_count(), 2);
///
/// assert!(targets.set_weight("trapezoid", 0.35));
/// assert!((targets.weight("trapezoid").unwrap_or(0.0) - 0.35).abs() < 1e-6);
///
/// // Unknown keys are reported, not written.
/// assert!(!targets.set_weight("missing", 1.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphTargets {
    /// Shape-key name → influence index.
    pub dictionary: HashMap<String, usize>,
    /// Per-index blend weights.
    pub influences: Vec<f32>,
}

impl MorphTargets {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from an ordered list of shape-key names.
    ///
    /// Keys are assigned indices in iteration order and all influences
    /// start at zero.
    #[must_use]
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dictionary: HashMap<String, usize> = keys
            .into_iter()
            .enumerate()
            .map(|(index, key)| (key.into(), index))
            .collect();
        let influences = vec![0.0; dictionary.len()];
        Self {
            dictionary,
            influences,
        }
    }

    /// Returns the number of shape keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Returns true if the registry has no shape keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    /// Returns true if the registry names the given shape key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.dictionary.contains_key(key)
    }

    /// Returns the current weight of a shape key.
    ///
    /// Returns `None` if the key is unknown or its index is out of range.
    #[must_use]
    pub fn weight(&self, key: &str) -> Option<f32> {
        let index = *self.dictionary.get(key)?;
        self.influences.get(index).copied()
    }

    /// Writes a weight for a shape key.
    ///
    /// Returns true if the key exists and the write landed.
    pub fn set_weight(&mut self, key: &str, weight: f32) -> bool {
        let Some(&index) = self.dictionary.get(key) else {
            return false;
        };
        if let Some(slot) = self.influences.get_mut(index) {
            *slot = weight;
            true
        } else {
            false
        }
    }

    /// Zeroes every influence, keeping the dictionary intact.
    pub fn zero_all(&mut self) {
        for influence in &mut self.influences {
            *influence = 0.0;
        }
    }

    /// Reads the full shape-key snapshot from this mesh.
    ///
    /// Keys whose index falls outside the influence array are skipped.
    #[must_use]
    pub fn snapshot(&self) -> ShapeKeySnapshot {
        self.dictionary
            .iter()
            .filter_map(|(key, &index)| {
                self.influences
                    .get(index)
                    .map(|weight| (key.clone(), *weight))
            })
            .collect()
    }

    /// Checks that every dictionary index points into the influence array.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.dictionary
            .values()
            .all(|&index| index < self.influences.len())
    }

    /// Releases the mesh data, leaving an empty registry.
    ///
    /// Called by scene disposal; any later write becomes a no-op.
    pub fn release(&mut self) {
        self.dictionary.clear();
        self.influences.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> MorphTargets {
        MorphTargets::from_keys(["shoulderWidth", "trapezoid", "headRound"])
    }

    #[test]
    fn test_from_keys() {
        let targets = sample();
        assert_eq!(targets.key_count(), 3);
        assert_eq!(targets.influences.len(), 3);
        assert!(targets.contains("trapezoid"));
        assert!(!targets.contains("missing"));
        assert!(targets.is_consistent());
    }

    #[test]
    fn test_weights_start_at_zero() {
        let targets = sample();
        assert_relative_eq!(targets.weight("shoulderWidth").unwrap(), 0.0);
        assert_relative_eq!(targets.weight("headRound").unwrap(), 0.0);
    }

    #[test]
    fn test_set_weight() {
        let mut targets = sample();
        assert!(targets.set_weight("trapezoid", 0.42));
        assert_relative_eq!(targets.weight("trapezoid").unwrap(), 0.42);

        assert!(!targets.set_weight("missing", 1.0));
        assert!(targets.weight("missing").is_none());
    }

    #[test]
    fn test_zero_all() {
        let mut targets = sample();
        targets.set_weight("shoulderWidth", 0.8);
        targets.set_weight("headRound", 0.3);

        targets.zero_all();
        for key in ["shoulderWidth", "trapezoid", "headRound"] {
            assert_relative_eq!(targets.weight(key).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_snapshot() {
        let mut targets = sample();
        targets.set_weight("headRound", 0.9);

        let snapshot = targets.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_relative_eq!(snapshot.get("headRound").unwrap(), 0.9);
        assert_relative_eq!(snapshot.get("trapezoid").unwrap(), 0.0);
    }

    #[test]
    fn test_inconsistent_index_detected() {
        let mut targets = sample();
        targets.influences.pop();
        assert!(!targets.is_consistent());

        // Reads against the truncated array degrade to None, not panics.
        let dangling = targets
            .dictionary
            .iter()
            .find(|(_, &index)| index >= targets.influences.len())
            .map(|(key, _)| key.clone())
            .unwrap();
        assert!(targets.weight(&dangling).is_none());
    }

    #[test]
    fn test_release() {
        let mut targets = sample();
        targets.release();
        assert!(targets.is_empty());
        assert!(!targets.set_weight("trapezoid", 1.0));
        assert!(targets.snapshot().is_empty());
    }
}
