//! Canonically ordered shape-key weight maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A full set of shape-key weights read back from one or more meshes.
///
/// Keys are held in canonical sorted order (a `BTreeMap`), so iteration
/// order is independent of insertion order. This is what makes the shape
/// code encoder deterministic: two snapshots built in different orders
/// but carrying the same weights encode identically.
///
/// Weights are in the mesh-defined range, typically `[0, 1]` or `[-1, 1]`.
///
/// # Examples
///
/// ```
/// use body_types::ShapeKeySnapshot;
///
/// let mut snapshot = ShapeKeySnapshot::new();
/// snapshot.set("trapezoid", 0.4);
/// snapshot.set("headRound", 1.0);
///
/// // Iteration is sorted regardless of insertion order.
/// let keys: Vec<&str> = snapshot.keys().collect();
/// assert_eq!(keys, vec!["headRound", "trapezoid"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeKeySnapshot {
    weights: BTreeMap<String, f32>,
}

impl ShapeKeySnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Returns the weight for a shape key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f32> {
        self.weights.get(key).copied()
    }

    /// Sets the weight for a shape key, inserting it if absent.
    pub fn set(&mut self, key: impl Into<String>, weight: f32) {
        self.weights.insert(key.into(), weight);
    }

    /// Returns true if the snapshot contains the given key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.weights.contains_key(key)
    }

    /// Returns the number of shape keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the snapshot has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates over `(key, weight)` pairs in canonical sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.weights.iter().map(|(k, w)| (k.as_str(), *w))
    }

    /// Iterates over keys in canonical sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Merges another snapshot into this one.
    ///
    /// Keys present in `other` overwrite keys present here; keys only
    /// present here are kept. Used by the controller to fold per-mesh
    /// read-backs into its cached union snapshot.
    ///
    /// # Examples
    ///
    /// ```
    /// use body_types::ShapeKeySnapshot;
    ///
    /// let mut cached = ShapeKeySnapshot::new();
    /// cached.set("a", 0.1);
    /// cached.set("b", 0.2);
    ///
    /// let mut fresh = ShapeKeySnapshot::new();
    /// fresh.set("b", 0.9);
    ///
    /// cached.merge(&fresh);
    /// assert!((cached.get("a").unwrap_or(0.0) - 0.1).abs() < 1e-6);
    /// assert!((cached.get("b").unwrap_or(0.0) - 0.9).abs() < 1e-6);
    /// ```
    pub fn merge(&mut self, other: &Self) {
        for (key, weight) in &other.weights {
            self.weights.insert(key.clone(), *weight);
        }
    }

    /// Returns a copy of this snapshot with every weight set to zero.
    #[must_use]
    pub fn zeroed(&self) -> Self {
        Self {
            weights: self.weights.keys().map(|k| (k.clone(), 0.0)).collect(),
        }
    }

    /// Compares two snapshots weight-for-weight within a tolerance.
    ///
    /// Returns false if the key sets differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use body_types::ShapeKeySnapshot;
    ///
    /// let mut a = ShapeKeySnapshot::new();
    /// a.set("k", 0.5);
    /// let mut b = ShapeKeySnapshot::new();
    /// b.set("k", 0.5000001);
    ///
    /// assert!(a.approx_eq(&b, 1e-5));
    /// assert!(!a.approx_eq(&b, 1e-9));
    /// ```
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        if self.weights.len() != other.weights.len() {
            return false;
        }
        self.weights.iter().all(|(key, weight)| {
            other
                .weights
                .get(key)
                .is_some_and(|w| (w - weight).abs() <= tolerance)
        })
    }
}

impl FromIterator<(String, f32)> for ShapeKeySnapshot {
    fn from_iter<I: IntoIterator<Item = (String, f32)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}
