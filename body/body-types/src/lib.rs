//! Shared types for the parametric body-shape pipeline.
//!
//! This crate provides the foundational types used across:
//! - `body-schema` (measurement definitions per gender)
//! - `body-morph` (the morph controller)
//! - `body-code` (shape code encoding)
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero renderer dependencies**. The 3D
//! engine is an external collaborator; it is modeled here only at its
//! interface: a scene graph of nodes, some of which carry morph targets
//! (a name→index dictionary plus a mutable influence array).
//!
//! # Types
//!
//! - [`Gender`] - which measurement schema applies
//! - [`BodyType`] - which pre-authored asset variant is loaded
//! - [`ShapeKeySnapshot`] - canonically ordered shape-key weight map
//! - [`MorphTargets`] - per-mesh morph target registry surface
//! - [`SceneNode`] / [`Scene`] - minimal scene graph with traversal and
//!   unconditional disposal
//!
//! # Example
//!
//! ```
//! use body_types::{MorphTargets, Scene, SceneNode};
//!
//! let mesh = MorphTargets::from_keys(["shoulderWidth", "trapezoid"]);
//! let mut scene = Scene::new(SceneNode::new("body").with_morph(mesh));
//!
//! let written = scene.set_weight_all("shoulderWidth", 0.6);
//! assert_eq!(written, 1);
//!
//! let snapshot = scene.snapshot();
//! assert!((snapshot.get("shoulderWidth").unwrap_or(0.0) - 0.6).abs() < 1e-6);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod body;
mod morph_targets;
mod scene;
mod snapshot;

pub use body::{BodyType, Gender};
pub use morph_targets::MorphTargets;
pub use scene::{Scene, SceneNode};
pub use snapshot::ShapeKeySnapshot;
