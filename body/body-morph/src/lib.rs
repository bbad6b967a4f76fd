//! Parametric body-shape editing over morph-target meshes.
//!
//! The crate connects three layers:
//!
//! 1. A per-gender measurement schema (from `body-schema`) describing
//!    the sliders the UI renders.
//! 2. A set of [`ShapeKeyHandler`]s translating slider values into
//!    morph-weight writes, including derived composites, exclusive
//!    blends, and conditional unlocks.
//! 3. The [`MorphController`], the single writer that applies those
//!    writes to the attached scene, keeps the effective snapshot and
//!    shape code current, and notifies the host after every accepted
//!    mutation.
//!
//! # Example
//!
//! ```
//! use body_morph::MorphController;
//! use body_types::{Gender, MorphTargets, Scene, SceneNode};
//!
//! let mut controller = MorphController::new(Gender::Female).unwrap();
//!
//! let scene = Scene::new(SceneNode::new("root").with_child(
//!     SceneNode::new("body").with_morph(MorphTargets::from_keys([
//!         "shoulderWidth",
//!         "stomachSize",
//!         "trapezoid",
//!     ])),
//! ));
//! controller.attach_scene(scene);
//!
//! controller.set_measurement("shoulderWidth", 0.6).unwrap();
//!
//! let snapshot = controller.snapshot();
//! assert!((snapshot.get("shoulderWidth").unwrap() - 0.6).abs() < 1e-6);
//! assert!((snapshot.get("stomachSize").unwrap() - 0.6).abs() < 1e-6);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod controller;
mod error;
mod handler;
mod loader;
mod scene_slot;
mod summary;

pub use controller::{ChangeListener, MorphController};
pub use error::{MorphError, MorphResult};
pub use handler::{
    blend_writes, trapezoid_weight, GateChange, HandlerOutcome, HandlerSet, ShapeKeyHandler,
    WeightWrite, STOMACH_UNLOCK_FROM,
};
pub use loader::{LoadPhase, LoadTracker, SPINNER_CEILING};
pub use scene_slot::SceneSlot;
pub use summary::CompletionSummary;
