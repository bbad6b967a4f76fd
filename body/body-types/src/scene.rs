//! Minimal scene graph exposed by the asset loader.

use serde::{Deserialize, Serialize};

use crate::{MorphTargets, ShapeKeySnapshot};

/// A node in the loaded scene graph.
///
/// A node may carry [`MorphTargets`] if it is a deformable mesh; group
/// nodes and bones carry `None`. Traversal of a scene yields zero or
/// more morph-capable meshes.
///
/// # Examples
///
/// ```
/// use body_types::{MorphTargets, SceneNode};
///
/// let root = SceneNode::new("armature")
///     .with_child(SceneNode::new("body").with_morph(MorphTargets::from_keys(["trapezoid"])))
///     .with_child(SceneNode::new("eyes"));
///
/// assert_eq!(root.children.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Node name from the asset.
    pub name: String,
    /// Morph target surface, if this node is a deformable mesh.
    pub morph: Option<MorphTargets>,
    /// Child nodes.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Creates a node with no morph targets and no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            morph: None,
            children: Vec::new(),
        }
    }

    /// Attaches morph targets, making this node a deformable mesh.
    #[must_use]
    pub fn with_morph(mut self, morph: MorphTargets) -> Self {
        self.morph = Some(morph);
        self
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A loaded scene: the controller's view of the active 3D asset.
///
/// The scene owns its node tree and is responsible for releasing mesh
/// data on [`Scene::dispose`]. Disposal is idempotent and unconditional:
/// it runs on teardown whether or not the asset was ever edited,
/// including when a new load interrupts an in-flight one.
///
/// # Examples
///
/// ```
/// use body_types::{MorphTargets, Scene, SceneNode};
///
/// let root = SceneNode::new("root")
///     .with_child(SceneNode::new("body").with_morph(MorphTargets::from_keys(["headRound"])));
/// let mut scene = Scene::new(root);
///
/// assert_eq!(scene.morph_mesh_count(), 1);
/// scene.dispose();
/// assert!(scene.is_disposed());
/// assert_eq!(scene.morph_mesh_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Root of the node tree.
    pub root: SceneNode,
    disposed: bool,
}

impl Scene {
    /// Creates a scene from a root node.
    #[must_use]
    pub const fn new(root: SceneNode) -> Self {
        Self {
            root,
            disposed: false,
        }
    }

    /// Returns true if [`Scene::dispose`] has run.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Visits every morph-capable mesh in the scene.
    pub fn for_each_morph(&self, mut visit: impl FnMut(&MorphTargets)) {
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if let Some(morph) = &node.morph {
                visit(morph);
            }
            stack.extend(node.children.iter());
        }
    }

    /// Visits every morph-capable mesh in the scene, mutably.
    pub fn for_each_morph_mut(&mut self, mut visit: impl FnMut(&mut MorphTargets)) {
        let mut stack = vec![&mut self.root];
        while let Some(node) = stack.pop() {
            if let Some(morph) = &mut node.morph {
                visit(morph);
            }
            stack.extend(node.children.iter_mut());
        }
    }

    /// Returns the number of morph-capable meshes.
    #[must_use]
    pub fn morph_mesh_count(&self) -> usize {
        let mut count = 0;
        self.for_each_morph(|_| count += 1);
        count
    }

    /// Writes a weight into every mesh that names the given shape key.
    ///
    /// Returns the number of meshes written. Meshes that do not name the
    /// key are left untouched.
    pub fn set_weight_all(&mut self, key: &str, weight: f32) -> usize {
        let mut written = 0;
        self.for_each_morph_mut(|morph| {
            if morph.set_weight(key, weight) {
                written += 1;
            }
        });
        written
    }

    /// Zeroes every influence on every mesh.
    pub fn zero_all_weights(&mut self) {
        self.for_each_morph_mut(MorphTargets::zero_all);
    }

    /// Reads the effective snapshot: the union across all meshes.
    ///
    /// When two meshes name the same key, the later one in traversal
    /// order wins; in practice assets keep duplicated keys in sync.
    #[must_use]
    pub fn snapshot(&self) -> ShapeKeySnapshot {
        let mut union = ShapeKeySnapshot::new();
        self.for_each_morph(|morph| union.merge(&morph.snapshot()));
        union
    }

    /// Releases all mesh data and marks the scene disposed.
    ///
    /// Idempotent; later writes and reads degrade to no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let mut stack = vec![&mut self.root];
        while let Some(node) = stack.pop() {
            if let Some(mut morph) = node.morph.take() {
                morph.release();
            }
            stack.extend(node.children.iter_mut());
        }
        self.disposed = true;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_mesh_scene() -> Scene {
        let root = SceneNode::new("root")
            .with_child(
                SceneNode::new("body")
                    .with_morph(MorphTargets::from_keys(["shoulderWidth", "trapezoid"])),
            )
            .with_child(
                SceneNode::new("head")
                    .with_child(
                        SceneNode::new("face")
                            .with_morph(MorphTargets::from_keys(["headRound", "headSquare"])),
                    ),
            );
        Scene::new(root)
    }

    #[test]
    fn test_morph_mesh_count() {
        let scene = two_mesh_scene();
        assert_eq!(scene.morph_mesh_count(), 2);
    }

    #[test]
    fn test_set_weight_all_targets_matching_meshes() {
        let mut scene = two_mesh_scene();
        assert_eq!(scene.set_weight_all("trapezoid", 0.5), 1);
        assert_eq!(scene.set_weight_all("headRound", 0.25), 1);
        assert_eq!(scene.set_weight_all("missing", 1.0), 0);
    }

    #[test]
    fn test_snapshot_union() {
        let mut scene = two_mesh_scene();
        scene.set_weight_all("trapezoid", 0.5);
        scene.set_weight_all("headSquare", 1.0);

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.len(), 4);
        assert_relative_eq!(snapshot.get("trapezoid").unwrap(), 0.5);
        assert_relative_eq!(snapshot.get("headSquare").unwrap(), 1.0);
        assert_relative_eq!(snapshot.get("shoulderWidth").unwrap(), 0.0);
    }

    #[test]
    fn test_zero_all_weights() {
        let mut scene = two_mesh_scene();
        scene.set_weight_all("trapezoid", 0.5);
        scene.set_weight_all("headRound", 0.9);

        scene.zero_all_weights();
        for (_, weight) in scene.snapshot().iter() {
            assert_relative_eq!(weight, 0.0);
        }
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut scene = two_mesh_scene();
        scene.dispose();
        assert!(scene.is_disposed());
        assert_eq!(scene.morph_mesh_count(), 0);
        assert!(scene.snapshot().is_empty());

        // Second dispose is a no-op.
        scene.dispose();
        assert!(scene.is_disposed());
    }

    #[test]
    fn test_writes_after_dispose_are_noops() {
        let mut scene = two_mesh_scene();
        scene.dispose();
        assert_eq!(scene.set_weight_all("trapezoid", 1.0), 0);
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new(SceneNode::new("empty"));
        assert_eq!(scene.morph_mesh_count(), 0);
        assert!(scene.snapshot().is_empty());
    }
}
