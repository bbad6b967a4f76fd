//! Ownership of the active scene.

use body_types::Scene;
use tracing::debug;

/// Holds at most one live scene and guarantees its disposal.
///
/// Attaching a new scene disposes the previous one first, which covers
/// the case where a new load lands while an earlier asset is still
/// attached. Dropping the slot disposes whatever is inside, so teardown
/// never leaks mesh data even on unusual exit paths.
///
/// # Examples
///
/// ```
/// use body_morph::SceneSlot;
/// use body_types::{Scene, SceneNode};
///
/// let mut slot = SceneSlot::new();
/// assert!(!slot.is_attached());
///
/// slot.attach(Scene::new(SceneNode::new("root")));
/// assert!(slot.is_attached());
///
/// slot.detach();
/// assert!(!slot.is_attached());
/// ```
#[derive(Debug, Default)]
pub struct SceneSlot {
    current: Option<Scene>,
}

impl SceneSlot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Attaches a scene, disposing the previously attached one.
    pub fn attach(&mut self, scene: Scene) {
        if let Some(mut previous) = self.current.take() {
            debug!("disposing previously attached scene");
            previous.dispose();
        }
        self.current = Some(scene);
    }

    /// Detaches and disposes the current scene, if any.
    pub fn detach(&mut self) {
        if let Some(mut scene) = self.current.take() {
            scene.dispose();
        }
    }

    /// Returns true if a scene is attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.current.is_some()
    }

    /// Returns the attached scene, if any.
    #[must_use]
    pub const fn get(&self) -> Option<&Scene> {
        self.current.as_ref()
    }

    /// Returns the attached scene mutably, if any.
    pub fn get_mut(&mut self) -> Option<&mut Scene> {
        self.current.as_mut()
    }
}

impl Drop for SceneSlot {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use body_types::{MorphTargets, SceneNode};

    fn scene() -> Scene {
        Scene::new(
            SceneNode::new("root")
                .with_child(SceneNode::new("body").with_morph(MorphTargets::from_keys(["k"]))),
        )
    }

    #[test]
    fn test_attach_detach() {
        let mut slot = SceneSlot::new();
        slot.attach(scene());
        assert!(slot.is_attached());
        assert_eq!(slot.get().unwrap().morph_mesh_count(), 1);

        slot.detach();
        assert!(!slot.is_attached());
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_attach_disposes_previous() {
        let mut slot = SceneSlot::new();
        slot.attach(scene());

        // Keep a marker write so we can tell the scenes apart.
        slot.get_mut().unwrap().set_weight_all("k", 0.7);

        slot.attach(scene());
        let snapshot = slot.get().unwrap().snapshot();
        assert!((snapshot.get("k").unwrap()).abs() < 1e-6);
    }

    #[test]
    fn test_detach_on_empty_is_noop() {
        let mut slot = SceneSlot::new();
        slot.detach();
        assert!(!slot.is_attached());
    }
}
