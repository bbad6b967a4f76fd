//! The morph controller: the single writer of measurement state and
//! mesh weights.

use std::collections::HashSet;
use std::fmt;

use body_code::encode;
use body_schema::{schema_for, MeasurementSchema, MeasurementState, SchemaResult};
use body_types::{BodyType, Gender, Scene, ShapeKeySnapshot};
use tracing::{debug, info};

use crate::{
    CompletionSummary, HandlerSet, MorphError, MorphResult, SceneSlot, ShapeKeyHandler,
    WeightWrite,
};

/// Called after every accepted mutation, once per mutation.
pub type ChangeListener = Box<dyn FnMut() + Send>;

/// Drives a loaded body asset from slider input.
///
/// The controller owns the full editing session: the active schema and
/// handler set, the measurement state, the attached scene, the cached
/// shape-key snapshot, and the current shape code. All mutations flow
/// through [`set_measurement`](MorphController::set_measurement),
/// [`set_body_type`](MorphController::set_body_type) and
/// [`reset`](MorphController::reset); each accepted mutation updates
/// the meshes, regenerates the code from the post-write snapshot, and
/// fires the change listener exactly once, in that order.
///
/// A controller without an attached scene is fully functional: writes
/// update the measurement state only and mesh weights catch up when a
/// scene attaches.
///
/// # Examples
///
/// ```
/// use body_morph::MorphController;
/// use body_types::Gender;
///
/// let mut controller = MorphController::new(Gender::Female).unwrap();
/// controller.set_measurement("shoulderWidth", 0.6).unwrap();
///
/// // The mirrored stomach slider moved with it.
/// let state = controller.state();
/// assert!((state.get("stomachSize").unwrap() - 0.6).abs() < 1e-6);
/// ```
pub struct MorphController {
    gender: Gender,
    schema: MeasurementSchema,
    handlers: HandlerSet,
    body_type: BodyType,
    state: MeasurementState,
    slot: SceneSlot,
    baseline: ShapeKeySnapshot,
    snapshot: ShapeKeySnapshot,
    code: String,
    unlocked: HashSet<String>,
    on_change: Option<ChangeListener>,
}

impl fmt::Debug for MorphController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MorphController")
            .field("gender", &self.gender)
            .field("body_type", &self.body_type)
            .field("state", &self.state)
            .field("scene_attached", &self.slot.is_attached())
            .field("code", &self.code)
            .field("unlocked", &self.unlocked)
            .finish_non_exhaustive()
    }
}

impl MorphController {
    /// Creates a controller with the preset schema and handlers for a
    /// gender, no scene attached, and the default body type.
    ///
    /// # Errors
    ///
    /// Propagates schema validation errors from the preset builder.
    pub fn new(gender: Gender) -> SchemaResult<Self> {
        Ok(Self::from_parts(
            gender,
            schema_for(gender)?,
            HandlerSet::standard(gender),
        ))
    }

    /// Creates a controller from an explicit schema and handler set.
    #[must_use]
    pub fn from_parts(gender: Gender, schema: MeasurementSchema, handlers: HandlerSet) -> Self {
        let state = schema.default_state();
        let snapshot = ShapeKeySnapshot::new();
        let body_type = BodyType::default();
        let code = encode(&snapshot, body_type);
        Self {
            gender,
            schema,
            handlers,
            body_type,
            state,
            slot: SceneSlot::new(),
            baseline: ShapeKeySnapshot::new(),
            snapshot,
            code,
            unlocked: HashSet::new(),
            on_change: None,
        }
    }

    /// Attaches a freshly loaded scene, replacing any previous one.
    ///
    /// The previous scene is disposed. The new scene's pristine weights
    /// are captured as the reset baseline before any edit touches them,
    /// the measurement state returns to defaults, all gates lock, and
    /// the code regenerates from the captured snapshot. No change
    /// notification fires; attachment is a lifecycle event, not an edit.
    pub fn attach_scene(&mut self, scene: Scene) {
        let baseline = scene.snapshot();
        info!(
            meshes = scene.morph_mesh_count(),
            keys = baseline.len(),
            "attaching scene"
        );
        self.slot.attach(scene);
        self.baseline = baseline;
        self.snapshot = self.baseline.clone();
        self.state = self.schema.default_state();
        self.unlocked.clear();
        self.code = encode(&self.snapshot, self.body_type);
    }

    /// Detaches and disposes the current scene, if any.
    ///
    /// Measurement state and the cached snapshot survive detachment.
    pub fn detach_scene(&mut self) {
        self.slot.detach();
    }

    /// Returns true if a scene is attached.
    #[must_use]
    pub const fn has_scene(&self) -> bool {
        self.slot.is_attached()
    }

    /// Registers the change listener, replacing any previous one.
    pub fn set_change_listener(&mut self, listener: ChangeListener) {
        self.on_change = Some(listener);
    }

    /// Applies one slider change.
    ///
    /// The value is clamped to the measurement's range. A gated
    /// measurement whose gate is locked is forced to 0 regardless of
    /// the requested value. If the measurement is one half of a
    /// mirrored pair the other half receives the same value in the same
    /// transaction, and both handlers run.
    ///
    /// With no scene attached the write degrades to a state-only
    /// update; the snapshot, code and notification still follow.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnknownMeasurement`] if the name is not in
    /// the active schema. Nothing is mutated and no notification fires.
    pub fn set_measurement(&mut self, name: &str, value: f32) -> MorphResult<()> {
        let Some(config) = self.schema.config(name).cloned() else {
            return Err(MorphError::UnknownMeasurement {
                name: name.to_owned(),
                available: self.schema.measurement_count(),
            });
        };

        let mut clamped = config.clamp(value);
        if config.gated && !self.unlocked.contains(name) {
            debug!(measurement = name, "gate locked, forcing value to 0");
            clamped = 0.0;
        }

        self.state.set(name, clamped);
        if let Some(linked) = &config.linked {
            self.state.set(linked, clamped);
        }

        let mut outcome = self
            .handlers
            .resolve(name)
            .apply(name, clamped, &self.state, &self.schema);
        if let Some(linked) = &config.linked {
            let mirrored =
                self.handlers
                    .resolve(linked)
                    .apply(linked, clamped, &self.state, &self.schema);
            outcome.writes.extend(mirrored.writes);
            outcome.gate = outcome.gate.or(mirrored.gate);
        }

        if let Some(gate) = outcome.gate.take() {
            if gate.unlocked {
                if self.unlocked.insert(gate.measurement.clone()) {
                    debug!(measurement = %gate.measurement, "gate unlocked");
                }
            } else if self.unlocked.remove(&gate.measurement) {
                debug!(measurement = %gate.measurement, "gate locked, zeroing");
                self.state.set(&gate.measurement, 0.0);
                if let Some(gated_config) = self.schema.config(&gate.measurement) {
                    for key in &gated_config.shape_keys {
                        outcome.writes.push(WeightWrite::new(key.clone(), 0.0));
                    }
                }
            }
        }

        debug!(
            measurement = name,
            value = clamped,
            writes = outcome.writes.len(),
            "applying measurement"
        );
        self.apply_writes(&outcome.writes);
        self.code = encode(&self.snapshot, self.body_type);
        self.notify();
        Ok(())
    }

    /// Selects the body type carried in the shape code.
    ///
    /// Regenerates the code and notifies if the type actually changed.
    pub fn set_body_type(&mut self, body_type: BodyType) {
        if self.body_type == body_type {
            return;
        }
        self.body_type = body_type;
        self.code = encode(&self.snapshot, self.body_type);
        self.notify();
    }

    /// Resets the whole session or one group to the loaded baseline.
    ///
    /// With `None`, every measurement returns to zero and every gate
    /// locks. With `Some(key)`, only that group's measurements return
    /// to zero (and only its gates lock). In both cases the meshes are
    /// restored wholesale: all weights are zeroed, then the pristine
    /// baseline captured at attach time is written back weight by
    /// weight. The code regenerates and one notification fires.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnknownGroup`] if `group` names a key the
    /// active schema does not define.
    pub fn reset(&mut self, group: Option<&str>) -> MorphResult<()> {
        match group {
            Some(key) => {
                let Some(group) = self.schema.group(key) else {
                    return Err(MorphError::UnknownGroup {
                        key: key.to_owned(),
                    });
                };
                info!(group = key, "resetting group");
                for (name, config) in &group.measurements {
                    if config.gated {
                        self.unlocked.remove(name);
                    }
                }
                self.state.zero_many(group.names());
            }
            None => {
                info!("resetting all measurements");
                self.state.zero_all();
                self.unlocked.clear();
            }
        }

        if let Some(scene) = self.slot.get_mut() {
            scene.zero_all_weights();
            for (key, weight) in self.baseline.iter() {
                scene.set_weight_all(key, weight);
            }
            self.snapshot = scene.snapshot();
        }

        self.code = encode(&self.snapshot, self.body_type);
        self.notify();
        Ok(())
    }

    /// Builds the completion payload from the live meshes.
    ///
    /// The snapshot and code are read back at call time, never from the
    /// cache, so the payload matches what is on screen.
    #[must_use]
    pub fn finish(&self) -> CompletionSummary {
        let shape_keys = self
            .slot
            .get()
            .map_or_else(|| self.snapshot.clone(), Scene::snapshot);
        let alphanumeric_code = encode(&shape_keys, self.body_type);
        CompletionSummary {
            shape: self.body_type,
            shape_keys,
            slider_values: self.state.clone(),
            alphanumeric_code,
        }
    }

    /// The gender this controller was built for.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// The active schema.
    #[must_use]
    pub const fn schema(&self) -> &MeasurementSchema {
        &self.schema
    }

    /// The active handler set.
    #[must_use]
    pub const fn handlers(&self) -> &HandlerSet {
        &self.handlers
    }

    /// Registers (or replaces) a handler on the active set.
    pub fn register_handler(&mut self, name: impl Into<String>, handler: ShapeKeyHandler) {
        self.handlers.register(name, handler);
    }

    /// The selected body type.
    #[must_use]
    pub const fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// The current measurement state.
    #[must_use]
    pub const fn state(&self) -> &MeasurementState {
        &self.state
    }

    /// The pristine snapshot captured when the scene attached.
    #[must_use]
    pub const fn baseline(&self) -> &ShapeKeySnapshot {
        &self.baseline
    }

    /// The cached effective snapshot after the latest mutation.
    #[must_use]
    pub const fn snapshot(&self) -> &ShapeKeySnapshot {
        &self.snapshot
    }

    /// The shape code for the current snapshot and body type.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns true if the named gated measurement is unlocked.
    #[must_use]
    pub fn is_unlocked(&self, name: &str) -> bool {
        self.unlocked.contains(name)
    }

    fn apply_writes(&mut self, writes: &[crate::WeightWrite]) {
        let Some(scene) = self.slot.get_mut() else {
            return;
        };
        for write in writes {
            scene.set_weight_all(&write.key, write.weight);
        }
        self.snapshot.merge(&scene.snapshot());
    }

    fn notify(&mut self) {
        if let Some(listener) = &mut self.on_change {
            listener();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use body_schema::{STOMACH_GROUP, TRIMESTER};
    use body_types::{MorphTargets, SceneNode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const FEMALE_KEYS: [&str; 16] = [
        "shoulderWidth",
        "shoulderHeight",
        "neckWidth",
        "neckShape",
        "trapezoid",
        "stomachSize",
        "stomachFlat",
        "stomachRound",
        "stomachPregnant",
        "trimester",
        "headOval",
        "headRound",
        "headSquare",
        "bottomRound",
        "bottomSquare",
        "bottomHeart",
    ];

    fn female_scene() -> Scene {
        Scene::new(
            SceneNode::new("armature")
                .with_child(SceneNode::new("body").with_morph(MorphTargets::from_keys(FEMALE_KEYS)))
                .with_child(SceneNode::new("eyes")),
        )
    }

    fn female_controller() -> MorphController {
        let mut controller = MorphController::new(Gender::Female).unwrap();
        controller.attach_scene(female_scene());
        controller
    }

    #[test]
    fn test_unknown_measurement_rejected() {
        let mut controller = female_controller();
        let err = controller.set_measurement("nose", 1.0).unwrap_err();
        assert!(matches!(err, MorphError::UnknownMeasurement { .. }));
        assert!(controller.state().is_all_zero());
    }

    #[test]
    fn test_value_clamped_to_range() {
        let mut controller = female_controller();
        controller.set_measurement("shoulderWidth", 7.0).unwrap();
        assert_relative_eq!(controller.state().get("shoulderWidth").unwrap(), 1.0);
    }

    #[test]
    fn test_mirrored_pair_moves_together() {
        let mut controller = female_controller();
        controller.set_measurement("stomachSize", -0.3).unwrap();

        assert_relative_eq!(controller.state().get("shoulderWidth").unwrap(), -0.3);
        let snapshot = controller.snapshot();
        assert_relative_eq!(snapshot.get("stomachSize").unwrap(), -0.3);
        assert_relative_eq!(snapshot.get("shoulderWidth").unwrap(), -0.3);
    }

    #[test]
    fn test_mirror_recomputes_trapezoid() {
        let mut controller = female_controller();
        let before = controller.snapshot().get("trapezoid").unwrap();

        // Setting the stomach half of the pair must still refresh the
        // derived silhouette, because shoulder width moved with it.
        controller.set_measurement("stomachSize", 1.0).unwrap();
        let after = controller.snapshot().get("trapezoid").unwrap();
        assert!(after > before);
    }

    #[test]
    fn test_gated_measurement_forced_to_zero_while_locked() {
        let mut controller = female_controller();
        controller.set_measurement(TRIMESTER, 2.0).unwrap();

        assert!(!controller.is_unlocked(TRIMESTER));
        assert_relative_eq!(controller.state().get(TRIMESTER).unwrap(), 0.0);
        assert_relative_eq!(controller.snapshot().get(TRIMESTER).unwrap(), 0.0);
    }

    #[test]
    fn test_gate_unlocks_and_relocks() {
        let mut controller = female_controller();

        controller.set_measurement("stomachShape", 0.9).unwrap();
        assert!(controller.is_unlocked(TRIMESTER));

        controller.set_measurement(TRIMESTER, 2.0).unwrap();
        assert_relative_eq!(controller.state().get(TRIMESTER).unwrap(), 2.0);
        assert_relative_eq!(controller.snapshot().get(TRIMESTER).unwrap(), 2.0);

        // Sliding the stomach back below the threshold relocks the gate
        // and clears the trimester everywhere.
        controller.set_measurement("stomachShape", 0.1).unwrap();
        assert!(!controller.is_unlocked(TRIMESTER));
        assert_relative_eq!(controller.state().get(TRIMESTER).unwrap(), 0.0);
        assert_relative_eq!(controller.snapshot().get(TRIMESTER).unwrap(), 0.0);
    }

    #[test]
    fn test_no_scene_degrades_to_state_only() {
        let mut controller = MorphController::new(Gender::Female).unwrap();
        controller.set_measurement("shoulderWidth", 0.5).unwrap();

        assert_relative_eq!(controller.state().get("shoulderWidth").unwrap(), 0.5);
        assert!(controller.snapshot().is_empty());
    }

    #[test]
    fn test_code_tracks_mutations() {
        let mut controller = female_controller();
        let initial = controller.code().to_owned();

        controller.set_measurement("headShape", 0.5).unwrap();
        let edited = controller.code().to_owned();
        assert_ne!(initial, edited);

        controller.set_body_type(BodyType::Athletic);
        assert_ne!(controller.code(), edited);
        assert!(controller.code().starts_with('t'));
    }

    #[test]
    fn test_reset_all_restores_baseline() {
        let mut controller = MorphController::new(Gender::Female).unwrap();

        // Bake a nonzero pristine weight into the asset before attach.
        let mut scene = female_scene();
        scene.set_weight_all("neckShape", 0.15);
        controller.attach_scene(scene);
        let pristine_code = controller.code().to_owned();

        controller.set_measurement("shoulderWidth", 0.8).unwrap();
        controller.set_measurement("stomachShape", 0.9).unwrap();
        controller.set_measurement(TRIMESTER, 3.0).unwrap();

        controller.reset(None).unwrap();

        assert!(controller.state().is_all_zero());
        assert!(!controller.is_unlocked(TRIMESTER));
        assert!(controller.snapshot().approx_eq(controller.baseline(), 1e-6));
        assert_relative_eq!(controller.snapshot().get("neckShape").unwrap(), 0.15);
        assert_eq!(controller.code(), pristine_code);
    }

    #[test]
    fn test_repeated_set_is_idempotent() {
        let mut controller = female_controller();

        controller.set_measurement("shoulderWidth", 0.6).unwrap();
        let snapshot = controller.snapshot().clone();
        let code = controller.code().to_owned();

        controller.set_measurement("shoulderWidth", 0.6).unwrap();
        assert!(controller.snapshot().approx_eq(&snapshot, 1e-6));
        assert_eq!(controller.code(), code);
    }

    #[test]
    fn test_reset_group_is_scoped_in_state() {
        let mut controller = female_controller();
        controller.set_measurement("headShape", 0.7).unwrap();
        controller.set_measurement("stomachShape", 0.9).unwrap();

        controller.reset(Some(STOMACH_GROUP)).unwrap();

        assert_relative_eq!(controller.state().get("stomachShape").unwrap(), 0.0);
        assert!(!controller.is_unlocked(TRIMESTER));
        // Other groups keep their slider values...
        assert_relative_eq!(controller.state().get("headShape").unwrap(), 0.7);
        // ...but the meshes are restored wholesale from the baseline.
        assert!(controller.snapshot().approx_eq(controller.baseline(), 1e-6));
    }

    #[test]
    fn test_reset_unknown_group_rejected() {
        let mut controller = female_controller();
        let err = controller.reset(Some("arms")).unwrap_err();
        assert!(matches!(err, MorphError::UnknownGroup { .. }));
    }

    #[test]
    fn test_notification_fires_once_per_accepted_mutation() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);

        let mut controller = female_controller();
        controller.set_change_listener(Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        controller.set_measurement("shoulderWidth", 0.4).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        controller.reset(None).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        // Rejected mutations and repeated body types stay silent.
        assert!(controller.set_measurement("nose", 1.0).is_err());
        controller.set_body_type(BodyType::Average);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_attach_does_not_notify() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);

        let mut controller = MorphController::new(Gender::Female).unwrap();
        controller.set_change_listener(Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        controller.attach_scene(female_scene());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reattach_resets_session() {
        let mut controller = female_controller();
        controller.set_measurement("stomachShape", 0.9).unwrap();
        assert!(controller.is_unlocked(TRIMESTER));

        controller.attach_scene(female_scene());
        assert!(controller.state().is_all_zero());
        assert!(!controller.is_unlocked(TRIMESTER));
        assert!(controller.snapshot().approx_eq(controller.baseline(), 1e-6));
    }

    #[test]
    fn test_finish_reads_live_meshes() {
        let mut controller = female_controller();
        controller.set_measurement("headShape", 1.0).unwrap();

        let summary = controller.finish();
        assert_eq!(summary.shape, BodyType::Average);
        assert_relative_eq!(summary.shape_keys.get("headSquare").unwrap(), 1.0);
        assert_relative_eq!(summary.slider_values.get("headShape").unwrap(), 1.0);
        assert_eq!(summary.alphanumeric_code, controller.code());
    }

    #[test]
    fn test_detach_keeps_state() {
        let mut controller = female_controller();
        controller.set_measurement("shoulderWidth", 0.4).unwrap();

        controller.detach_scene();
        assert!(!controller.has_scene());
        assert_relative_eq!(controller.state().get("shoulderWidth").unwrap(), 0.4);
    }
}
