//! The shape key handler set.
//!
//! Handlers convert one scalar measurement (plus the current full
//! measurement state) into one or more morph-weight writes. They encode
//! the domain rules that go beyond a 1:1 copy: the derived trapezoid
//! silhouette, exclusive multi-shape blending, and conditional gating.
//!
//! The set of behaviors is a closed tagged variant, not an open
//! name→function table: dispatch stays exhaustive and new rules are new
//! variants.

use std::collections::HashMap;

use body_schema::{
    MeasurementConfig, MeasurementSchema, MeasurementState, FEMALE_BOTTOM_BLEND,
    FEMALE_HEAD_BLEND, FEMALE_STOMACH_BLEND, MALE_BOTTOM_BLEND, MALE_HEAD_BLEND,
    MALE_STOMACH_BLEND, TRAPEZOID_KEY, TRIMESTER,
};
use body_types::Gender;

/// Normalized stomach-shape position from which the trimester gate opens.
///
/// With a three-shape continuum this is the point where the pregnant
/// shape carries at least half the blend weight.
pub const STOMACH_UNLOCK_FROM: f32 = 0.75;

/// A single pending morph-weight write.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightWrite {
    /// Target shape-key name.
    pub key: String,
    /// Weight to write.
    pub weight: f32,
}

impl WeightWrite {
    /// Creates a write.
    #[must_use]
    pub fn new(key: impl Into<String>, weight: f32) -> Self {
        Self {
            key: key.into(),
            weight,
        }
    }
}

/// A request to flip a conditional-unlock flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateChange {
    /// The gated measurement affected.
    pub measurement: String,
    /// Whether the gate is now unlocked.
    pub unlocked: bool,
}

/// Everything a handler wants done for one measurement change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerOutcome {
    /// Morph-weight writes, applied to every mesh in the scene.
    pub writes: Vec<WeightWrite>,
    /// Conditional-unlock change, if the handler gates another measurement.
    pub gate: Option<GateChange>,
}

/// The derived shoulder/neck silhouette weight.
///
/// Computed from three normalized inputs (shoulder width, shoulder
/// height, neck width), each in `[0, 1]`:
///
/// ```text
/// trapezoid = clamp(0.5·width + 0.3·height + 0.2·(1 − neck), 0, 1)
/// ```
///
/// Wider and higher shoulders raise the weight; a wider neck softens
/// the silhouette and lowers it. Monotone increasing in width and
/// height, monotone decreasing in neck width.
///
/// # Examples
///
/// ```
/// use body_morph::trapezoid_weight;
///
/// let narrow = trapezoid_weight(0.0, 0.5, 0.5);
/// let wide = trapezoid_weight(1.0, 0.5, 0.5);
/// assert!(wide > narrow);
/// ```
#[must_use]
pub fn trapezoid_weight(width: f32, height: f32, neck: f32) -> f32 {
    let width = width.clamp(0.0, 1.0);
    let height = height.clamp(0.0, 1.0);
    let neck = neck.clamp(0.0, 1.0);
    (0.5 * width + 0.3 * height + 0.2 * (1.0 - neck)).clamp(0.0, 1.0)
}

/// Exclusive blend across an ordered shape continuum.
///
/// The normalized position `t` in `[0, 1]` selects at most two adjacent
/// keys, weighted complementarily (the pair sums to 1); every other key
/// is written to 0. All shapes are never active at full weight
/// simultaneously.
#[must_use]
pub fn blend_writes(keys: &[String], t: f32) -> Vec<WeightWrite> {
    let t = t.clamp(0.0, 1.0);
    match keys.len() {
        0 => Vec::new(),
        1 => vec![WeightWrite::new(keys[0].clone(), t)],
        n => {
            #[allow(clippy::cast_precision_loss)]
            let position = t * (n - 1) as f32;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let lower = (position.floor() as usize).min(n - 2);
            #[allow(clippy::cast_precision_loss)]
            let frac = position - lower as f32;

            keys.iter()
                .enumerate()
                .map(|(index, key)| {
                    let weight = if index == lower {
                        1.0 - frac
                    } else if index == lower + 1 {
                        frac
                    } else {
                        0.0
                    };
                    WeightWrite::new(key.clone(), weight)
                })
                .collect()
        }
    }
}

/// A per-measurement transformation rule.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ShapeKeyHandler {
    /// Write the value into every shape key the schema associates with
    /// the measurement. The fallback for unregistered measurements.
    Copy,

    /// Exclusive multi-shape blend across an ordered continuum.
    Blend {
        /// The ordered shape keys of the continuum.
        keys: Vec<String>,
    },

    /// Copy write plus the derived trapezoid composite, recomputed from
    /// the three named inputs whenever any of them changes.
    Trapezoid {
        /// Shoulder width measurement name.
        width: String,
        /// Shoulder height measurement name.
        height: String,
        /// Neck width measurement name.
        neck: String,
        /// Shape key receiving the derived weight.
        target: String,
    },

    /// Exclusive blend that also locks/unlocks a gated measurement when
    /// the normalized position crosses `unlock_from`.
    GatedBlend {
        /// The ordered shape keys of the continuum.
        keys: Vec<String>,
        /// The gated measurement controlled by this handler.
        gated: String,
        /// Normalized position from which the gate is unlocked.
        unlock_from: f32,
    },
}

impl ShapeKeyHandler {
    /// Applies the handler for one measurement change.
    ///
    /// `value` is the already-clamped new value, `state` the full
    /// measurement state *after* the value (and any linked mirror) has
    /// been stored — handlers read coupled inputs from it.
    #[must_use]
    pub fn apply(
        &self,
        name: &str,
        value: f32,
        state: &MeasurementState,
        schema: &MeasurementSchema,
    ) -> HandlerOutcome {
        let config = schema.config(name);
        match self {
            Self::Copy => HandlerOutcome {
                writes: copy_writes(config, value),
                gate: None,
            },

            Self::Blend { keys } => {
                let t = config.map_or(0.0, |c| c.normalize(value));
                HandlerOutcome {
                    writes: blend_writes(keys, t),
                    gate: None,
                }
            }

            Self::Trapezoid {
                width,
                height,
                neck,
                target,
            } => {
                let mut writes = copy_writes(config, value);
                writes.push(WeightWrite::new(
                    target.clone(),
                    trapezoid_weight(
                        normalized_input(schema, state, width),
                        normalized_input(schema, state, height),
                        normalized_input(schema, state, neck),
                    ),
                ));
                HandlerOutcome { writes, gate: None }
            }

            Self::GatedBlend {
                keys,
                gated,
                unlock_from,
            } => {
                let t = config.map_or(0.0, |c| c.normalize(value));
                HandlerOutcome {
                    writes: blend_writes(keys, t),
                    gate: Some(GateChange {
                        measurement: gated.clone(),
                        unlocked: t >= *unlock_from,
                    }),
                }
            }
        }
    }
}

fn copy_writes(config: Option<&MeasurementConfig>, value: f32) -> Vec<WeightWrite> {
    config.map_or_else(Vec::new, |c| {
        c.shape_keys
            .iter()
            .map(|key| WeightWrite::new(key.clone(), value))
            .collect()
    })
}

fn normalized_input(schema: &MeasurementSchema, state: &MeasurementState, name: &str) -> f32 {
    let value = state.get(name).unwrap_or(0.0);
    schema.config(name).map_or(0.0, |c| c.normalize(value))
}

/// Registry of per-measurement handlers.
///
/// Measurements without a registered handler fall back to
/// [`ShapeKeyHandler::Copy`].
///
/// # Examples
///
/// ```
/// use body_morph::{HandlerSet, ShapeKeyHandler};
/// use body_types::Gender;
///
/// let handlers = HandlerSet::standard(Gender::Female);
/// assert!(handlers.get("headShape").is_some());
///
/// // Unregistered names use the generic copy fallback.
/// assert_eq!(handlers.resolve("neckShape"), &ShapeKeyHandler::Copy);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HandlerSet {
    handlers: HashMap<String, ShapeKeyHandler>,
}

impl HandlerSet {
    const COPY: ShapeKeyHandler = ShapeKeyHandler::Copy;

    /// Creates an empty handler set (everything falls back to copy).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in handler set matching the preset schema for a gender.
    #[must_use]
    pub fn standard(gender: Gender) -> Self {
        let trapezoid = ShapeKeyHandler::Trapezoid {
            width: "shoulderWidth".to_owned(),
            height: "shoulderHeight".to_owned(),
            neck: "neckWidth".to_owned(),
            target: TRAPEZOID_KEY.to_owned(),
        };

        let mut set = Self::new();
        set.register("shoulderWidth", trapezoid.clone());
        set.register("shoulderHeight", trapezoid.clone());
        set.register("neckWidth", trapezoid);

        match gender {
            Gender::Female => {
                set.register(
                    "headShape",
                    ShapeKeyHandler::Blend {
                        keys: owned(&FEMALE_HEAD_BLEND),
                    },
                );
                set.register(
                    "bottomShape",
                    ShapeKeyHandler::Blend {
                        keys: owned(&FEMALE_BOTTOM_BLEND),
                    },
                );
                set.register(
                    "stomachShape",
                    ShapeKeyHandler::GatedBlend {
                        keys: owned(&FEMALE_STOMACH_BLEND),
                        gated: TRIMESTER.to_owned(),
                        unlock_from: STOMACH_UNLOCK_FROM,
                    },
                );
            }
            Gender::Male => {
                set.register(
                    "headShape",
                    ShapeKeyHandler::Blend {
                        keys: owned(&MALE_HEAD_BLEND),
                    },
                );
                set.register(
                    "bottomShape",
                    ShapeKeyHandler::Blend {
                        keys: owned(&MALE_BOTTOM_BLEND),
                    },
                );
                set.register(
                    "stomachShape",
                    ShapeKeyHandler::Blend {
                        keys: owned(&MALE_STOMACH_BLEND),
                    },
                );
            }
        }
        set
    }

    /// Registers (or replaces) the handler for a measurement.
    pub fn register(&mut self, name: impl Into<String>, handler: ShapeKeyHandler) {
        self.handlers.insert(name.into(), handler);
    }

    /// Returns the registered handler for a measurement, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ShapeKeyHandler> {
        self.handlers.get(name)
    }

    /// Returns the handler for a measurement, falling back to copy.
    #[must_use]
    pub fn resolve(&self, name: &str) -> &ShapeKeyHandler {
        self.handlers.get(name).unwrap_or(&Self::COPY)
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

fn owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|&k| k.to_owned()).collect()
}
