//! Pre-authored measurement schemas, one per gender.
//!
//! These mirror the shape keys baked into the pre-authored body assets.
//! The two genders overlap on the shoulder/neck/stomach names but carry
//! different blend key sets, and only the female schema defines the
//! gated `trimester` measurement. Consumers must not assume a universal
//! name set.

use body_types::Gender;

use crate::{MeasurementConfig, MeasurementGroup, MeasurementSchema, SchemaResult};

/// Group key for the shoulder/neck sliders.
pub const SHOULDERS_GROUP: &str = "shoulders";
/// Group key for the stomach sliders.
pub const STOMACH_GROUP: &str = "stomach";
/// Group key for the head sliders.
pub const HEAD_GROUP: &str = "head";
/// Group key for the bottom sliders.
pub const BOTTOM_GROUP: &str = "bottom";

/// The derived shoulder/neck silhouette shape key.
pub const TRAPEZOID_KEY: &str = "trapezoid";

/// Ordered blend continuum for the female head shape slider.
pub const FEMALE_HEAD_BLEND: [&str; 3] = ["headOval", "headRound", "headSquare"];
/// Ordered blend continuum for the female bottom shape slider.
pub const FEMALE_BOTTOM_BLEND: [&str; 3] = ["bottomRound", "bottomSquare", "bottomHeart"];
/// Ordered blend continuum for the female stomach shape slider.
///
/// The upper end of the continuum (`stomachPregnant`) unlocks the gated
/// `trimester` measurement.
pub const FEMALE_STOMACH_BLEND: [&str; 3] = ["stomachFlat", "stomachRound", "stomachPregnant"];

/// Ordered blend continuum for the male head shape slider.
pub const MALE_HEAD_BLEND: [&str; 3] = ["headOval", "headSquare", "headChiseled"];
/// Ordered blend continuum for the male bottom shape slider.
pub const MALE_BOTTOM_BLEND: [&str; 2] = ["bottomRound", "bottomSquare"];
/// Ordered blend continuum for the male stomach shape slider.
pub const MALE_STOMACH_BLEND: [&str; 3] = ["stomachFlat", "stomachRound", "stomachBarrel"];

/// Gated measurement unlocked by the female stomach shape handler.
pub const TRIMESTER: &str = "trimester";

/// Builds the measurement schema for a gender.
///
/// Pure function: the same gender always produces the same schema.
///
/// # Errors
///
/// Propagates schema validation errors; the built-in presets are
/// authored to pass validation.
///
/// # Examples
///
/// ```
/// use body_schema::schema_for;
/// use body_types::Gender;
///
/// let female = schema_for(Gender::Female).unwrap();
/// let male = schema_for(Gender::Male).unwrap();
///
/// // Overlapping names...
/// assert!(female.contains("shoulderWidth"));
/// assert!(male.contains("shoulderWidth"));
///
/// // ...but not a universal set.
/// assert!(female.contains("trimester"));
/// assert!(!male.contains("trimester"));
/// ```
pub fn schema_for(gender: Gender) -> SchemaResult<MeasurementSchema> {
    match gender {
        Gender::Female => female_schema(),
        Gender::Male => male_schema(),
    }
}

fn signed(name: &str) -> SchemaResult<MeasurementConfig> {
    Ok(MeasurementConfig::new(name, -1.0, 1.0, 0.01)?.with_shape_key(name))
}

fn unsigned(name: &str) -> SchemaResult<MeasurementConfig> {
    Ok(MeasurementConfig::new(name, 0.0, 1.0, 0.01)?.with_shape_key(name))
}

fn blend(name: &str, keys: &[&str]) -> SchemaResult<MeasurementConfig> {
    Ok(MeasurementConfig::new(name, 0.0, 1.0, 0.01)?.with_shape_keys(keys.iter().copied()))
}

fn shoulders_group() -> SchemaResult<MeasurementGroup> {
    Ok(
        MeasurementGroup::new(SHOULDERS_GROUP, "Shoulders & Neck", "shoulders")
            .with_measurement(
                "shoulderWidth",
                signed("shoulderWidth")?.with_linked("stomachSize"),
            )
            .with_measurement("shoulderHeight", signed("shoulderHeight")?)
            .with_measurement("neckWidth", signed("neckWidth")?)
            .with_measurement("neckShape", unsigned("neckShape")?),
    )
}

fn female_schema() -> SchemaResult<MeasurementSchema> {
    MeasurementSchema::builder()
        .with_group(shoulders_group()?)
        .with_group(
            MeasurementGroup::new(STOMACH_GROUP, "Stomach", "torso")
                .with_measurement(
                    "stomachSize",
                    signed("stomachSize")?.with_linked("shoulderWidth"),
                )
                .with_measurement("stomachShape", blend("stomachShape", &FEMALE_STOMACH_BLEND)?)
                .with_measurement(
                    TRIMESTER,
                    MeasurementConfig::new(TRIMESTER, 0.0, 3.0, 1.0)?
                        .with_tick_count(3)
                        .with_shape_key(TRIMESTER)
                        .gated(),
                ),
        )
        .with_group(
            MeasurementGroup::new(HEAD_GROUP, "Head", "head")
                .with_measurement("headShape", blend("headShape", &FEMALE_HEAD_BLEND)?),
        )
        .with_group(
            MeasurementGroup::new(BOTTOM_GROUP, "Bottom", "hips")
                .with_measurement("bottomShape", blend("bottomShape", &FEMALE_BOTTOM_BLEND)?),
        )
        .build()
}

fn male_schema() -> SchemaResult<MeasurementSchema> {
    MeasurementSchema::builder()
        .with_group(shoulders_group()?)
        .with_group(
            MeasurementGroup::new(STOMACH_GROUP, "Stomach", "torso")
                .with_measurement(
                    "stomachSize",
                    signed("stomachSize")?.with_linked("shoulderWidth"),
                )
                .with_measurement("stomachShape", blend("stomachShape", &MALE_STOMACH_BLEND)?),
        )
        .with_group(
            MeasurementGroup::new(HEAD_GROUP, "Head", "head")
                .with_measurement("headShape", blend("headShape", &MALE_HEAD_BLEND)?),
        )
        .with_group(
            MeasurementGroup::new(BOTTOM_GROUP, "Bottom", "hips")
                .with_measurement("bottomShape", blend("bottomShape", &MALE_BOTTOM_BLEND)?),
        )
        .build()
}
