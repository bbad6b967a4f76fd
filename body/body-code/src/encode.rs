//! Shape code encoding.

use body_types::{BodyType, ShapeKeySnapshot};

use crate::base36::{digit_value, level_digits, quantize};

/// Total code length for a given number of shape keys.
///
/// One body-type tag, two digits per key, one checksum character.
///
/// # Examples
///
/// ```
/// use body_code::code_len;
///
/// assert_eq!(code_len(0), 2);
/// assert_eq!(code_len(12), 26);
/// ```
#[must_use]
pub const fn code_len(key_count: usize) -> usize {
    2 + key_count * 2
}

/// Encodes a shape-key snapshot and body-type tag into a shape code.
///
/// The encoding is pure and deterministic: keys are iterated in the
/// snapshot's canonical sorted order (never insertion order), and each
/// weight is quantized to a fixed precision before encoding, so
/// floating-point noise from repeated mesh writes cannot change the
/// code of a visually identical shape.
///
/// The code is lossless with respect to a fixed, known key set; see
/// [`crate::decode`] for the inverse.
///
/// # Examples
///
/// ```
/// use body_code::encode;
/// use body_types::{BodyType, ShapeKeySnapshot};
///
/// let mut snapshot = ShapeKeySnapshot::new();
/// snapshot.set("trapezoid", 0.4);
/// snapshot.set("headRound", 1.0);
///
/// let code = encode(&snapshot, BodyType::Average);
/// assert_eq!(code.len(), body_code::code_len(2));
/// assert!(code.starts_with('a'));
///
/// // Equal snapshots encode identically.
/// assert_eq!(code, encode(&snapshot.clone(), BodyType::Average));
///
/// // A different body type yields a different code.
/// assert_ne!(code, encode(&snapshot, BodyType::Slim));
/// ```
#[must_use]
pub fn encode(snapshot: &ShapeKeySnapshot, body_type: BodyType) -> String {
    let tag = body_type.tag();
    let mut code = String::with_capacity(code_len(snapshot.len()));
    code.push(tag);

    // The tag is drawn from the alphabet, so this cannot fail.
    let mut checksum = digit_value(tag).unwrap_or(0);

    for (_, weight) in snapshot.iter() {
        let level = quantize(weight);
        checksum = (checksum + level) % 36;
        let [high, low] = level_digits(level);
        code.push(high);
        code.push(low);
    }

    code.push(crate::base36::digit_char(checksum));
    code
}
