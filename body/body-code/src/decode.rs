//! Shape code decoding.

use body_types::{BodyType, ShapeKeySnapshot};

use crate::base36::{dequantize, digit_value, level_from_digits};
use crate::{code_len, CodeError, CodeResult};

/// Decodes a shape code back into a body type and snapshot.
///
/// The code stores quantized weights only, so decoding needs the fixed,
/// known set of shape-key names it was encoded against. Keys may be
/// passed in any order; they are matched up in canonical sorted order,
/// the same order [`crate::encode`] uses.
///
/// Weights come back at quantized precision (steps of
/// [`crate::QUANT_STEP`]), which is exact for any weight the encoder saw
/// after quantization.
///
/// # Errors
///
/// Returns an error if the code is empty, carries an unknown body-type
/// tag, has the wrong length for the key set, contains a character
/// outside the base-36 alphabet, or fails its checksum.
///
/// # Examples
///
/// ```
/// use body_code::{decode, encode};
/// use body_types::{BodyType, ShapeKeySnapshot};
///
/// let mut snapshot = ShapeKeySnapshot::new();
/// snapshot.set("headRound", 0.25);
/// snapshot.set("trapezoid", -0.5);
///
/// let code = encode(&snapshot, BodyType::Athletic);
/// let (body_type, decoded) = decode(&code, &["trapezoid", "headRound"]).unwrap();
///
/// assert_eq!(body_type, BodyType::Athletic);
/// assert!(decoded.approx_eq(&snapshot, 1e-6));
/// ```
pub fn decode(code: &str, keys: &[&str]) -> CodeResult<(BodyType, ShapeKeySnapshot)> {
    let mut chars: Vec<char> = code.chars().collect();
    let Some(&tag) = chars.first() else {
        return Err(CodeError::Empty);
    };

    let expected = code_len(keys.len());
    if chars.len() != expected {
        return Err(CodeError::LengthMismatch {
            expected,
            key_count: keys.len(),
            found: chars.len(),
        });
    }

    let body_type = BodyType::from_tag(tag).ok_or(CodeError::UnknownBodyTag { tag })?;

    // Checksum char comes last; payload digits sit between tag and checksum.
    let checksum_char = chars.pop().unwrap_or('0');
    let mut checksum = digit_value(tag)?;

    let mut sorted_keys: Vec<&str> = keys.to_vec();
    sorted_keys.sort_unstable();

    let mut snapshot = ShapeKeySnapshot::new();
    for (index, key) in sorted_keys.iter().enumerate() {
        let high = chars[1 + index * 2];
        let low = chars[2 + index * 2];
        let level = level_from_digits(high, low)?;
        checksum = (checksum + level) % 36;
        snapshot.set(*key, dequantize(level));
    }

    if digit_value(checksum_char)? != checksum {
        return Err(CodeError::ChecksumMismatch);
    }

    Ok((body_type, snapshot))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::encode;
    use approx::assert_relative_eq;

    const KEYS: [&str; 3] = ["headRound", "stomachFlat", "trapezoid"];

    fn sample() -> ShapeKeySnapshot {
        let mut snapshot = ShapeKeySnapshot::new();
        snapshot.set("headRound", 0.25);
        snapshot.set("stomachFlat", 1.0);
        snapshot.set("trapezoid", -0.57);
        snapshot
    }

    #[test]
    fn test_roundtrip() {
        let code = encode(&sample(), BodyType::Slim);
        let (body_type, decoded) = decode(&code, &KEYS).unwrap();

        assert_eq!(body_type, BodyType::Slim);
        assert_relative_eq!(decoded.get("headRound").unwrap(), 0.25, epsilon = 1e-6);
        assert_relative_eq!(decoded.get("stomachFlat").unwrap(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(decoded.get("trapezoid").unwrap(), -0.57, epsilon = 1e-6);
    }

    #[test]
    fn test_roundtrip_with_unsorted_keys() {
        let code = encode(&sample(), BodyType::Average);
        let shuffled = ["trapezoid", "headRound", "stomachFlat"];
        let (_, decoded) = decode(&code, &shuffled).unwrap();
        assert!(decoded.approx_eq(&sample(), 1e-6));
    }

    #[test]
    fn test_empty_code() {
        assert!(matches!(decode("", &[]), Err(CodeError::Empty)));
    }

    #[test]
    fn test_unknown_tag() {
        let mut code = encode(&sample(), BodyType::Average);
        code.replace_range(0..1, "z");
        assert!(matches!(
            decode(&code, &KEYS),
            Err(CodeError::UnknownBodyTag { tag: 'z' })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let code = encode(&sample(), BodyType::Average);
        let err = decode(&code, &["onlyOneKey"]).unwrap_err();
        assert!(matches!(err, CodeError::LengthMismatch { .. }));
    }

    #[test]
    fn test_invalid_digit() {
        let mut code = encode(&sample(), BodyType::Average);
        code.replace_range(1..2, "!");
        assert!(matches!(
            decode(&code, &KEYS),
            Err(CodeError::InvalidDigit { digit: '!' })
        ));
    }

    #[test]
    fn test_checksum_mismatch() {
        let code = encode(&sample(), BodyType::Average);
        // Flip the checksum character to a different alphabet character.
        let last = code.chars().last().unwrap();
        let flipped = if last == '0' { '1' } else { '0' };
        let mut tampered: String = code.chars().take(code.len() - 1).collect();
        tampered.push(flipped);

        assert!(matches!(
            decode(&tampered, &KEYS),
            Err(CodeError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_empty_key_set_roundtrip() {
        let code = encode(&ShapeKeySnapshot::new(), BodyType::Bust);
        let (body_type, decoded) = decode(&code, &[]).unwrap();
        assert_eq!(body_type, BodyType::Bust);
        assert!(decoded.is_empty());
    }
}
