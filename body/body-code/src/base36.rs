//! Base-36 digits and weight quantization shared by encode and decode.

use crate::{CodeError, CodeResult};

/// The lowercase base-36 alphabet.
pub const ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Quantization step for weights.
///
/// Weight differences below this step cannot change the code, so
/// floating-point noise from repeated mesh writes encodes identically.
pub const QUANT_STEP: f32 = 0.01;

/// Lower bound of the encodable weight range.
pub const WEIGHT_MIN: f32 = -1.0;

/// Upper bound of the encodable weight range.
pub const WEIGHT_MAX: f32 = 1.0;

/// Number of quantization levels over `[WEIGHT_MIN, WEIGHT_MAX]`.
pub const LEVELS: u32 = 201;

/// Quantizes a weight to its level index in `0..LEVELS`.
#[must_use]
pub fn quantize(weight: f32) -> u32 {
    let clamped = weight.clamp(WEIGHT_MIN, WEIGHT_MAX);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let level = ((clamped - WEIGHT_MIN) / QUANT_STEP).round() as u32;
    level.min(LEVELS - 1)
}

/// Reconstructs the representative weight for a level index.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn dequantize(level: u32) -> f32 {
    QUANT_STEP.mul_add(level.min(LEVELS - 1) as f32, WEIGHT_MIN)
}

/// Returns the alphabet character for a digit value below 36.
#[must_use]
pub fn digit_char(value: u32) -> char {
    ALPHABET[(value as usize) % ALPHABET.len()]
}

/// Returns the digit value of an alphabet character.
///
/// # Errors
///
/// Returns [`CodeError::InvalidDigit`] for characters outside the alphabet.
pub fn digit_value(digit: char) -> CodeResult<u32> {
    match digit {
        '0'..='9' => Ok(digit as u32 - '0' as u32),
        'a'..='z' => Ok(digit as u32 - 'a' as u32 + 10),
        _ => Err(CodeError::InvalidDigit { digit }),
    }
}

/// Encodes a quantization level as two base-36 digits.
#[must_use]
pub fn level_digits(level: u32) -> [char; 2] {
    [digit_char(level / 36), digit_char(level % 36)]
}

/// Decodes two base-36 digits back into a quantization level.
///
/// # Errors
///
/// Returns [`CodeError::InvalidDigit`] if either character is outside
/// the alphabet.
pub fn level_from_digits(high: char, low: char) -> CodeResult<u32> {
    Ok(digit_value(high)? * 36 + digit_value(low)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quantize_bounds() {
        assert_eq!(quantize(WEIGHT_MIN), 0);
        assert_eq!(quantize(WEIGHT_MAX), LEVELS - 1);
        assert_eq!(quantize(-5.0), 0); // Clamped
        assert_eq!(quantize(5.0), LEVELS - 1); // Clamped
    }

    #[test]
    fn test_quantize_neutral() {
        assert_eq!(quantize(0.0), 100);
    }

    #[test]
    fn test_noise_below_step_is_absorbed() {
        assert_eq!(quantize(0.5), quantize(0.5 + QUANT_STEP * 0.4));
        assert_ne!(quantize(0.5), quantize(0.5 + QUANT_STEP * 1.5));
    }

    #[test]
    fn test_dequantize_inverts_quantize() {
        for level in 0..LEVELS {
            assert_eq!(quantize(dequantize(level)), level);
        }
        assert_relative_eq!(dequantize(100), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_digit_roundtrip() {
        for value in 0..36 {
            let ch = digit_char(value);
            assert_eq!(digit_value(ch).unwrap_or(999), value);
        }
        assert!(digit_value('!').is_err());
        assert!(digit_value('A').is_err()); // Alphabet is lowercase only
    }

    #[test]
    fn test_level_digits_roundtrip() {
        for level in [0, 1, 35, 36, 100, 200] {
            let [high, low] = level_digits(level);
            assert_eq!(level_from_digits(high, low).unwrap_or(9999), level);
        }
    }
}
