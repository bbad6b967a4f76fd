//! Compact, deterministic shape codes for body-shape snapshots.
//!
//! A shape code is a short alphanumeric token derived from a
//! [`ShapeKeySnapshot`](body_types::ShapeKeySnapshot) and a
//! [`BodyType`](body_types::BodyType) tag, suitable for storage and
//! sharing. Two snapshots that are weight-for-weight equal within the
//! quantization step encode to the same code under the same body type;
//! any larger weight difference changes the code.
//!
//! # Format
//!
//! ```text
//! <tag> <2 base-36 digits per shape key, keys sorted> <checksum>
//! ```
//!
//! Weights are clamped to `[-1, 1]` and quantized to steps of
//! [`QUANT_STEP`] before encoding. Decoding takes the known key set and
//! is exact up to quantization — the encoding is not lossy for a fixed
//! set of shape-key names.
//!
//! # Example
//!
//! ```
//! use body_code::{decode, encode};
//! use body_types::{BodyType, ShapeKeySnapshot};
//!
//! let mut snapshot = ShapeKeySnapshot::new();
//! snapshot.set("trapezoid", 0.4);
//!
//! let code = encode(&snapshot, BodyType::Average);
//! let (body_type, decoded) = decode(&code, &["trapezoid"]).unwrap();
//!
//! assert_eq!(body_type, BodyType::Average);
//! assert!(decoded.approx_eq(&snapshot, 1e-6));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod base36;
mod decode;
mod encode;
mod error;

pub use base36::{QUANT_STEP, WEIGHT_MAX, WEIGHT_MIN};
pub use decode::decode;
pub use encode::{code_len, encode};
pub use error::{CodeError, CodeResult};
