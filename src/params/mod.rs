//! Capability Normalizer
//!
//! Validates raw tool arguments and turns them into canonical request types.
//! Every enum-like field is mapped onto a closed set here, so nothing
//! unnormalized ever reaches the backend adapter. Normalization is pure:
//! no I/O, no logging side effects.

pub mod audio;
pub mod chat;
pub mod image;
pub mod video;

pub use audio::audio_content_type;
pub use video::video_variant_meta;

use crate::error::Result;

/// Conversion from raw tool arguments into a normalized request.
pub trait NormalizeParams {
    type Output;

    /// Validate and canonicalize, failing with a validation error that names
    /// the offending field.
    fn normalize(self) -> Result<Self::Output>;
}
