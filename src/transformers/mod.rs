//! Response Normalizer
//!
//! Reshapes provider payloads into one flat result per capability.

pub mod response;

pub use response::{chat_result, extract_text, image_result, speech_result, video_result};
