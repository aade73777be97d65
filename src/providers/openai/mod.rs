//! OpenAI / Azure OpenAI wire client
//!
//! One client type serves both backend variants; only URL construction and
//! authentication headers differ.

mod client;
pub mod request;

pub use client::{OpenAiClient, POLL_AFTER_HEADER};
