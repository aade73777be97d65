//! Utility helpers shared by provider clients.

pub mod http_headers;
