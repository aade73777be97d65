//! Observability
//!
//! Subscriber setup and credential masking for log output.

pub mod telemetry;

pub use telemetry::{OutputFormat, SubscriberConfig, init_from_env, init_subscriber};

/// Mask a credential for logging: `<missing>`, `ab***yz` for short values,
/// `abcd***wxyz` otherwise.
pub fn mask_token(token: Option<&str>) -> String {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return "<missing>".to_string();
    };
    let chars: Vec<char> = token.chars().collect();
    let keep = if chars.len() <= 8 { 2 } else { 4 };
    let head: String = chars.iter().take(keep).collect();
    let tail: String = chars[chars.len().saturating_sub(keep)..].iter().collect();
    format!("{head}***{tail}")
}
