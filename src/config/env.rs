//! Environment lookup helpers shared by the config loaders.

use crate::error::GatewayError;

/// Source of configuration values, normally the process environment.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read a variable, treating empty values as unset.
pub(crate) fn non_empty(lookup: Lookup<'_>, name: &str) -> Option<String> {
    lookup(name).filter(|v| !v.is_empty())
}

pub(crate) fn require(lookup: Lookup<'_>, name: &str) -> Result<String, GatewayError> {
    non_empty(lookup, name).ok_or_else(|| {
        GatewayError::ConfigurationError(format!("Missing required environment variable: {name}"))
    })
}

pub(crate) fn or_default(lookup: Lookup<'_>, name: &str, default: &str) -> String {
    lookup(name).unwrap_or_else(|| default.to_string())
}

pub(crate) fn as_port(raw: Option<String>, default: u16, name: &str) -> Result<u16, GatewayError> {
    match raw {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
            GatewayError::ConfigurationError(format!(
                "{name} must be an integer (received: {raw:?})"
            ))
        }),
    }
}

/// Split a scope list on commas and whitespace.
pub(crate) fn as_scopes(raw: Option<String>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(|c: char| c == ',' || c.is_whitespace())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Primary variable, then an already-resolved fallback, then a default.
pub(crate) fn value_with_fallback(
    lookup: Lookup<'_>,
    primary: &str,
    fallback: Option<String>,
    default: &str,
) -> String {
    if let Some(value) = lookup(primary).filter(|v| !v.trim().is_empty()) {
        return value.trim().to_string();
    }
    if let Some(value) = fallback.filter(|v| !v.trim().is_empty()) {
        return value.trim().to_string();
    }
    default.to_string()
}

/// Normalize a storage path segment: trim, strip slashes, collapse empty parts.
pub(crate) fn normalize_path_segment(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().trim_matches('/');
    let parts: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
