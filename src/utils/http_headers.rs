//! HTTP Headers Utility
//!
//! Header construction for the two provider backend variants.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use crate::error::GatewayError;

const GATEWAY_USER_AGENT: &str = concat!("siumai-media-gateway/", env!("CARGO_PKG_VERSION"));

/// HTTP header builder for provider requests
#[derive(Debug, Default)]
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, GatewayError> {
        let auth_value = format!("Bearer {token}");
        self.headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).map_err(|e| {
                GatewayError::ConfigurationError(format!("Invalid API key format: {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, GatewayError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            GatewayError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
        })?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value).map_err(|e| {
                GatewayError::ConfigurationError(format!("Invalid header value for '{name}': {e}"))
            })?,
        );
        Ok(self)
    }

    pub fn with_user_agent(mut self) -> Self {
        self.headers
            .insert(USER_AGENT, HeaderValue::from_static(GATEWAY_USER_AGENT));
        self
    }

    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

/// Provider-specific header sets.
pub struct ProviderHeaders;

impl ProviderHeaders {
    /// Direct endpoint: bearer key plus optional organization.
    pub fn direct(api_key: &str, organization: Option<&str>) -> Result<HeaderMap, GatewayError> {
        let mut builder = HttpHeaderBuilder::new()
            .with_bearer_auth(api_key)?
            .with_user_agent();
        if let Some(org) = organization {
            builder = builder.with_header("OpenAI-Organization", org)?;
        }
        Ok(builder.build())
    }

    /// Managed deployment: an AD token takes precedence over the `api-key` header.
    pub fn managed(api_key: &str, ad_token: Option<&str>) -> Result<HeaderMap, GatewayError> {
        let builder = HttpHeaderBuilder::new().with_user_agent();
        let builder = match ad_token {
            Some(token) => builder.with_bearer_auth(token)?,
            None => builder.with_header("api-key", api_key)?,
        };
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_headers_carry_bearer_and_org() {
        let headers = ProviderHeaders::direct("sk-test", Some("org-42")).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
        assert_eq!(headers.get("OpenAI-Organization").unwrap(), "org-42");
    }

    #[test]
    fn managed_headers_prefer_ad_token() {
        let headers = ProviderHeaders::managed("azure-key", None).unwrap();
        assert_eq!(headers.get("api-key").unwrap(), "azure-key");
        assert!(headers.get(AUTHORIZATION).is_none());

        let headers = ProviderHeaders::managed("azure-key", Some("aad-token")).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer aad-token");
        assert!(headers.get("api-key").is_none());
    }

    #[test]
    fn invalid_header_value_is_configuration_error() {
        let err = ProviderHeaders::direct("bad\nkey", None).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigurationError(_)));
    }
}
