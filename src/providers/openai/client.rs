//! `OpenAI` Client Implementation
//!
//! Builds one long-lived `reqwest::Client` bound to the configured backend
//! variant and implements [`ProviderApi`] on top of it.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::sync::RwLock;
use std::time::Duration;

use super::request;
use crate::config::{BackendKind, BackendVariant, DEFAULT_OPENAI_BASE_URL, ProviderConfig};
use crate::error::{GatewayError, Result};
use crate::providers::{GeneratedImages, ProviderApi, VideoPoll};
use crate::types::{
    ChatRequest, ImageRequest, SpeechRequest, VideoJob, VideoRequest, VideoVariant,
};
use crate::utils::http_headers::ProviderHeaders;

/// Response header carrying the provider's suggested polling interval.
pub const POLL_AFTER_HEADER: &str = "openai-poll-after-ms";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
/// Upper bound for a single HTTP exchange; video downloads can be large.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// `OpenAI` / Azure `OpenAI` client
///
/// `close` drops the HTTP client and its connection pool; requests after that
/// fail with `ServiceClosed`.
pub struct OpenAiClient {
    http_client: RwLock<Option<Client>>,
    variant: BackendVariant,
    api_key: SecretString,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("provider", &self.kind().provider_id())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiClient {
    /// Create a client with its own HTTP connection pool.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                GatewayError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?;
        Ok(Self::with_http_client(config, http_client))
    }

    pub fn with_http_client(config: &ProviderConfig, http_client: Client) -> Self {
        Self {
            http_client: RwLock::new(Some(http_client)),
            variant: config.variant.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Full URL for an API path. Managed deployments route through the
    /// deployment segment when one applies.
    fn endpoint(&self, deployment: Option<&str>, path: &str) -> String {
        match &self.variant {
            BackendVariant::Direct(direct) => {
                let base = direct
                    .base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_OPENAI_BASE_URL)
                    .trim_end_matches('/');
                format!("{base}/{path}")
            }
            BackendVariant::Managed(managed) => {
                let base = managed.endpoint.trim_end_matches('/');
                match deployment {
                    Some(deployment) => format!(
                        "{base}/openai/deployments/{}/{path}",
                        urlencoding::encode(deployment)
                    ),
                    None => format!("{base}/openai/{path}"),
                }
            }
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        match &self.variant {
            BackendVariant::Direct(direct) => ProviderHeaders::direct(
                self.api_key.expose_secret(),
                direct.organization.as_deref(),
            ),
            BackendVariant::Managed(managed) => ProviderHeaders::managed(
                self.api_key.expose_secret(),
                managed.ad_token.as_ref().map(|t| t.expose_secret()),
            ),
        }
    }

    fn http_client(&self) -> Result<Client> {
        self.http_client
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or(GatewayError::ServiceClosed)
    }

    /// Authenticated request builder for an API path.
    fn make_request(
        &self,
        method: Method,
        deployment: Option<&str>,
        path: &str,
    ) -> Result<RequestBuilder> {
        let url = self.endpoint(deployment, path);
        let mut builder = self
            .http_client()?
            .request(method, url)
            .headers(self.headers()?);
        if let BackendVariant::Managed(managed) = &self.variant {
            builder = builder.query(&[("api-version", managed.api_version.as_str())]);
        }
        Ok(builder)
    }

    /// Send and reject non-success statuses.
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(self.handle_response_error(response).await);
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::ParseError(format!("Failed to parse response: {e}")))
    }

    async fn send_bytes(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn send_video_poll(&self, builder: RequestBuilder) -> Result<VideoPoll> {
        let response = self.send(builder).await?;
        let retry_after = poll_after(response.headers());
        let job = response
            .json::<VideoJob>()
            .await
            .map_err(|e| GatewayError::ParseError(format!("Failed to parse video job: {e}")))?;
        Ok(VideoPoll::new(job).with_retry_after(retry_after))
    }

    /// Convert a non-success response into an `ApiError`, preferring the
    /// provider's `error.message`.
    async fn handle_response_error(&self, response: Response) -> GatewayError {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let details = serde_json::from_str::<serde_json::Value>(&error_text).ok();
        let message = details
            .as_ref()
            .and_then(|d| d.pointer("/error/message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or(error_text);

        tracing::warn!(
            provider = self.kind().provider_id(),
            status = status.as_u16(),
            "Provider request failed"
        );

        GatewayError::ApiError {
            code: status.as_u16(),
            message,
            details,
        }
    }
}

fn poll_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(POLL_AFTER_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[async_trait]
impl ProviderApi for OpenAiClient {
    fn kind(&self) -> BackendKind {
        match self.variant {
            BackendVariant::Direct(_) => BackendKind::Direct,
            BackendVariant::Managed(_) => BackendKind::Managed,
        }
    }

    async fn create_chat_completion(
        &self,
        model: &str,
        request: &ChatRequest,
    ) -> Result<serde_json::Value> {
        tracing::debug!(provider = self.kind().provider_id(), model, "chat.create");
        let builder = self
            .make_request(Method::POST, Some(model), "chat/completions")?
            .json(&request::chat_body(model, request));
        self.send_json(builder).await
    }

    async fn generate_images(
        &self,
        model: &str,
        request: &ImageRequest,
    ) -> Result<GeneratedImages> {
        tracing::debug!(
            provider = self.kind().provider_id(),
            model,
            count = request.count,
            "images.generate"
        );
        let builder = self
            .make_request(Method::POST, Some(model), "images/generations")?
            .json(&request::image_body(model, request));
        self.send_json(builder).await
    }

    async fn create_speech(
        &self,
        model: &str,
        voice: &str,
        request: &SpeechRequest,
    ) -> Result<Vec<u8>> {
        tracing::debug!(provider = self.kind().provider_id(), model, voice, "audio.speech.create");
        let builder = self
            .make_request(Method::POST, Some(model), "audio/speech")?
            .json(&request::speech_body(model, voice, request));
        self.send_bytes(builder).await
    }

    async fn create_video(&self, model: &str, request: &VideoRequest) -> Result<VideoPoll> {
        tracing::debug!(provider = self.kind().provider_id(), model, "videos.create");
        let builder = self
            .make_request(Method::POST, None, "videos")?
            .multipart(request::video_form(model, request));
        self.send_video_poll(builder).await
    }

    async fn retrieve_video(&self, video_id: &str) -> Result<VideoPoll> {
        let path = format!("videos/{}", urlencoding::encode(video_id));
        let builder = self.make_request(Method::GET, None, &path)?;
        self.send_video_poll(builder).await
    }

    async fn download_video_content(
        &self,
        video_id: &str,
        variant: VideoVariant,
    ) -> Result<Vec<u8>> {
        let path = format!("videos/{}/content", urlencoding::encode(video_id));
        let builder = self
            .make_request(Method::GET, None, &path)?
            .query(&[("variant", variant.as_str())]);
        self.send_bytes(builder).await
    }

    async fn close(&self) -> Result<()> {
        let released = self
            .http_client
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        tracing::debug!(
            provider = self.kind().provider_id(),
            released = released.is_some(),
            "Closing provider client"
        );
        Ok(())
    }
}
