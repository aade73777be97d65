//! Azure Blob Storage backend
//!
//! Uploads block blobs over the Blob REST API, authorized with either a
//! SharedKey signature derived from the account key or a SAS token taken
//! from the connection string.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, Url, header};
use secrecy::ExposeSecret;
use std::sync::RwLock;
use std::time::Duration;

use super::ArtifactStore;
use crate::config::StorageConfig;
use crate::error::{GatewayError, Result};

pub const BLOB_API_VERSION: &str = "2021-08-06";

/// Parsed storage account connection string.
#[derive(Clone)]
pub struct ConnectionString {
    pub account_name: Option<String>,
    account_key: Option<Vec<u8>>,
    sas_token: Option<String>,
    pub blob_endpoint: String,
}

impl std::fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionString")
            .field("account_name", &self.account_name)
            .field("account_key", &self.account_key.as_ref().map(|_| "[REDACTED]"))
            .field("sas_token", &self.sas_token.as_ref().map(|_| "[REDACTED]"))
            .field("blob_endpoint", &self.blob_endpoint)
            .finish()
    }
}

impl ConnectionString {
    /// Parse `Key=Value;...` pairs. Either `AccountKey` or `SharedAccessSignature` is required.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut protocol = "https".to_string();
        let mut suffix = "core.windows.net".to_string();
        let mut account_name = None;
        let mut account_key = None;
        let mut sas_token = None;
        let mut blob_endpoint = None;

        for pair in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(GatewayError::ConfigurationError(
                    "Malformed storage connection string segment".to_string(),
                ));
            };
            match key {
                "DefaultEndpointsProtocol" => protocol = value.to_string(),
                "AccountName" => account_name = Some(value.to_string()),
                "AccountKey" => {
                    let decoded = STANDARD.decode(value).map_err(|e| {
                        GatewayError::ConfigurationError(format!(
                            "AccountKey is not valid base64: {e}"
                        ))
                    })?;
                    account_key = Some(decoded);
                }
                "EndpointSuffix" => suffix = value.to_string(),
                "BlobEndpoint" => blob_endpoint = Some(value.trim_end_matches('/').to_string()),
                "SharedAccessSignature" => {
                    sas_token = Some(value.trim_start_matches('?').to_string())
                }
                _ => {}
            }
        }

        if account_key.is_none() && sas_token.is_none() {
            return Err(GatewayError::ConfigurationError(
                "Storage connection string needs AccountKey or SharedAccessSignature".to_string(),
            ));
        }
        if account_key.is_some() && account_name.is_none() {
            return Err(GatewayError::ConfigurationError(
                "Storage connection string is missing AccountName".to_string(),
            ));
        }

        let blob_endpoint = match (blob_endpoint, &account_name) {
            (Some(endpoint), _) => endpoint,
            (None, Some(account)) => format!("{protocol}://{account}.blob.{suffix}"),
            (None, None) => {
                return Err(GatewayError::ConfigurationError(
                    "Storage connection string needs AccountName or BlobEndpoint".to_string(),
                ));
            }
        };

        Ok(Self {
            account_name,
            account_key,
            sas_token,
            blob_endpoint,
        })
    }
}

/// Block-blob uploader for one container.
///
/// `close` drops the HTTP client and its connection pool; uploads after that
/// fail with `ServiceClosed`.
#[derive(Debug)]
pub struct AzureBlobStore {
    client: RwLock<Option<Client>>,
    account: ConnectionString,
    container: String,
}

impl AzureBlobStore {
    pub fn new(account: ConnectionString, container: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| {
                GatewayError::ConfigurationError(format!(
                    "Failed to create storage HTTP client: {e}"
                ))
            })?;
        Ok(Self::with_client(account, container, client))
    }

    pub fn with_client(
        account: ConnectionString,
        container: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            client: RwLock::new(Some(client)),
            account,
            container: container.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let account = ConnectionString::parse(config.connection_string.expose_secret())?;
        Self::new(account, config.container.clone())
    }

    fn client(&self) -> Result<Client> {
        self.client
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or(GatewayError::ServiceClosed)
    }

    /// Request URL for a blob; path characters are percent-encoded here.
    fn blob_url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}/{}", self.account.blob_endpoint, self.container, path);
        Url::parse(&raw)
            .map_err(|e| GatewayError::StorageError(format!("Invalid blob URL {raw}: {e}")))
    }
}

/// `/{account}{encoded URL path}`, signed exactly as the path goes on the wire.
fn canonicalized_resource(account: &str, url: &Url) -> String {
    format!("/{account}{}", url.path())
}

#[async_trait]
impl ArtifactStore for AzureBlobStore {
    async fn upload(&self, data: Vec<u8>, path: &str, content_type: &str) -> Result<()> {
        let date = chrono::Utc::now()
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string();
        let content_length = data.len();
        let url = self.blob_url(path)?;

        let mut request = self
            .client()?
            .put(url.clone())
            .header(header::CONTENT_TYPE, content_type)
            .header("x-ms-blob-type", "BlockBlob")
            .header("x-ms-date", &date)
            .header("x-ms-version", BLOB_API_VERSION);

        match (&self.account.account_key, &self.account.account_name) {
            (Some(key), Some(account)) => {
                let headers = [
                    ("x-ms-blob-type", "BlockBlob"),
                    ("x-ms-date", date.as_str()),
                    ("x-ms-version", BLOB_API_VERSION),
                ];
                let to_sign = string_to_sign(
                    "PUT",
                    content_length,
                    content_type,
                    &headers,
                    &canonicalized_resource(account, &url),
                );
                let signature = sign(key, &to_sign)?;
                request = request.header(
                    header::AUTHORIZATION,
                    format!("SharedKey {account}:{signature}"),
                );
            }
            _ => {
                if let Some(sas) = &self.account.sas_token {
                    request = request.query(&sas_pairs(sas));
                }
            }
        }

        let response = request
            .body(data)
            .send()
            .await
            .map_err(|e| GatewayError::StorageError(format!("Blob upload request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::StorageError(format!(
                "Blob upload failed: {status} - {body}"
            )));
        }

        tracing::debug!(blob_path = %path, container = %self.container, "Uploaded blob");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let released = self
            .client
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        tracing::debug!(
            container = %self.container,
            released = released.is_some(),
            "Closing blob store"
        );
        Ok(())
    }
}

/// SharedKey string-to-sign for a request without conditional or range headers.
///
/// `ms_headers` must already be sorted by name.
fn string_to_sign(
    verb: &str,
    content_length: usize,
    content_type: &str,
    ms_headers: &[(&str, &str)],
    canonicalized_resource: &str,
) -> String {
    let length = if content_length == 0 {
        String::new()
    } else {
        content_length.to_string()
    };
    // VERB, Content-Encoding, Content-Language, Content-Length, Content-MD5,
    // Content-Type, Date, If-Modified-Since, If-Match, If-None-Match,
    // If-Unmodified-Since, Range
    let standard = [
        verb,
        "",
        "",
        length.as_str(),
        "",
        content_type,
        "",
        "",
        "",
        "",
        "",
        "",
    ];
    let mut out = String::new();
    for value in standard {
        out.push_str(value);
        out.push('\n');
    }
    for (name, value) in ms_headers {
        out.push_str(name);
        out.push(':');
        out.push_str(value);
        out.push('\n');
    }
    out.push_str(canonicalized_resource);
    out
}

fn sign(key: &[u8], string_to_sign: &str) -> Result<String> {
    Ok(STANDARD.encode(hmac_sha256(key, string_to_sign.as_bytes())?))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| {
        GatewayError::ConfigurationError(format!("Invalid storage account key: {e}"))
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Split a SAS token into query pairs, decoding values so they are not encoded twice.
fn sas_pairs(sas: &str) -> Vec<(String, String)> {
    sas.split('&')
        .filter(|p| !p.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let v = urlencoding::decode(v)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| v.to_string());
            (k.to_string(), v)
        })
        .collect()
}
