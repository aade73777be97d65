//! Artifact persistence tests: missing configuration, upload failures,
//! concurrent naming and the Azure Blob wire format.

mod support;

use std::collections::HashSet;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::future::join_all;
use serde_json::json;
use siumai_media_gateway::config::StorageConfig;
use siumai_media_gateway::prelude::*;
use siumai_media_gateway::storage::{ArtifactPersister, BlobNamer};
use siumai_media_gateway::types::{ArtifactCategory, MediaArtifact};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use wiremock::matchers::{any, header, header_exists, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{
    PUBLIC_BASE, direct_config, service_with_store, service_without_storage, storage_config,
};

const EMULATOR_KEY: &str = "Z2F0ZXdheS10ZXN0LWFjY291bnQta2V5";

/// Recompute the SharedKey signature of a received Put Blob request.
fn expected_shared_key(request: &wiremock::Request, account: &str) -> String {
    let header = |name: &str| {
        request
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    let to_sign = format!(
        concat!(
            "PUT\n\n\n{}\n\n{}\n\n\n\n\n\n\n",
            "x-ms-blob-type:{}\nx-ms-date:{}\nx-ms-version:{}\n/{}{}",
        ),
        request.body.len(),
        header("content-type"),
        header("x-ms-blob-type"),
        header("x-ms-date"),
        header("x-ms-version"),
        account,
        request.url.path(),
    );
    let key = STANDARD.decode(EMULATOR_KEY).unwrap();
    let mut mac = Hmac::<Sha256>::new_from_slice(&key).unwrap();
    mac.update(to_sign.as_bytes());
    format!("SharedKey {account}:{}", STANDARD.encode(mac.finalize().into_bytes()))
}

async fn mount_image_response(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1727784000,
            "data": [{ "b64_json": STANDARD.encode(b"image-bytes") }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn image_without_storage_names_required_settings() {
    let mock_server = MockServer::start().await;
    mount_image_response(&mock_server).await;

    let service = service_without_storage(direct_config(&mock_server));
    let err = service
        .generate_image(ImageParams::new("a fox"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::StorageNotConfigured));
    assert!(err.to_string().contains("AZURE_BLOB_PUBLIC_BASE_URL"));
}

#[tokio::test]
async fn chat_works_without_storage() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(support::chat_completion(json!("plain"))),
        )
        .mount(&mock_server)
        .await;

    let service = service_without_storage(direct_config(&mock_server));
    let result = service.chat_completion(ChatParams::new("hi")).await.unwrap();
    assert_eq!(result.text, "plain");
}

#[tokio::test]
async fn failed_upload_becomes_missing_url_error() {
    let mock_server = MockServer::start().await;
    mount_image_response(&mock_server).await;

    let store = Arc::new(MemoryArtifactStore::failing());
    let service = service_with_store(direct_config(&mock_server), store.clone());
    let err = service
        .generate_image(ImageParams::new("a fox"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::MissingArtifactUrl { .. }));
    assert!(err
        .to_string()
        .starts_with("Unable to produce a publicly accessible image asset URL."));
    assert!(store.uploads().is_empty());
}

#[tokio::test]
async fn concurrent_persists_get_distinct_paths() {
    let store = Arc::new(MemoryArtifactStore::new());
    let persister = ArtifactPersister::new(store.clone(), &storage_config());

    let tasks = (0..16u8).map(|i| {
        let persister = persister.clone();
        async move {
            persister
                .persist(MediaArtifact::bytes(
                    vec![i; 4],
                    ArtifactCategory::Audio,
                    ".MP3",
                    "audio/mpeg",
                ))
                .await
        }
    });
    let urls: Vec<String> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap().expect("url"))
        .collect();

    let unique: HashSet<&String> = urls.iter().collect();
    assert_eq!(unique.len(), 16);
    for url in &urls {
        assert!(url.starts_with(&format!("{PUBLIC_BASE}/audio/")));
        assert!(url.ends_with(".mp3"));
    }
    assert_eq!(store.uploads().len(), 16);
}

#[tokio::test]
async fn empty_and_undecodable_payloads_are_not_uploaded() {
    let store = Arc::new(MemoryArtifactStore::new());
    let persister = ArtifactPersister::new(store.clone(), &storage_config());

    let empty = persister
        .persist(MediaArtifact::bytes(Vec::new(), ArtifactCategory::Audio, "mp3", "audio/mpeg"))
        .await
        .unwrap();
    let garbage = persister
        .persist(MediaArtifact::base64(
            "%%%not-base64%%%",
            ArtifactCategory::Images,
            "png",
            "image/png",
        ))
        .await
        .unwrap();

    assert!(empty.is_none());
    assert!(garbage.is_none());
    assert!(store.uploads().is_empty());
}

#[test]
fn singular_and_plural_categories_share_roots() {
    let config = StorageConfig::new("AccountName=a;AccountKey=Yg==", "media", PUBLIC_BASE)
        .with_path_prefix("tenant-a")
        .with_roots("pics", "", "clips");
    let namer = BlobNamer::new(&config);

    assert_eq!(namer.root_for_category("image"), "pics");
    assert_eq!(namer.root_for_category("images"), "pics");
    assert_eq!(namer.root_for_category("audio"), "audio");
    assert_eq!(namer.root_for_category("video"), "clips");
    assert_eq!(namer.root_for_category("/"), "media");
    assert!(namer.blob_name("videos", "mp4").starts_with("tenant-a/clips/"));
}

#[tokio::test]
async fn azure_upload_is_signed_with_shared_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path_regex(r"^/devstoreaccount1/media/images/\d{8}T\d{6}-[0-9a-f]{32}\.png$"))
        .and(header("x-ms-blob-type", "BlockBlob"))
        .and(header("x-ms-version", "2021-08-06"))
        .and(header("content-type", "image/png"))
        .and(header_exists("x-ms-date"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let connection = format!(
        "DefaultEndpointsProtocol=http;AccountName=devstoreaccount1;\
         AccountKey=Z2F0ZXdheS10ZXN0LWFjY291bnQta2V5;BlobEndpoint={}/devstoreaccount1;",
        mock_server.uri()
    );
    let config = StorageConfig::new(connection, "media", PUBLIC_BASE);
    let store = AzureBlobStore::from_config(&config).unwrap();
    let persister = ArtifactPersister::new(Arc::new(store), &config);

    let url = persister
        .persist(MediaArtifact::bytes(
            b"png".to_vec(),
            ArtifactCategory::Images,
            "png",
            "image/png",
        ))
        .await
        .unwrap()
        .expect("url");
    assert!(url.starts_with(&format!("{PUBLIC_BASE}/images/")));

    let requests = mock_server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(auth.starts_with("SharedKey devstoreaccount1:"));
    assert_eq!(auth, expected_shared_key(&requests[0], "devstoreaccount1"));
    assert_eq!(requests[0].body, b"png");
}

#[tokio::test]
async fn shared_key_signs_the_encoded_blob_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path_regex(r"^/devstoreaccount1/media/my%20media/images/.+\.png$"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let connection = format!(
        "AccountName=devstoreaccount1;AccountKey={EMULATOR_KEY};BlobEndpoint={}/devstoreaccount1",
        mock_server.uri()
    );
    let config = StorageConfig::new(connection, "media", PUBLIC_BASE).with_path_prefix("my media");
    let store = AzureBlobStore::from_config(&config).unwrap();
    let persister = ArtifactPersister::new(Arc::new(store), &config);

    let url = persister
        .persist(MediaArtifact::bytes(
            b"png".to_vec(),
            ArtifactCategory::Images,
            "png",
            "image/png",
        ))
        .await
        .unwrap();
    assert!(url.is_some());

    let requests = mock_server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(auth, expected_shared_key(&requests[0], "devstoreaccount1"));
}

#[tokio::test]
async fn close_runs_once_and_refuses_later_calls() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryArtifactStore::new());
    let service = service_with_store(direct_config(&mock_server), store.clone());

    service.close().await.unwrap();
    service.close().await.unwrap();
    assert!(service.is_closed());
    assert_eq!(store.close_calls(), 1);

    let err = service.chat_completion(ChatParams::new("hi")).await.unwrap_err();
    assert!(matches!(err, GatewayError::ServiceClosed));
    let err = service.generate_image(ImageParams::new("a fox")).await.unwrap_err();
    assert!(matches!(err, GatewayError::ServiceClosed));
    let err = service
        .synthesize_speech(SpeechParams::new("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::ServiceClosed));
    let err = service.generate_video(VideoParams::new("a boat")).await.unwrap_err();
    assert!(matches!(err, GatewayError::ServiceClosed));
}

#[tokio::test]
async fn azure_upload_with_sas_token_uses_query_pairs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path_regex(r"^/media/audio/.+\.mp3$"))
        .and(query_param("sv", "2021-08-06"))
        .and(query_param("sig", "abc/def="))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let connection = format!(
        "BlobEndpoint={};SharedAccessSignature=?sv=2021-08-06&sig=abc%2Fdef%3D",
        mock_server.uri()
    );
    let config = StorageConfig::new(connection, "media", PUBLIC_BASE);
    let store = AzureBlobStore::from_config(&config).unwrap();
    let persister = ArtifactPersister::new(Arc::new(store), &config);

    let url = persister
        .persist(MediaArtifact::bytes(
            b"mp3".to_vec(),
            ArtifactCategory::Audio,
            "mp3",
            "audio/mpeg",
        ))
        .await
        .unwrap();
    assert!(url.is_some());

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn azure_rejection_is_swallowed_into_absent_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_string("AuthenticationFailed"))
        .mount(&mock_server)
        .await;

    let connection = format!(
        "AccountName=devstoreaccount1;AccountKey=Z2F0ZXdheS10ZXN0LWFjY291bnQta2V5;BlobEndpoint={}",
        mock_server.uri()
    );
    let config = StorageConfig::new(connection, "media", PUBLIC_BASE);
    let store = AzureBlobStore::from_config(&config).unwrap();
    let persister = ArtifactPersister::new(Arc::new(store), &config);

    let url = persister
        .persist(MediaArtifact::bytes(
            b"x".to_vec(),
            ArtifactCategory::Videos,
            "mp4",
            "video/mp4",
        ))
        .await
        .unwrap();
    assert!(url.is_none());
}
