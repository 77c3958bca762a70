//! Integration tests for the federated-identity backend against a mock
//! secret service.

use serde_json::json;
use strongroom::vault::{FederatedVault, Vault};
use strongroom::VaultError;
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KV_BASE: &str = "/resource-secret-management/v1.0.0/secret/kv";

async fn vault_for(server: &MockServer) -> FederatedVault {
    FederatedVault::from_base_url(&server.uri(), "client-id", "client-secret").unwrap()
}

#[tokio::test]
async fn read_returns_stored_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/user/2/token", KV_BASE)))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": "s3cret" })))
        .mount(&server)
        .await;

    let vault = vault_for(&server).await;
    let value = vault.read_secret("user/2/token").await.unwrap().unwrap();
    assert_eq!(value.expose_secret(), "s3cret");
}

#[tokio::test]
async fn key_does_not_exist_maps_to_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/missing", KV_BASE)))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "code": "KEY_DOES_NOT_EXIST" })),
        )
        .mount(&server)
        .await;

    let vault = vault_for(&server).await;
    assert!(vault.read_secret("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn server_error_propagates_as_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/broken", KV_BASE)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let vault = vault_for(&server).await;
    let err = vault.read_secret("broken").await.unwrap_err();
    assert!(matches!(err, VaultError::Backend { .. }));
}

#[tokio::test]
async fn write_puts_json_payload() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{}/service/api_key", KV_BASE)))
        .and(body_json(json!({ "value": "new-secret" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let vault = vault_for(&server).await;
    vault.write_secret("service/api_key", "new-secret").await.unwrap();
}

#[tokio::test]
async fn failed_write_is_a_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{}/denied", KV_BASE)))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let vault = vault_for(&server).await;
    let err = vault.write_secret("denied", "v").await.unwrap_err();
    assert!(matches!(err, VaultError::Backend { .. }));
}
