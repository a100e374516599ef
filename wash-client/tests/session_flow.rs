//! Admin/app session and REST client integration tests

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod mock_backend;

use mock_backend::{DEV_OTP, MockBackend, PARTNER_EMAIL, PASSWORD, ROOT_EMAIL};
use shared::models::{BranchCreate, BranchStatus};
use wash_client::token_store::{ADMIN_TOKEN_KEY, APP_TOKEN_KEY};
use wash_client::{
    AdminSession, AppSession, ClientConfig, ErrorCategory, FileTokenStore, HttpClient,
    MemoryTokenStore, NetworkHttpClient, TokenStore,
};

fn client(backend: &MockBackend) -> NetworkHttpClient {
    NetworkHttpClient::new(&backend.url()).unwrap()
}

#[tokio::test]
async fn test_login_persists_token_and_profile() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path(), "tokens.json");

    let mut session = AdminSession::new(client(&backend), store);
    let profile = session.login(ROOT_EMAIL, PASSWORD).await.unwrap();
    assert!(profile.is_super_admin());
    assert!(session.is_authenticated());
    assert!(session.require_super_admin().is_ok());

    let reopened = FileTokenStore::new(dir.path(), "tokens.json");
    assert_eq!(
        reopened.load(ADMIN_TOKEN_KEY).as_deref(),
        Some("jwt-root@wash.uz")
    );

    let me = session.api().me().await.unwrap();
    assert_eq!(me.email, ROOT_EMAIL);

    backend.stop().await;
}

#[tokio::test]
async fn test_wrong_password_shows_server_message() {
    let backend = MockBackend::start().await;
    let mut session = AdminSession::new(client(&backend), MemoryTokenStore::new());

    let err = session.login(ROOT_EMAIL, "nope").await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Unauthorized);
    assert_eq!(err.user_message(), "Invalid email or password");
    assert!(!session.is_authenticated());
    assert!(session.client().token().is_none());

    backend.stop().await;
}

#[tokio::test]
async fn test_restore_with_valid_token() {
    let backend = MockBackend::start().await;
    backend.issue_token("stored").await;
    let store = MemoryTokenStore::with_token(ADMIN_TOKEN_KEY, "stored");

    let mut session = AdminSession::new(client(&backend), store);
    let profile = session.restore().await.unwrap().cloned();
    assert_eq!(profile.unwrap().email, ROOT_EMAIL);
    assert_eq!(session.client().token().as_deref(), Some("stored"));

    backend.stop().await;
}

#[tokio::test]
async fn test_restore_with_expired_token_signs_out() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path(), "tokens.json");
    store.save(ADMIN_TOKEN_KEY, "expired").unwrap();

    let mut session = AdminSession::new(client(&backend), store);
    assert!(session.restore().await.unwrap().is_none());
    assert!(!session.is_authenticated());
    assert!(session.client().token().is_none());

    let reopened = FileTokenStore::new(dir.path(), "tokens.json");
    assert!(reopened.load(ADMIN_TOKEN_KEY).is_none());

    backend.stop().await;
}

#[tokio::test]
async fn test_partner_admin_is_gated() {
    let backend = MockBackend::start().await;
    let mut session = AdminSession::new(client(&backend), MemoryTokenStore::new());
    session.login(PARTNER_EMAIL, PASSWORD).await.unwrap();

    assert_eq!(session.profile().unwrap().org_id(), Some("org-1"));
    let err = session.require_super_admin().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Forbidden);

    backend.stop().await;
}

#[tokio::test]
async fn test_revoked_token_during_use_signs_out() {
    let backend = MockBackend::start().await;
    let mut session = AdminSession::new(client(&backend), MemoryTokenStore::new());
    session.login(ROOT_EMAIL, PASSWORD).await.unwrap();

    backend.revoke_all().await;
    let err = session.api().branches(None).await.unwrap_err();
    assert!(err.is_session_expired());

    session.handle_error(&err).unwrap();
    assert!(!session.is_authenticated());
    assert!(session.require_auth().is_err());

    backend.stop().await;
}

#[tokio::test]
async fn test_branch_create_list_delete() {
    let backend = MockBackend::start().await;
    let mut session = AdminSession::new(client(&backend), MemoryTokenStore::new());
    session.login(ROOT_EMAIL, PASSWORD).await.unwrap();
    let api = session.api();

    let created = api
        .create_branch(&BranchCreate {
            org_id: "org-1".into(),
            name: "Chilonzor".into(),
            address: "Chilonzor 7".into(),
            phone: "+998901234567".into(),
            status: BranchStatus::Open,
            partner_type: None,
            box_count: Some(4),
        })
        .await
        .unwrap();
    assert_eq!(created.id, "br-1");
    assert_eq!(created.box_count, Some(4));

    assert_eq!(api.branches(Some("org-1")).await.unwrap().len(), 1);
    assert!(api.branches(Some("org-2")).await.unwrap().is_empty());

    api.delete_branch(&created.id).await.unwrap();
    assert!(api.branches(None).await.unwrap().is_empty());

    let err = api.delete_branch("br-404").await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);

    backend.stop().await;
}

#[tokio::test]
async fn test_validation_error_message() {
    let backend = MockBackend::start().await;
    let mut session = AdminSession::new(client(&backend), MemoryTokenStore::new());
    session.login(ROOT_EMAIL, PASSWORD).await.unwrap();

    let err = session
        .api()
        .create_branch(&BranchCreate {
            org_id: String::new(),
            name: "Nowhere".into(),
            address: String::new(),
            phone: String::new(),
            status: BranchStatus::Open,
            partner_type: None,
            box_count: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(err.user_message(), "orgId is required");

    backend.stop().await;
}

#[tokio::test]
async fn test_upload_returns_absolute_url() {
    let backend = MockBackend::start().await;
    let mut session = AdminSession::new(client(&backend), MemoryTokenStore::new());
    session.login(ROOT_EMAIL, PASSWORD).await.unwrap();

    let url = session
        .api()
        .upload_file("logo.png", b"\x89PNG".to_vec())
        .await
        .unwrap();
    assert_eq!(url, format!("{}/uploads/logo.png", backend.url()));

    let uploads = backend.state().read().await.uploads.clone();
    assert_eq!(uploads.len(), 1);
    let body = String::from_utf8_lossy(&uploads[0]);
    assert!(body.contains("filename=\"logo.png\""));

    backend.stop().await;
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = ClientConfig::new(url).with_timeout(2);
    let http = config.build_http_client().unwrap();
    let mut session = AdminSession::new(http, MemoryTokenStore::new());

    let err = session.login(ROOT_EMAIL, PASSWORD).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Network);
    assert!(err.user_message().contains("docker compose up -d"));
}

#[tokio::test]
async fn test_app_otp_login_and_restore() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();

    let mut session = AppSession::new(
        client(&backend),
        FileTokenStore::new(dir.path(), "tokens.json"),
    );
    let dev_otp = session.request_otp("+998901112233").await.unwrap();
    assert_eq!(dev_otp.as_deref(), Some(DEV_OTP));

    let err = session.verify_otp("+998901112233", "0000").await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid OTP");
    assert!(!session.is_authenticated());

    assert!(session.verify_otp("+998901112233", DEV_OTP).await.unwrap());
    assert!(session.is_authenticated());

    let mut restored = AppSession::new(
        client(&backend),
        FileTokenStore::new(dir.path(), "tokens.json"),
    );
    assert!(restored.restore().await.unwrap());
    assert_eq!(restored.user().unwrap().phone, "+998901112233");

    restored.logout().unwrap();
    let store = FileTokenStore::new(dir.path(), "tokens.json");
    assert!(store.load(APP_TOKEN_KEY).is_none());

    backend.stop().await;
}
