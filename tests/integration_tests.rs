//! Integration tests for the MANÉ portal core.
//!
//! These exercise the HTTP gateway and auth clients against a mocked
//! hosted backend, plus the flows that span modules: the public
//! registration scenario and the admin delete/export paths.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mane_portal::auth::{AuthProvider, SupabaseAuth};
use mane_portal::dashboard::{AdminDashboard, DeleteConfirmation, RecordKind};
use mane_portal::export::{EncoderSet, ExportFormat};
use mane_portal::forms::RegistrationForm;
use mane_portal::gateway::{DataAccessError, RemoteStore, SupabaseStore};
use mane_portal::session::SessionService;

// ==================== Test Helpers ====================

const ANON_KEY: &str = "test-anon-key";

fn store_for(server: &MockServer) -> SupabaseStore {
    SupabaseStore::new(&server.uri(), ANON_KEY)
}

fn registration_row(id: &str, name: &str, created_at: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "full_name": name,
        "email": format!("{}@x.com", id),
        "phone": "123",
        "country": "Canada",
        "service": "MANÉ Immigration",
        "message": "",
        "created_at": created_at,
    })
}

// ==================== Gateway Read Tests ====================

#[tokio::test]
async fn test_list_registrations_sends_auth_and_ordering() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/registrations"))
        .and(header("apikey", ANON_KEY))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            registration_row("r2", "Newest", "2024-02-01T00:00:00Z"),
            registration_row("r1", "Older", "2024-01-05T00:00:00Z"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = store_for(&server)
        .list_registrations()
        .await
        .expect("list");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].full_name, "Newest");
}

#[tokio::test]
async fn test_list_content_overrides_filters_by_section() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/content"))
        .and(query_param("section", "eq.immigration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "section": "immigration",
            "key": "hero_title",
            "englishText": "Fresh title",
            "frenchText": "Titre frais",
            "imageUrl": null,
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = store_for(&server)
        .list_content_overrides("immigration")
        .await
        .expect("list");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].english_text, "Fresh title");
}

#[tokio::test]
async fn test_remote_error_propagates_unmodified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/registrations"))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .list_registrations()
        .await
        .expect_err("should fail");

    match err {
        DataAccessError::Remote { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "permission denied");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// ==================== Gateway Mutation Tests ====================

#[tokio::test]
async fn test_update_targets_single_row_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/messages"))
        .and(query_param("id", "eq.m1"))
        .and(body_json(serde_json::json!({ "subject": "Edited" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let patch = mane_portal::models::MessagePatch {
        subject: Some("Edited".to_string()),
        ..Default::default()
    };
    store_for(&server)
        .update_message("m1", &patch)
        .await
        .expect("update");
}

#[tokio::test]
async fn test_delete_targets_single_row_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.u1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).delete_user("u1").await.expect("delete");
}

// ==================== Registration Scenario ====================

#[tokio::test]
async fn test_registration_submit_end_to_end() {
    let server = MockServer::start().await;

    // The insert payload must arrive trimmed with a lowercased email.
    Mock::given(method("POST"))
        .and(path("/rest/v1/registrations"))
        .and(header("apikey", ANON_KEY))
        .and(body_json(serde_json::json!({
            "full_name": "A B",
            "email": "a@b.com",
            "phone": "555",
            "country": "France",
            "service": "Mane Innovation",
            "message": "",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let mut form = RegistrationForm {
        full_name: " A B ".to_string(),
        email: "A@B.COM".to_string(),
        phone: "555".to_string(),
        country: "France".to_string(),
        service: "Mane Innovation".to_string(),
        message: String::new(),
    };

    form.submit(&store).await.expect("submit");

    // Reset to empty values with the service preserved.
    assert!(form.full_name.is_empty());
    assert!(form.email.is_empty());
    assert_eq!(form.service, "Mane Innovation");
}

// ==================== Auth Tests ====================

#[tokio::test]
async fn test_sign_in_success_yields_admin_identity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", ANON_KEY))
        .and(body_json(serde_json::json!({
            "email": "owner@mane.example",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "jwt-token",
            "user": {
                "id": "u1",
                "email": "owner@mane.example",
                "user_metadata": { "full_name": "Site Owner" },
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = SupabaseAuth::new(&server.uri(), ANON_KEY);
    let identity = auth
        .sign_in("owner@mane.example", "hunter2")
        .await
        .expect("sign in");

    assert_eq!(identity.email, "owner@mane.example");
    assert_eq!(identity.role, "admin");
    assert_eq!(identity.full_name.as_deref(), Some("Site Owner"));
}

#[tokio::test]
async fn test_sign_in_failure_surfaces_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error_description": "Invalid login credentials",
        })))
        .mount(&server)
        .await;

    let auth: Arc<dyn AuthProvider> = Arc::new(SupabaseAuth::new(&server.uri(), ANON_KEY));
    let session = SessionService::new(auth);
    session.initialize().await;

    let err = session
        .sign_in("owner@mane.example", "wrong")
        .await
        .expect_err("should fail");
    assert_eq!(err, "Invalid login credentials");
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn test_session_restored_from_existing_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "jwt-token",
            "user": { "id": "u1", "email": "owner@mane.example" },
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("Authorization", "Bearer jwt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u1",
            "email": "owner@mane.example",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = SupabaseAuth::new(&server.uri(), ANON_KEY);
    auth.sign_in("owner@mane.example", "hunter2")
        .await
        .expect("sign in");

    let restored = auth.get_session().await.expect("session");
    assert_eq!(restored.map(|u| u.email), Some("owner@mane.example".to_string()));
}

// ==================== Admin Flow Tests ====================

#[tokio::test]
async fn test_confirmed_delete_hits_store_once_and_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/registrations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            registration_row("r1", "Jane Doe", "2024-01-05T00:00:00Z"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/registrations"))
        .and(query_param("id", "eq.r1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(store_for(&server));
    let mut dash = AdminDashboard::new(store, EncoderSet::new(), std::env::temp_dir());
    dash.refresh_all().await;
    assert_eq!(dash.registrations().len(), 1);

    // Request alone must not delete anything.
    dash.request_delete(RecordKind::Registration, "r1");
    assert!(matches!(
        dash.delete_confirmation(),
        DeleteConfirmation::Pending { .. }
    ));

    dash.confirm_delete().await.expect("delete");
    assert_eq!(dash.delete_confirmation(), &DeleteConfirmation::Idle);
}

#[tokio::test]
async fn test_export_from_remote_rows() {
    let server = MockServer::start().await;
    let export_dir = TempDir::new().expect("temp dir");

    Mock::given(method("GET"))
        .and(path("/rest/v1/registrations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            registration_row("r1", "Jane Doe", "2024-01-05T00:00:00Z"),
        ])))
        .mount(&server)
        .await;

    let store = Arc::new(store_for(&server));
    let mut dash = AdminDashboard::new(
        store,
        EncoderSet::new(),
        PathBuf::from(export_dir.path()),
    );
    dash.refresh_registrations().await;

    let written = dash.export(ExportFormat::Csv).expect("export");
    let text = std::fs::read_to_string(&written).expect("read");

    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Name,Email,Phone,Country,Service,Message,Date")
    );
    assert_eq!(
        lines.next(),
        Some("Jane Doe,r1@x.com,123,Canada,MANÉ Immigration,,1/5/2024")
    );
}
