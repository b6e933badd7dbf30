#![allow(clippy::unwrap_used)]
// Integration tests for `HrClient` using wiremock.

use bytes::Bytes;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hrdesk_api::models::{DepartmentRequest, DocumentKind, LeadStatus};
use hrdesk_api::{Attachment, AttachmentField, AuthContext, Error, HrClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HrClient) {
    let server = MockServer::start().await;
    let auth = AuthContext::new("tkn-123".to_string().into(), "c1").with_employee("e-self");
    let client = HrClient::new(
        &server.uri(),
        &format!("{}/attendance-svc", server.uri()),
        &auth,
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

// ── Organization ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_departments_sends_bearer_and_unwraps_data() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/departments/company/c1"))
        .and(header("authorization", "Bearer tkn-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "departmentId": "d1", "name": "Engineering" },
                { "departmentId": "d2", "name": "Finance", "isActive": false }
            ],
            "message": "Departments fetched"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let departments = client.list_departments().await.unwrap();

    assert_eq!(departments.len(), 2);
    assert_eq!(departments[0].department_id, "d1");
    assert_eq!(departments[1].is_active, Some(false));
}

#[tokio::test]
async fn test_create_department_posts_json() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/departments"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "Legal", "companyId": "c1" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "departmentId": "d9", "name": "Legal" })),
        )
        .mount(&server)
        .await;

    let created = client
        .create_department(&DepartmentRequest {
            name: "Legal".into(),
            description: None,
            company_id: "c1".into(),
            head_employee_id: None,
        })
        .await
        .unwrap();

    assert_eq!(created.department_id, "d9");
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_validation_message_is_extracted() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/departments/d1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": [{ "msg": "Department still has employees" }]
        })))
        .mount(&server)
        .await;

    let err = client.delete_department("d1").await.unwrap_err();

    assert!(matches!(err, Error::Http { status: 422, .. }));
    assert_eq!(err.to_string(), "Department still has employees");
}

#[tokio::test]
async fn test_status_without_body_uses_generic_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/assets/asset/a1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.get_asset("a1").await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status code 500");
}

#[tokio::test]
async fn test_unauthorized_maps_to_dedicated_variant() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/leads/company/c1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })))
        .mount(&server)
        .await;

    let err = client.list_leads().await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized { ref message } if message == "jwt expired"));
}

#[tokio::test]
async fn test_preview_not_found_is_detectable() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/document-settings/company/c1/invoice/preview"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client
        .preview_document_number(DocumentKind::Invoice)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let auth = AuthContext::new("tkn".to_string().into(), "c1");
    let client = HrClient::new(&uri, &uri, &auth, &TransportConfig::default()).unwrap();

    let err = client.list_tags().await.unwrap_err();
    assert!(err.is_network(), "expected network error, got {err:?}");
}

// ── CRM ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_lead_status_patches() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/leads/l1/status"))
        .and(body_json(json!({ "status": "QUALIFIED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "leadId": "l1", "name": "Acme", "status": "QUALIFIED"
        })))
        .mount(&server)
        .await;

    let lead = client
        .update_lead_status("l1", LeadStatus::Qualified)
        .await
        .unwrap();
    assert_eq!(lead.status, LeadStatus::Qualified);
}

// ── Employees ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_employee_sends_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/employees"))
        .and(body_string_contains("name=\"employeeData\""))
        .and(body_string_contains("name=\"profileImage\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "employeeId": "E100", "firstName": "Asha"
        })))
        .mount(&server)
        .await;

    let photo = Attachment::new(
        AttachmentField::ProfileImage,
        "asha.png",
        None,
        Bytes::from_static(b"png-bytes"),
    )
    .unwrap();

    let employee = client
        .create_employee(&json!({ "firstName": "Asha" }), vec![photo])
        .await
        .unwrap();
    assert_eq!(employee.employee_id, "E100");
}

#[tokio::test]
async fn test_check_email_passes_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employees/check-email"))
        .and(query_param("email", "asha@example.com"))
        .and(query_param("companyId", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "available": false })))
        .mount(&server)
        .await;

    let availability = client
        .check_email_available("asha@example.com")
        .await
        .unwrap();
    assert!(!availability.available);
}

// ── Attendance ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_attendance_uses_separate_base_url() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/attendance-svc/attendance/company/c1/summary"))
        .and(query_param("date", "2026-10-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "date": "2026-10-01", "present": 40, "absent": 3, "onLeave": 2, "late": 5
        })))
        .mount(&server)
        .await;

    let summary = client
        .attendance_summary(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap())
        .await
        .unwrap();
    assert_eq!(summary.present, 40);
    assert_eq!(summary.on_leave, 2);
}
