#![allow(clippy::unwrap_used)]
// End-to-end tests: `Console` operations against a wiremock backend,
// asserting both the typed result and the slice each one drives.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_stream::StreamExt;
use url::Url;
use wiremock::matchers::{body_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hrdesk_core::{
    AuthContext, Console, ConsoleConfig, CoreError, DepartmentRequest, DocumentKind,
    EmployeeDraft, Field, FormIdSource,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup_with(notes_local_fallback: bool) -> (MockServer, Console) {
    let server = MockServer::start().await;
    let api_url = Url::parse(&server.uri()).unwrap();
    let attendance_url = Url::parse(&format!("{}/attendance-svc", server.uri())).unwrap();
    let auth = AuthContext::new("tkn-123".to_string().into(), "c1").with_employee("e-self");

    let mut config = ConsoleConfig::new(api_url, attendance_url, auth);
    config.notes_local_fallback = notes_local_fallback;
    (server, Console::new(config).unwrap())
}

async fn setup() -> (MockServer, Console) {
    setup_with(false).await
}

fn department_body(name: &str) -> DepartmentRequest {
    DepartmentRequest {
        name: name.into(),
        description: None,
        company_id: "c1".into(),
        head_employee_id: None,
    }
}

// ── Departments ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_departments_fills_slice() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/departments/company/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "departmentId": "d1", "name": "Engineering" },
                { "departmentId": "d2", "name": "Finance" }
            ]
        })))
        .mount(&server)
        .await;

    let departments = console.fetch_departments().await.unwrap();
    assert_eq!(departments.len(), 2);

    let state = console.store().departments.snapshot();
    assert_eq!(state.len(), 2);
    assert!(!state.lifecycle.loading);
    assert!(state.lifecycle.success);
    assert_eq!(state.lifecycle.error, None);
}

#[tokio::test]
async fn test_unreachable_server_sets_network_fallback() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let url = Url::parse(&uri).unwrap();
    let auth = AuthContext::new("tkn-123".to_string().into(), "c1");
    let console = Console::new(ConsoleConfig::new(url.clone(), url, auth)).unwrap();

    let err = console.fetch_departments().await.unwrap_err();
    assert!(matches!(err, CoreError::Network { .. }), "{err:?}");

    let state = console.store().departments.snapshot();
    assert!(!state.lifecycle.loading);
    assert_eq!(
        state.lifecycle.error.as_deref(),
        Some("Network error: unable to reach the server")
    );
}

#[tokio::test]
async fn test_slice_stream_yields_fetched_state() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/departments/company/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "departmentId": "d1", "name": "Engineering" }
        ])))
        .mount(&server)
        .await;

    let mut updates = console.store().departments.subscribe().into_stream();
    let initial = updates.next().await.unwrap();
    assert!(initial.is_empty());
    assert!(!initial.lifecycle.success);

    console.fetch_departments().await.unwrap();

    let latest = updates.next().await.unwrap();
    assert_eq!(latest.len(), 1);
    assert!(latest.lifecycle.success);
}

#[tokio::test]
async fn test_department_create_update_delete_keep_slice_in_step() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/departments"))
        .and(body_json(json!({ "name": "Legal", "companyId": "c1" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "departmentId": "d9", "name": "Legal" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/departments/d9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "departmentId": "d9", "name": "Legal & Compliance" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/departments/d9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    console
        .create_department(&department_body("Legal"))
        .await
        .unwrap();
    let state = console.store().departments.snapshot();
    assert_eq!(state.items[0].name, "Legal");
    assert_eq!(state.lifecycle.message.as_deref(), Some("Department created"));

    console
        .update_department("d9", &department_body("Legal & Compliance"))
        .await
        .unwrap();
    let state = console.store().departments.snapshot();
    assert_eq!(state.len(), 1);
    assert_eq!(state.items[0].name, "Legal & Compliance");
    assert_eq!(state.lifecycle.message.as_deref(), Some("Department updated"));

    console.delete_department("d9").await.unwrap();
    let state = console.store().departments.snapshot();
    assert!(state.is_empty());
    assert_eq!(state.lifecycle.message.as_deref(), Some("Department deleted"));
}

#[tokio::test]
async fn test_server_message_lands_in_slice_error() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/departments"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Department name already exists"
        })))
        .mount(&server)
        .await;

    let err = console
        .create_department(&department_body("Engineering"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    let state = console.store().departments.snapshot();
    assert!(!state.lifecycle.loading);
    assert!(!state.lifecycle.success);
    assert_eq!(
        state.lifecycle.error.as_deref(),
        Some("Department name already exists")
    );
}

#[tokio::test]
async fn test_status_only_failure_uses_generic_message() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/departments/company/c1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    console.fetch_departments().await.unwrap_err();

    let state = console.store().departments.snapshot();
    assert_eq!(
        state.lifecycle.error.as_deref(),
        Some("Request failed with status code 500")
    );
}

// ── Document numbering ──────────────────────────────────────────────

#[tokio::test]
async fn test_preview_initializes_missing_series_and_retries_once() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/document-settings/company/c1/invoice/preview"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not set up" })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/document-settings/company/c1/invoice/default"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "kind": "invoice", "prefix": "INV-", "nextNumber": 1, "padding": 4
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/document-settings/company/c1/invoice/preview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "invoice", "documentNumber": "INV-0001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let preview = console
        .preview_document_number(DocumentKind::Invoice)
        .await
        .unwrap();

    assert_eq!(preview.document_number, "INV-0001");
    let state = console.store().document_previews.snapshot();
    assert_eq!(state.items, vec![preview]);
}

#[tokio::test]
async fn test_preview_gives_up_after_single_retry() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/document-settings/company/c1/quotation/preview"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/document-settings/company/c1/quotation/default"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "kind": "quotation", "prefix": "QT-", "nextNumber": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = console
        .preview_document_number(DocumentKind::Quotation)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

// ── Notes and the 405 policy ────────────────────────────────────────

#[tokio::test]
async fn test_notes_405_is_feature_unavailable_by_default() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/leads/l1/notes"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let err = console.create_note("l1", "Call back Monday").await.unwrap_err();

    assert!(matches!(err, CoreError::FeatureUnavailable { .. }));
    let state = console.store().notes.snapshot();
    assert!(state.children("l1").is_empty());
    assert_eq!(
        state.lifecycle.error.as_deref(),
        Some("Lead notes are not available on this server")
    );
}

#[tokio::test]
async fn test_notes_405_applies_locally_when_configured() {
    let (server, console) = setup_with(true).await;

    Mock::given(method("POST"))
        .and(path("/leads/l1/notes"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/leads/l1/notes/local-\d+-\d+$"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let note = console.create_note("l1", "Call back Monday").await.unwrap();
    assert!(note.note_id.starts_with("local-"));
    assert_eq!(note.created_by.as_deref(), Some("e-self"));

    let updated = console
        .update_note("l1", &note.note_id, "Call back Tuesday")
        .await
        .unwrap();
    assert_eq!(updated.note_id, note.note_id);

    let state = console.store().notes.snapshot();
    assert_eq!(state.children("l1").len(), 1);
    assert_eq!(state.children("l1")[0].content, "Call back Tuesday");
    assert!(state.lifecycle.success);
}

#[tokio::test]
async fn test_local_notes_created_back_to_back_stay_distinct() {
    let (server, console) = setup_with(true).await;

    Mock::given(method("POST"))
        .and(path("/leads/l1/notes"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let first = console.create_note("l1", "Sent proposal").await.unwrap();
    let second = console.create_note("l1", "Asked for a discount").await.unwrap();
    assert_ne!(first.note_id, second.note_id);

    let state = console.store().notes.snapshot();
    let contents: Vec<_> = state.children("l1").iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, ["Sent proposal", "Asked for a discount"]);
}

#[tokio::test]
async fn test_notes_fetch_from_server_when_supported() {
    let (server, console) = setup_with(true).await;

    Mock::given(method("GET"))
        .and(path("/leads/l1/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "noteId": "n1", "leadId": "l1", "content": "Intro call done" }
        ])))
        .mount(&server)
        .await;

    let notes = console.fetch_notes("l1").await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(console.store().notes.snapshot().children("l1")[0].note_id, "n1");
}

// ── Onboarding ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_draft_never_reaches_server() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let draft = EmployeeDraft::default().with(Field::FirstName, "Asha");
    let err = console.onboard_employee(draft).await.unwrap_err();

    assert!(matches!(err, CoreError::ValidationFailed { .. }));
    let state = console.store().employees.snapshot();
    assert!(!state.lifecycle.loading);
    assert!(state.lifecycle.error.is_some());
}

#[tokio::test]
async fn test_invalid_update_is_recorded_on_employee_slice() {
    let (server, console) = setup().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let draft = EmployeeDraft::default().with(Field::Phone, "12345");
    let err = console.update_employee("e1", draft).await.unwrap_err();

    assert!(matches!(err, CoreError::ValidationFailed { .. }));
    let state = console.store().employees.snapshot();
    assert!(!state.lifecycle.loading);
    assert!(!state.lifecycle.success);
    let error = state.lifecycle.error.as_deref().unwrap();
    assert!(error.contains("phone"), "{error}");
}

// ── Forms ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_forms_canonicalizes_every_shape() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/forms/company/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "formId": "F-1", "title": "Exit interview" },
                { "_id": "65ab", "title": "Feedback", "fields": [{ "label": "Your Rating" }] },
                { "title": "Draft survey" }
            ]
        })))
        .mount(&server)
        .await;

    let forms = console.fetch_forms().await.unwrap();

    assert_eq!(forms[0].form_id, "F-1");
    assert_eq!(forms[1].form_id, "65ab");
    assert_eq!(forms[1].fields[0].field_name, "your_rating");
    assert_eq!(forms[2].id_source, FormIdSource::Generated);
    assert!(forms[2].form_id.starts_with("FORM-"));
    assert_eq!(console.store().forms.snapshot().len(), 3);
}

#[tokio::test]
async fn test_forms_without_backend_ids_are_deleted_one_at_a_time() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/forms/company/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "title": "Draft survey" },
            { "title": "Draft feedback" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/forms/FORM-\d+-0$"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let forms = console.fetch_forms().await.unwrap();
    assert_ne!(forms[0].form_id, forms[1].form_id);

    console.delete_form(&forms[0].form_id).await.unwrap();

    let state = console.store().forms.snapshot();
    assert_eq!(state.len(), 1);
    assert_eq!(state.items[0].title, "Draft feedback");
}

#[tokio::test]
async fn test_submit_form_keeps_list_and_sets_message() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/forms/F-1/submissions"))
        .and(body_json(json!({ "rating": "5" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    console
        .submit_form("F-1", &json!({ "rating": "5" }))
        .await
        .unwrap();

    let state = console.store().forms.snapshot();
    assert!(state.is_empty());
    assert_eq!(state.lifecycle.message.as_deref(), Some("Form submitted"));
}

// ── Attendance and payroll ──────────────────────────────────────────

#[tokio::test]
async fn test_attendance_defaults_to_own_employee() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/attendance-svc/attendance/employee/e-self"))
        .and(query_param("from", "2026-10-01"))
        .and(query_param("to", "2026-10-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "attendanceId": "a1", "employeeId": "e-self", "date": "2026-10-01" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let from = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let records = console.fetch_attendance(None, from, to).await.unwrap();

    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_reversed_attendance_range_is_rejected_locally() {
    let (_server, console) = setup().await;

    let from = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
    let err = console.fetch_attendance(None, from, to).await.unwrap_err();

    assert!(matches!(err, CoreError::ValidationFailed { .. }));
}

#[tokio::test]
async fn test_payroll_rejects_month_out_of_range() {
    let (_server, console) = setup().await;

    let err = console.fetch_payroll(13, 2026).await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));
}

// ── Dashboard ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_dashboard_combines_four_reads() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employees/company/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "employeeId": "e1", "firstName": "Asha", "status": "active" },
            { "employeeId": "e2", "firstName": "Ravi", "status": "inactive" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/departments/company/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "departmentId": "d1", "name": "Engineering" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/leads/company/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "leadId": "l1", "name": "Acme", "status": "WON" },
            { "leadId": "l2", "name": "Globex", "status": "CONTACTED" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/attendance-svc/attendance/company/c1/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "date": "2026-10-18", "present": 1, "absent": 1
        })))
        .mount(&server)
        .await;

    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let summary = console.fetch_dashboard(date).await.unwrap();

    assert_eq!(summary.employees, 2);
    assert_eq!(summary.active_employees, 1);
    assert_eq!(summary.departments, 1);
    assert_eq!((summary.open_leads, summary.won_leads), (1, 1));
    assert_eq!(summary.attendance.present, 1);
    assert_eq!(console.store().dashboard.snapshot().value, Some(summary));
}
