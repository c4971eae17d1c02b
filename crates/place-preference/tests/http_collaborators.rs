use std::time::Duration;

use chrono::{TimeZone, Utc};
use place_preference::workflows::preference::store::EmployeeRecordStore;
use place_preference::workflows::preference::submission::DEFAULT_FAILURE_MESSAGE;
use place_preference::workflows::preference::{
    DirectoryError, EmployeeDirectory, EmployeeId, FixtureDirectory, HttpEmployeeDirectory,
    HttpSubmissionClient, OptionSetId, Section, SubmissionError, SubmissionGateway,
    SubmissionPayload,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn marketing_payload() -> SubmissionPayload {
    let directory = FixtureDirectory::standard();
    let mut store = EmployeeRecordStore::new();
    store
        .load(&directory, &EmployeeId("E002".to_string()))
        .await
        .expect("fixture employee loads");
    store
        .choose_option_set(Section::Domestic, OptionSetId::Option1)
        .expect("domestic option");
    store
        .choose_option_set(Section::Foreign, OptionSetId::Option2)
        .expect("foreign option");

    let submitted_at = Utc
        .with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp");
    SubmissionPayload::build_at(store.active().expect("record loaded"), submitted_at)
        .expect("selection complete")
}

#[tokio::test]
async fn submission_client_posts_wire_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit-to-sheets"))
        .and(body_partial_json(json!({
            "userId": "E002",
            "department": "Marketing",
            "section1_option": "option1",
            "section2_place3": "Singapore",
            "timestamp": "2025-03-14T09:30:00.000Z",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpSubmissionClient::new(format!("{}/api/submit-to-sheets", server.uri()), TIMEOUT)
        .expect("client builds");
    client
        .submit(&marketing_payload().await)
        .await
        .expect("submission accepted");
}

#[tokio::test]
async fn submission_client_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Quota exceeded" })),
        )
        .mount(&server)
        .await;

    let client = HttpSubmissionClient::new(format!("{}/api/submit-to-sheets", server.uri()), TIMEOUT)
        .expect("client builds");
    let err = client
        .submit(&marketing_payload().await)
        .await
        .expect_err("server rejects");

    match err {
        SubmissionError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Quota exceeded");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn submission_client_falls_back_to_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = HttpSubmissionClient::new(format!("{}/api/submit-to-sheets", server.uri()), TIMEOUT)
        .expect("client builds");
    let err = client
        .submit(&marketing_payload().await)
        .await
        .expect_err("server rejects");

    assert_eq!(err.to_string(), DEFAULT_FAILURE_MESSAGE);
}

#[tokio::test]
async fn submission_client_defaults_message_for_bare_404() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = HttpSubmissionClient::new(format!("{}/api/submit-to-sheets", server.uri()), TIMEOUT)
        .expect("client builds");
    let err = client
        .submit(&marketing_payload().await)
        .await
        .expect_err("endpoint missing");

    match err {
        SubmissionError::Rejected { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, DEFAULT_FAILURE_MESSAGE);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn submission_client_reports_unreachable_endpoint() {
    let endpoint = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        format!("http://{addr}/api/submit-to-sheets")
    };

    let client = HttpSubmissionClient::new(endpoint, TIMEOUT).expect("client builds");
    let err = client
        .submit(&marketing_payload().await)
        .await
        .expect_err("nothing listening");
    assert!(
        matches!(err, SubmissionError::Transport(_)),
        "expected transport failure, got {err:?}"
    );
}

#[tokio::test]
async fn http_directory_maps_backend_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/employee"))
        .and(query_param("emp_id", "E042"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "EmpID": "E042",
            "Name": "Asha Rao",
            "Department": "Technical",
        })))
        .mount(&server)
        .await;

    let directory = HttpEmployeeDirectory::new(format!("{}/", server.uri()), TIMEOUT)
        .expect("directory builds");
    let profile = directory
        .fetch_employee(&EmployeeId("E042".to_string()))
        .await
        .expect("employee found");

    assert_eq!(profile.id.as_str(), "E042");
    assert_eq!(profile.name, "Asha Rao");
    assert_eq!(profile.department, "Technical");
}

#[tokio::test]
async fn http_directory_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/employee"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let directory = HttpEmployeeDirectory::new(server.uri(), TIMEOUT).expect("directory builds");
    let err = directory
        .fetch_employee(&EmployeeId("E999".to_string()))
        .await
        .expect_err("employee missing");
    assert!(matches!(err, DirectoryError::NotFound(id) if id.as_str() == "E999"));
}

#[tokio::test]
async fn http_directory_reports_server_errors_as_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let directory = HttpEmployeeDirectory::new(server.uri(), TIMEOUT).expect("directory builds");
    let err = directory
        .fetch_employee(&EmployeeId("E001".to_string()))
        .await
        .expect_err("backend failing");
    assert!(matches!(err, DirectoryError::Unavailable(_)));
}
