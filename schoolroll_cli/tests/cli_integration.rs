use std::process::{Command, Output};

use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runs the binary off the async runtime so the mock server keeps serving.
async fn schoolroll(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_schoolroll"))
            .args(&args)
            .env_remove("SCHOOLROLL_API_URL")
            .env_remove("SCHOOLROLL_TIMEOUT_SECS")
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

fn api_args(server: &MockServer, rest: &[&str]) -> Vec<String> {
    let mut args = vec!["--api-url".to_string(), format!("{}/api", server.uri())];
    args.extend(rest.iter().map(|s| s.to_string()));
    args
}

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../schoolroll_api/tests/fixtures/{}", name)).unwrap()
}

#[test]
fn help_lists_subcommands() {
    let output = Command::new(env!("CARGO_BIN_EXE_schoolroll"))
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["classes", "teachers", "students", "analytics"] {
        assert!(stdout.contains(name), "help should mention {}", name);
    }
}

#[test]
fn bad_page_limit_is_rejected_by_parser() {
    let output = Command::new(env!("CARGO_BIN_EXE_schoolroll"))
        .args(["classes", "list", "--limit", "20"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("10, 25, 50"));
}

#[tokio::test(flavor = "multi_thread")]
async fn classes_list_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/classes"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "25"))
        .and(query_param("sortBy", "-year"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("classes.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = schoolroll(api_args(
        &mock_server,
        &["--output", "json", "classes", "list", "--limit", "25", "--sort", "-year"],
    ))
    .await;
    assert!(output.status.success());

    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["_id"], "c101");
    assert_eq!(rows[0]["teacher"], "t201");
}

#[tokio::test(flavor = "multi_thread")]
async fn students_list_csv_shows_class_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("includeClass", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("students.json")))
        .mount(&mock_server)
        .await;

    let output = schoolroll(api_args(&mock_server, &["--output", "csv", "students", "list"])).await;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Grace Hopper"));
    assert!(stdout.contains("Grade 5 - Blue"));
    assert!(stdout.contains("Unassigned"));
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_teacher_is_not_posted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/teachers"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let output = schoolroll(api_args(
        &mock_server,
        &["teachers", "add", "--name", "Ada", "--contact", "12345"],
    ))
    .await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("contact: Valid contact number is required"));
    assert!(stderr.contains("email: Email is required"));
    assert!(stderr.contains("teacher not saved"));
    assert!(stderr.contains("Validation failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_list_reports_banner() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/teachers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let output = schoolroll(api_args(&mock_server, &["teachers", "list"])).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error fetching teachers"));
}

#[tokio::test(flavor = "multi_thread")]
async fn financials_yearly_markdown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analytics/financials"))
        .and(query_param("type", "yearly"))
        .and(query_param("year", "2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expenses": 54000,
            "income": 36015
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = schoolroll(api_args(
        &mock_server,
        &[
            "--output",
            "markdown",
            "analytics",
            "financials",
            "--view",
            "yearly",
            "--year",
            "2024",
        ],
    ))
    .await;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("| 2024"));
    assert!(stdout.contains("-$17985.00"));
}

#[tokio::test(flavor = "multi_thread")]
async fn assign_resolves_class_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/classes/c101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "c101",
            "name": "Grade 5 - Blue",
            "year": 2024,
            "studentFees": 1200.5,
            "studentLimit": 30
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/students/s302/assign-class"))
        .and(body_json(json!({ "classId": "c101" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = schoolroll(api_args(&mock_server, &["students", "assign", "s302", "c101"])).await;
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Assigned student s302 to class Grade 5 - Blue"));
}

#[tokio::test(flavor = "multi_thread")]
async fn assign_to_unknown_class_is_not_posted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/classes/c999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Class not found" })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/students/s302/assign-class"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let output = schoolroll(api_args(&mock_server, &["students", "assign", "s302", "c999"])).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown class c999"));
}
