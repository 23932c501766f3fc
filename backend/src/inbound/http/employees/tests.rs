//! Tests for employee API handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockEmployeeDirectory;
use crate::inbound::http::error::{json_error_handler, query_error_handler};
use crate::test_support::CapturedLogs;

fn employee(id: &str, name: &str, salary: u64) -> Employee {
    Employee::new(EmployeeId::new(id).expect("fixture id"), name, salary, 30)
}

fn id(raw: &str) -> EmployeeId {
    EmployeeId::new(raw).expect("fixture id")
}

fn test_app(
    directory: MockEmployeeDirectory,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(Arc::new(directory))))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(scope())
}

async fn send(
    directory: MockEmployeeDirectory,
    request: actix_test::TestRequest,
) -> (StatusCode, actix_web::web::Bytes) {
    let app = actix_test::init_service(test_app(directory)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    (status, actix_test::read_body(response).await)
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("JSON body")
}

#[actix_web::test]
async fn list_returns_employees_with_upstream_field_names() {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_list_employees()
        .times(1)
        .return_once(|| vec![employee("1", "Alice", 5000)]);

    let (status, body) = send(
        directory,
        actix_test::TestRequest::get().uri("/api/v1/employee/employees"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!([{
            "id": "1",
            "employee_name": "Alice",
            "employee_salary": 5000,
            "employee_age": 30,
            "profile_image": ""
        }])
    );
}

#[rstest]
#[case("/api/v1/employee/search?searchString=ali", "ali")]
#[case("/api/v1/employee/search?searchString=", "")]
#[actix_web::test]
async fn search_forwards_needle(#[case] uri: &str, #[case] needle: &'static str) {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_search_employees()
        .with(eq(needle))
        .times(1)
        .return_once(|_| vec![employee("1", "Alice", 5000)]);

    let (status, body) = send(directory, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body).as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn search_without_query_parameter_is_bad_request() {
    let mut directory = MockEmployeeDirectory::new();
    directory.expect_search_employees().times(0);

    let (status, body) = send(
        directory,
        actix_test::TestRequest::get().uri("/api/v1/employee/search"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["code"], "invalid_request");
}

#[rstest]
#[case(Some(9000), json!(9000))]
#[case(None, Value::Null)]
#[actix_web::test]
async fn highest_salary_is_integer_or_null(#[case] salary: Option<u64>, #[case] expected: Value) {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_highest_salary()
        .times(1)
        .return_once(move || salary);

    let (status, body) = send(
        directory,
        actix_test::TestRequest::get().uri("/api/v1/employee/highestSalary"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), expected);
}

#[actix_web::test]
async fn top_earners_route_is_not_captured_by_id_route() {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_top_earner_names()
        .times(1)
        .return_once(|| vec!["Bob".to_owned(), "Alice".to_owned()]);
    directory.expect_employee_by_id().times(0);

    let (status, body) = send(
        directory,
        actix_test::TestRequest::get().uri("/api/v1/employee/topTenHighestEarning"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!(["Bob", "Alice"]));
}

#[actix_web::test]
async fn get_employee_returns_record() {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_employee_by_id()
        .with(eq(id("2")))
        .times(1)
        .return_once(|_| Some(employee("2", "Bob", 9000)));

    let (status, body) = send(
        directory,
        actix_test::TestRequest::get().uri("/api/v1/employee/2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["employee_name"], "Bob");
}

#[actix_web::test]
async fn get_unknown_employee_is_not_found() {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_employee_by_id()
        .times(1)
        .return_once(|_| None);

    let (status, body) = send(
        directory,
        actix_test::TestRequest::get().uri("/api/v1/employee/999"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["code"], "not_found");
}

#[actix_web::test]
async fn get_employee_with_padded_id_is_bad_request() {
    let mut directory = MockEmployeeDirectory::new();
    directory.expect_employee_by_id().times(0);

    let (status, body) = send(
        directory,
        actix_test::TestRequest::get().uri("/api/v1/employee/%207"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["details"]["field"], "id");
}

#[actix_web::test]
async fn create_parses_strings_and_returns_created_employee() {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_create_employee()
        .withf(|draft| draft.name() == "Dana" && draft.salary() == 6100 && draft.age() == 28)
        .times(1)
        .return_once(|draft| {
            Ok(Employee::new(
                EmployeeId::new("77").expect("id"),
                draft.name(),
                draft.salary(),
                draft.age(),
            ))
        });

    let (status, body) = send(
        directory,
        actix_test::TestRequest::post()
            .uri("/api/v1/employee/create")
            .set_json(json!({ "name": "Dana", "salary": "6100", "age": "28" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["id"], "77");
}

#[rstest]
#[case(json!({ "name": "Dana", "salary": "lots", "age": "28" }), "salary")]
#[case(json!({ "name": "Dana", "salary": "6100", "age": "-1" }), "age")]
#[case(json!({ "name": " ", "salary": "6100", "age": "28" }), "name")]
#[actix_web::test]
async fn create_rejects_invalid_fields_without_calling_directory(
    #[case] payload: Value,
    #[case] field: &str,
) {
    let mut directory = MockEmployeeDirectory::new();
    directory.expect_create_employee().times(0);
    let logs = CapturedLogs::default();
    let _guard = logs.install();

    let (status, body) = send(
        directory,
        actix_test::TestRequest::post()
            .uri("/api/v1/employee/create")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value = json_body(&body);
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
    let logged = logs.contents();
    assert!(logged.contains("operation=\"create employee\""), "{logged}");
    assert!(logged.contains(&format!("field=\"{field}\"")), "{logged}");
}

#[actix_web::test]
async fn create_with_malformed_body_is_bad_request() {
    let mut directory = MockEmployeeDirectory::new();
    directory.expect_create_employee().times(0);

    let (status, _) = send(
        directory,
        actix_test::TestRequest::post()
            .uri("/api/v1/employee/create")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[case(Error::too_many_requests("slow down"), StatusCode::TOO_MANY_REQUESTS)]
#[case(Error::internal("failed to create employee"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn create_maps_directory_failures(#[case] error: Error, #[case] expected: StatusCode) {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_create_employee()
        .times(1)
        .return_once(move |_| Err(error));

    let (status, _) = send(
        directory,
        actix_test::TestRequest::post()
            .uri("/api/v1/employee/create")
            .set_json(json!({ "name": "Dana", "salary": "6100", "age": "28" })),
    )
    .await;

    assert_eq!(status, expected);
}

#[actix_web::test]
async fn delete_confirms_with_plain_text_message() {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_delete_employee()
        .with(eq(id("1")))
        .times(1)
        .return_once(|_| Ok("Alice".to_owned()));

    let (status, body) = send(
        directory,
        actix_test::TestRequest::delete().uri("/api/v1/employee/delete/1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_ref(), b"Employee Alice deleted successfully");
}

#[rstest]
#[case(Error::not_found("employee 9 not found"), StatusCode::NOT_FOUND)]
#[case(Error::too_many_requests("slow down"), StatusCode::TOO_MANY_REQUESTS)]
#[case(Error::internal("failed to delete employee"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn delete_maps_directory_failures(#[case] error: Error, #[case] expected: StatusCode) {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_delete_employee()
        .times(1)
        .return_once(move |_| Err(error));

    let (status, _) = send(
        directory,
        actix_test::TestRequest::delete().uri("/api/v1/employee/delete/9"),
    )
    .await;

    assert_eq!(status, expected);
}
