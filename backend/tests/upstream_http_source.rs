//! Integration tests for the reqwest upstream adapter against an in-process
//! fake of the employee service.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use backend::domain::ports::{EmployeeSource, EmployeeSourceError};
use backend::domain::{EmployeeId, NewEmployee};
use backend::outbound::upstream::{UpstreamAuth, UpstreamHttpSource};
use rstest::rstest;
use serde_json::{Value, json};
use url::Url;
use zeroize::Zeroizing;

#[derive(Default)]
struct Recorded {
    cookies: Vec<Option<String>>,
    created: Vec<Value>,
    deleted: Vec<String>,
}

type SharedRecord = web::Data<Mutex<Recorded>>;

fn record_cookie(req: &HttpRequest, record: &SharedRecord) {
    let cookie = req
        .headers()
        .get("cookie")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    record.lock().expect("record lock").cookies.push(cookie);
}

async fn list(req: HttpRequest, record: SharedRecord) -> HttpResponse {
    record_cookie(&req, &record);
    HttpResponse::Ok().json(json!({
        "status": "success",
        "data": [
            { "id": 1, "employee_name": "Alice", "employee_salary": 5000, "employee_age": 30, "profile_image": "" },
            { "id": "2", "employee_name": "Bob", "employee_salary": "9000", "employee_age": "40", "profile_image": "" }
        ],
        "message": "Successfully! All records has been fetched."
    }))
}

async fn get_one(req: HttpRequest, path: web::Path<String>, record: SharedRecord) -> HttpResponse {
    record_cookie(&req, &record);
    match path.as_str() {
        "1" => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": { "id": 1, "employee_name": "Alice", "employee_salary": 5000, "employee_age": 30, "profile_image": "" },
            "message": "Successfully! Record has been fetched."
        })),
        "3" => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": [
                { "id": 9, "employee_name": "Other", "employee_salary": 100, "employee_age": 50 },
                { "id": 3, "employee_name": "Carol", "employee_salary": 7000, "employee_age": 35 }
            ]
        })),
        "5" => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": [
                { "id": 9, "employee_name": "Other", "employee_salary": 100, "employee_age": 50 }
            ]
        })),
        "404" => HttpResponse::NotFound().finish(),
        "429" => HttpResponse::TooManyRequests().body("Too Many Attempts."),
        _ => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": null,
            "message": "Successfully! Record has been fetched."
        })),
    }
}

async fn create(body: web::Json<Value>, record: SharedRecord) -> HttpResponse {
    let body = body.into_inner();
    record
        .lock()
        .expect("record lock")
        .created
        .push(body.clone());
    HttpResponse::Ok().json(json!({
        "status": "success",
        "data": {
            "name": body["employee_name"],
            "salary": body["employee_salary"],
            "age": body["employee_age"],
            "id": 4321
        }
    }))
}

async fn delete(path: web::Path<String>, record: SharedRecord) -> HttpResponse {
    let id = path.into_inner();
    if id == "500" {
        return HttpResponse::InternalServerError().body("  database\n exploded  ");
    }
    if id == "204" {
        return HttpResponse::NoContent().finish();
    }
    record.lock().expect("record lock").deleted.push(id.clone());
    HttpResponse::Ok().json(json!({
        "status": "success",
        "data": id,
        "message": "Successfully! Record has been deleted"
    }))
}

struct FakeUpstream {
    addr: SocketAddr,
    record: SharedRecord,
    handle: ServerHandle,
}

impl FakeUpstream {
    fn start() -> Self {
        let record: SharedRecord = web::Data::new(Mutex::new(Recorded::default()));
        let app_record = record.clone();
        let server = HttpServer::new(move || {
            App::new().app_data(app_record.clone()).service(
                web::scope("/api/v1")
                    .route("/employees", web::get().to(list))
                    .route("/employee/{id}", web::get().to(get_one))
                    .route("/create", web::post().to(create))
                    .route("/delete/{id}", web::delete().to(delete)),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake upstream");
        let addr = *server.addrs().first().expect("bound address");
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);
        Self {
            addr,
            record,
            handle,
        }
    }

    fn source(&self, auth: Option<UpstreamAuth>) -> UpstreamHttpSource {
        let base = Url::parse(&format!("http://{}/api/v1", self.addr)).expect("base url");
        UpstreamHttpSource::new(base, Duration::from_secs(5), auth).expect("source builds")
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn id(raw: &str) -> EmployeeId {
    EmployeeId::new(raw).expect("valid id")
}

#[actix_rt::test]
async fn fetch_all_decodes_mixed_scalar_encodings() {
    let upstream = FakeUpstream::start();
    let source = upstream.source(None);

    let employees = source.fetch_all().await.expect("fetch succeeds");

    let summary: Vec<_> = employees
        .iter()
        .map(|e| (e.id().to_string(), e.name().to_owned(), e.salary(), e.age()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("1".to_owned(), "Alice".to_owned(), 5000, 30),
            ("2".to_owned(), "Bob".to_owned(), 9000, 40),
        ]
    );
    upstream.stop().await;
}

#[rstest]
#[case("1", Some("Alice"))]
#[case("3", Some("Carol"))]
#[case("5", None)]
#[case("404", None)]
#[case("77", None)]
#[actix_rt::test]
async fn fetch_by_id_maps_missing_records_to_none(
    #[case] raw_id: &str,
    #[case] expected: Option<&str>,
) {
    let upstream = FakeUpstream::start();
    let source = upstream.source(None);

    let found = source.fetch_by_id(&id(raw_id)).await.expect("lookup succeeds");

    assert_eq!(found.as_ref().map(|e| e.name()), expected);
    upstream.stop().await;
}

#[actix_rt::test]
async fn throttled_lookups_surface_as_rate_limited() {
    let upstream = FakeUpstream::start();
    let source = upstream.source(None);

    let err = source
        .fetch_by_id(&id("429"))
        .await
        .expect_err("lookup is throttled");

    assert!(err.is_rate_limited(), "unexpected error: {err}");
    upstream.stop().await;
}

#[actix_rt::test]
async fn create_posts_upstream_field_names_and_decodes_echo() {
    let upstream = FakeUpstream::start();
    let source = upstream.source(None);
    let draft = NewEmployee::try_from_parts(None, "Dana", "6100", "28").expect("valid draft");

    let created = source.create(&draft).await.expect("create succeeds");

    assert_eq!(created.id().as_ref(), "4321");
    assert_eq!(created.name(), "Dana");
    assert_eq!(created.salary(), 6100);
    let sent = upstream
        .record
        .lock()
        .expect("record lock")
        .created
        .clone();
    assert_eq!(sent.len(), 1);
    let body = sent.first().expect("one create body");
    assert_eq!(body["employee_name"], "Dana");
    assert!(body.get("id").is_none(), "absent id must not be sent");
    upstream.stop().await;
}

#[actix_rt::test]
async fn delete_hits_upstream_and_reports_status_failures() {
    let upstream = FakeUpstream::start();
    let source = upstream.source(None);

    source.delete(&id("2")).await.expect("delete succeeds");
    let err = source
        .delete(&id("500"))
        .await
        .expect_err("upstream failure");

    assert_eq!(
        upstream.record.lock().expect("record lock").deleted,
        vec!["2".to_owned()]
    );
    assert_eq!(
        err,
        EmployeeSourceError::status(500_u16, "database exploded")
    );
    upstream.stop().await;
}

#[actix_rt::test]
async fn delete_requires_a_plain_ok_status() {
    let upstream = FakeUpstream::start();
    let source = upstream.source(None);

    let err = source
        .delete(&id("204"))
        .await
        .expect_err("204 is not a confirmed delete");

    assert_eq!(err, EmployeeSourceError::status(204_u16, "status 204"));
    upstream.stop().await;
}

#[actix_rt::test]
async fn auth_header_is_forwarded_on_every_call() {
    let upstream = FakeUpstream::start();
    let auth = UpstreamAuth::new("Cookie", Zeroizing::new("humans_21909=1".to_owned()))
        .expect("valid auth");
    let source = upstream.source(Some(auth));

    source.fetch_all().await.expect("fetch succeeds");
    source.fetch_by_id(&id("1")).await.expect("lookup succeeds");

    let cookies = upstream.record.lock().expect("record lock").cookies.clone();
    assert_eq!(
        cookies,
        vec![Some("humans_21909=1".to_owned()), Some("humans_21909=1".to_owned())]
    );
    upstream.stop().await;
}

#[actix_rt::test]
async fn unreachable_upstream_is_a_transport_error() {
    let upstream = FakeUpstream::start();
    let source = upstream.source(None);
    upstream.stop().await;

    let err = source.fetch_all().await.expect_err("nothing is listening");

    assert!(
        matches!(
            err,
            EmployeeSourceError::Transport { .. } | EmployeeSourceError::Timeout { .. }
        ),
        "unexpected error: {err}"
    );
}
