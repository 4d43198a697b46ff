//! Integration tests driving the reqwest upstream adapter, and the HTTP
//! facade on top of it, against an in-process fake upstream directory.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, test as actix_test, web};
use reqwest::Url;
use serde_json::{Value, json};

use employee_directory::domain::ports::{
    EmployeeDirectoryCommand, EmployeeDirectoryQuery, EmployeeUpstream, EmployeeUpstreamError,
    UpstreamStatus,
};
use employee_directory::domain::{
    EmployeeCreateRequest, EmployeeDirectoryService, NewEmployee, TRACE_ID_HEADER, TraceId,
};
use employee_directory::inbound::http::employees;
use employee_directory::inbound::http::state::HttpState;
use employee_directory::outbound::employee_api::ReqwestEmployeeUpstream;
use employee_directory::Trace;

const TRACE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    body: Option<Value>,
    trace_id: Option<String>,
}

#[derive(Default)]
struct FakeDirectory {
    employees: Mutex<Vec<Value>>,
    requests: Mutex<Vec<Recorded>>,
    rate_limited: Mutex<bool>,
}

impl FakeDirectory {
    fn record(&self, req: &HttpRequest, body: Option<Value>) {
        let trace_id = req
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        self.requests.lock().expect("requests lock").push(Recorded {
            method: req.method().to_string(),
            path: req.path().to_owned(),
            body,
            trace_id,
        });
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }
}

fn upstream_employee(id: &str, name: &str, salary: i64) -> Value {
    json!({
        "id": id,
        "employee_name": name,
        "employee_salary": salary,
        "employee_age": 30,
        "employee_title": "Engineer",
        "employee_email": format!("{name}@example.com"),
    })
}

fn ok_envelope(data: Value) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "data": data,
        "status": "Successfully processed request.",
    }))
}

async fn list(req: HttpRequest, state: web::Data<FakeDirectory>) -> HttpResponse {
    state.record(&req, None);
    if *state.rate_limited.lock().expect("flag lock") {
        return HttpResponse::TooManyRequests().body("Too Many Requests");
    }
    let employees = state.employees.lock().expect("employees lock").clone();
    ok_envelope(Value::Array(employees))
}

async fn fetch(
    req: HttpRequest,
    state: web::Data<FakeDirectory>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req, None);
    let id = path.into_inner();
    let found = state
        .employees
        .lock()
        .expect("employees lock")
        .iter()
        .find(|employee| employee.get("id").and_then(Value::as_str) == Some(id.as_str()))
        .cloned();
    match found {
        Some(employee) => ok_envelope(employee),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn create(
    req: HttpRequest,
    state: web::Data<FakeDirectory>,
    body: web::Json<Value>,
) -> HttpResponse {
    let body = body.into_inner();
    state.record(&req, Some(body.clone()));
    let name = body.get("name").and_then(Value::as_str).unwrap_or_default();
    let salary = body.get("salary").and_then(Value::as_i64).unwrap_or_default();
    let created = upstream_employee("new-id", name, salary);
    state
        .employees
        .lock()
        .expect("employees lock")
        .push(created.clone());
    ok_envelope(created)
}

async fn remove(
    req: HttpRequest,
    state: web::Data<FakeDirectory>,
    body: web::Json<Value>,
) -> HttpResponse {
    let body = body.into_inner();
    state.record(&req, Some(body.clone()));
    let name = body.get("name").and_then(Value::as_str).unwrap_or_default();
    let mut employees = state.employees.lock().expect("employees lock");
    let before = employees.len();
    employees.retain(|employee| employee.get("employee_name").and_then(Value::as_str) != Some(name));
    if employees.len() < before {
        ok_envelope(json!(true))
    } else {
        HttpResponse::Ok().json(json!({ "data": false, "status": "Deletion failed" }))
    }
}

async fn slow() -> HttpResponse {
    actix_web::rt::time::sleep(Duration::from_secs(2)).await;
    HttpResponse::Ok().finish()
}

struct FakeUpstream {
    state: web::Data<FakeDirectory>,
    addr: SocketAddr,
    handle: ServerHandle,
}

impl FakeUpstream {
    fn start(employees: Vec<Value>) -> Self {
        let state = web::Data::new(FakeDirectory {
            employees: Mutex::new(employees),
            ..FakeDirectory::default()
        });
        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/api/v1/employee", web::get().to(list))
                .route("/api/v1/employee", web::post().to(create))
                .route("/api/v1/employee", web::delete().to(remove))
                .route("/api/v1/employee/{id}", web::get().to(fetch))
                .route("/slow", web::get().to(slow))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind fake upstream");
        let addr = *server.addrs().first().expect("bound address");
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Self {
            state,
            addr,
            handle,
        }
    }

    fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{path}", self.addr)).expect("valid url")
    }

    fn client(&self) -> ReqwestEmployeeUpstream {
        ReqwestEmployeeUpstream::new(self.url("/api/v1/employee"), Duration::from_secs(5))
            .expect("client builds")
    }

    async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn staff() -> Vec<Value> {
    vec![
        upstream_employee("1", "emp1", 50_000),
        upstream_employee("5", "emp5", 70_000),
        upstream_employee("9", "emp9", 60_000),
    ]
}

#[actix_web::test]
async fn lists_and_decodes_upstream_envelope() {
    let fake = FakeUpstream::start(staff());

    let reply = fake.client().list_employees().await.expect("exchange succeeds");

    assert_eq!(reply.status, UpstreamStatus::OK);
    assert_eq!(reply.status_text(), Some("Successfully processed request."));
    let employees = reply.into_data().expect("payload present");
    let names: Vec<&str> = employees.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["emp1", "emp5", "emp9"]);
    assert_eq!(employees.first().map(|e| e.salary), Some(50_000));
    fake.stop().await;
}

#[actix_web::test]
async fn unknown_id_reports_404_without_envelope() {
    let fake = FakeUpstream::start(staff());

    let reply = fake.client().fetch_employee("404").await.expect("exchange succeeds");

    assert!(reply.status.is_not_found());
    assert!(reply.envelope.is_none());
    let requests = fake.state.requests();
    assert_eq!(requests.first().map(|r| r.path.as_str()), Some("/api/v1/employee/404"));
    fake.stop().await;
}

#[actix_web::test]
async fn rate_limited_text_bodies_keep_the_status() {
    let fake = FakeUpstream::start(staff());
    *fake.state.rate_limited.lock().expect("flag lock") = true;

    let reply = fake.client().list_employees().await.expect("exchange succeeds");

    assert_eq!(reply.status, UpstreamStatus::TOO_MANY_REQUESTS);
    assert!(reply.envelope.is_none());
    fake.stop().await;
}

#[actix_web::test]
async fn create_posts_plain_field_names() {
    let fake = FakeUpstream::start(Vec::new());
    let employee = NewEmployee::try_from(EmployeeCreateRequest {
        name: Some("emp4".to_owned()),
        salary: Some(80_000),
        age: Some(40),
        title: Some("Architect".to_owned()),
        ..EmployeeCreateRequest::default()
    })
    .expect("valid input");

    let reply = fake
        .client()
        .create_employee(&employee)
        .await
        .expect("exchange succeeds");

    assert_eq!(reply.data().map(|e| e.id.as_str()), Some("new-id"));
    let requests = fake.state.requests();
    let recorded = requests.first().expect("create recorded");
    assert_eq!(recorded.method, "POST");
    assert_eq!(
        recorded.body,
        Some(json!({"name": "emp4", "salary": 80_000, "age": 40, "title": "Architect"}))
    );
    fake.stop().await;
}

#[actix_web::test]
async fn delete_sends_name_in_body() {
    let fake = FakeUpstream::start(staff());

    let reply = fake
        .client()
        .delete_employee_by_name("emp5")
        .await
        .expect("exchange succeeds");

    assert_eq!(reply.data(), Some(&true));
    let requests = fake.state.requests();
    let recorded = requests.first().expect("delete recorded");
    assert_eq!(recorded.method, "DELETE");
    assert_eq!(recorded.path, "/api/v1/employee");
    assert_eq!(recorded.body, Some(json!({"name": "emp5"})));
    fake.stop().await;
}

#[actix_web::test]
async fn forwards_scoped_trace_id_upstream() {
    let fake = FakeUpstream::start(staff());
    let client = fake.client();
    let trace_id: TraceId = TRACE.parse().expect("valid trace id");

    TraceId::scope(trace_id, client.list_employees())
        .await
        .expect("exchange succeeds");
    client.list_employees().await.expect("exchange succeeds");

    let requests = fake.state.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests.first().and_then(|r| r.trace_id.as_deref()), Some(TRACE));
    assert_eq!(requests.get(1).and_then(|r| r.trace_id.clone()), None);
    fake.stop().await;
}

#[actix_web::test]
async fn slow_upstream_times_out() {
    let fake = FakeUpstream::start(Vec::new());
    let client = ReqwestEmployeeUpstream::new(fake.url("/slow"), Duration::from_millis(200))
        .expect("client builds");

    let error = client.list_employees().await.expect_err("request times out");

    assert!(
        matches!(error, EmployeeUpstreamError::Timeout { .. }),
        "expected timeout, got {error:?}"
    );
    fake.stop().await;
}

#[actix_web::test]
async fn unreachable_upstream_is_a_transport_error() {
    let fake = FakeUpstream::start(Vec::new());
    let client = fake.client();
    fake.stop().await;

    let error = client.list_employees().await.expect_err("connection refused");

    assert!(
        matches!(
            error,
            EmployeeUpstreamError::Transport { .. } | EmployeeUpstreamError::Timeout { .. }
        ),
        "expected transport failure, got {error:?}"
    );
}

#[actix_web::test]
async fn facade_resolves_name_then_deletes() {
    let fake = FakeUpstream::start(staff());
    let service = EmployeeDirectoryService::new(Arc::new(fake.client()));

    let deleted = service.delete_employee(Some("5")).await.expect("delete succeeds");
    assert_eq!(deleted, "emp5");

    let remaining = service.list_employees().await.expect("list succeeds");
    assert!(remaining.iter().all(|employee| employee.name != "emp5"));

    let methods: Vec<String> = fake.state.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["GET", "DELETE", "GET"]);
    fake.stop().await;
}

#[actix_web::test]
async fn http_surface_serves_views_and_propagates_trace_id() {
    let fake = FakeUpstream::start(staff());
    let service = Arc::new(EmployeeDirectoryService::new(Arc::new(fake.client())));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::from_service(service)))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(employees::configure)),
    )
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/employee/topTenHighestEarningEmployeeNames")
        .insert_header(("Trace-Id", TRACE))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE)
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!(["emp5", "emp9", "emp1"]));

    let requests = fake.state.requests();
    assert_eq!(requests.first().and_then(|r| r.trace_id.as_deref()), Some(TRACE));
    fake.stop().await;
}

#[actix_web::test]
async fn http_surface_maps_missing_employee_to_404() {
    let fake = FakeUpstream::start(staff());
    let service = Arc::new(EmployeeDirectoryService::new(Arc::new(fake.client())));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::from_service(service)))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(employees::configure)),
    )
    .await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/v1/employee/404")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    let trace_header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("not_found"));
    assert_eq!(
        body.get("traceId").and_then(Value::as_str),
        Some(trace_header.as_str())
    );
    let methods: Vec<String> = fake.state.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["GET"], "delete must not be issued");
    fake.stop().await;
}
