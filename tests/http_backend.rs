//! Round trips against an in-process backend speaking the same wire format.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, web};
use personnel_client::api::{ApiClient, ApiEvent, CreateEmployee};
use personnel_client::{Config, PersonnelApp};
use serde_json::{Map, Value, json};
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Default)]
struct Backend {
    store: Mutex<HashMap<String, Vec<Map<String, Value>>>>,
}

async fn list(
    backend: web::Data<Backend>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let resource = path.into_inner();
    let include_inactive = query.get("include_inactive").is_some_and(|v| v == "true");
    let store = backend.store.lock().unwrap();

    let items: Vec<Value> = store
        .get(&resource)
        .into_iter()
        .flatten()
        .filter(|item| {
            include_inactive
                || resource != "employees"
                || item.get("active").and_then(Value::as_bool).unwrap_or(true)
        })
        .cloned()
        .map(Value::Object)
        .collect();

    HttpResponse::Ok().json(items)
}

async fn create(
    backend: web::Data<Backend>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> HttpResponse {
    let resource = path.into_inner();
    let mut item = body.into_inner();
    let mut store = backend.store.lock().unwrap();
    let items = store.entry(resource.clone()).or_default();

    if resource == "employees" && items.iter().any(|e| e.get("email") == item.get("email")) {
        return HttpResponse::Conflict().body("email already exists");
    }

    item.insert("id".into(), json!(Uuid::new_v4().to_string()));
    item.insert("created_at".into(), json!("2024-01-01T08:00:00Z"));
    items.push(item.clone());

    HttpResponse::Created().json(Value::Object(item))
}

async fn update(
    backend: web::Data<Backend>,
    path: web::Path<(String, String)>,
    body: web::Json<Map<String, Value>>,
) -> HttpResponse {
    let (resource, id) = path.into_inner();
    let mut store = backend.store.lock().unwrap();
    let found = store
        .get_mut(&resource)
        .and_then(|items| items.iter_mut().find(|i| i.get("id") == Some(&json!(id))));

    match found {
        Some(item) => {
            item.extend(body.into_inner());
            item.insert("updated_at".into(), json!("2024-02-01T08:00:00Z"));
            HttpResponse::Ok().json(Value::Object(item.clone()))
        }
        None => HttpResponse::NotFound().body("not found"),
    }
}

async fn remove(backend: web::Data<Backend>, path: web::Path<(String, String)>) -> HttpResponse {
    let (resource, id) = path.into_inner();
    let mut store = backend.store.lock().unwrap();
    let items = store.entry(resource).or_default();
    let before = items.len();
    items.retain(|i| i.get("id") != Some(&json!(id)));

    if items.len() == before {
        HttpResponse::NotFound().body("not found")
    } else {
        HttpResponse::NoContent().finish()
    }
}

async fn spawn_backend() -> (Config, web::Data<Backend>) {
    let backend = web::Data::new(Backend::default());
    let data = backend.clone();

    let server = HttpServer::new(move || {
        App::new().app_data(data.clone()).service(
            web::scope("/api")
                .route("/{resource}", web::get().to(list))
                .route("/{resource}", web::post().to(create))
                .route("/{resource}/{id}", web::put().to(update))
                .route("/{resource}/{id}", web::delete().to(remove)),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    let base = format!("http://{addr}");
    let config = Config::from_lookup(|key| match key {
        "API_BASE_URL" => Some(base.clone()),
        _ => None,
    });
    (config, backend)
}

/// Applies `count` events, failing the test if the backend stalls.
async fn settle(app: &mut PersonnelApp, count: usize) {
    for _ in 0..count {
        let applied = tokio::time::timeout(Duration::from_secs(10), app.process_next())
            .await
            .expect("backend did not answer in time");
        assert!(applied);
    }
}

/// One write: its completion plus the three refetches.
async fn settle_write(app: &mut PersonnelApp) {
    settle(app, 4).await;
    assert_eq!(app.error_message(), "");
}

fn hire(first: &str, last: &str, role: &str) -> CreateEmployee {
    CreateEmployee {
        first_name: first.into(),
        last_name: last.into(),
        email: format!("{}.{}@example.com", first, last).to_lowercase(),
        role: role.into(),
        ..Default::default()
    }
}

#[actix_web::test]
async fn created_salary_grade_comes_back_with_server_fields() {
    let (config, _backend) = spawn_backend().await;
    let mut app = PersonnelApp::new(config).unwrap();

    app.create_salary_grade("L5", 85000.50, "Senior Engineer Level");
    settle_write(&mut app).await;

    let grades = app.salary_grades();
    assert_eq!(grades.len(), 1);
    assert!(Uuid::parse_str(&grades[0].id).is_ok());
    assert_eq!(grades[0].code, "L5");
    assert_eq!(grades[0].base_salary, 85000.5);
    assert_eq!(grades[0].description, "Senior Engineer Level");
    assert!(grades[0].created_at.is_some());
}

#[actix_web::test]
async fn head_reassignment_updates_department_and_both_roles() {
    let (config, _backend) = spawn_backend().await;
    let mut app = PersonnelApp::new(config).unwrap();

    app.create_employee(&hire("Ada", "Lovelace", "DepartmentHead"));
    settle_write(&mut app).await;
    app.create_employee(&hire("Grace", "Hopper", "Employee"));
    settle_write(&mut app).await;

    let id_of = |app: &PersonnelApp, first: &str| {
        app.employees()
            .iter()
            .find(|e| e.first_name == first)
            .map(|e| e.id.clone())
            .unwrap()
    };
    let ada = id_of(&app, "Ada");
    let grace = id_of(&app, "Grace");

    app.create_department("Research & Development", &ada);
    settle_write(&mut app).await;
    let dept = app.departments()[0].clone();
    assert_eq!(app.department_head(&dept).unwrap().full_name(), "Ada Lovelace");

    app.update_department_with_head(&dept.id, "", &grace, &ada);
    settle(&mut app, 3 * 4).await;

    // earlier refetches may land late; read the settled state once more
    app.refresh_all();
    settle(&mut app, 3).await;

    let dept = &app.departments()[0];
    assert_eq!(dept.name, "Research & Development");
    assert_eq!(dept.head_id, grace);
    assert!(dept.updated_at.is_some());
    assert_eq!(app.employee(&ada).unwrap().role, "Employee");
    assert_eq!(app.employee(&grace).unwrap().role, "DepartmentHead");
    assert_eq!(app.error_message(), "");
}

#[actix_web::test]
async fn server_rejection_surfaces_its_message() {
    let (config, backend) = spawn_backend().await;
    let mut app = PersonnelApp::new(config).unwrap();

    app.create_employee(&hire("Ada", "Lovelace", ""));
    settle_write(&mut app).await;

    app.create_employee(&hire("Ada", "Lovelace", ""));
    settle(&mut app, 2).await;

    assert_eq!(app.error_message(), "server replied 409: email already exists");
    assert_eq!(app.employees().len(), 1);
    assert_eq!(backend.store.lock().unwrap()["employees"].len(), 1);

    app.delete_salary_grade("no-such-grade");
    settle(&mut app, 2).await;
    assert_eq!(app.error_message(), "server replied 404: not found");
}

#[actix_web::test]
async fn delete_with_empty_reply_counts_as_success() {
    let (config, _backend) = spawn_backend().await;
    let mut app = PersonnelApp::new(config).unwrap();

    app.create_department("Sales", "");
    settle_write(&mut app).await;
    let id = app.departments()[0].id.clone();

    app.delete_department(&id);
    settle_write(&mut app).await;

    assert!(app.departments().is_empty());
}

#[actix_web::test]
async fn inactive_employees_need_the_flag() {
    let (config, _backend) = spawn_backend().await;
    let mut app = PersonnelApp::new(config.clone()).unwrap();

    app.create_employee(&hire("Alan", "Turing", ""));
    settle_write(&mut app).await;
    let id = app.employees()[0].id.clone();

    let mut updates = Map::new();
    updates.insert("active".into(), json!(false));
    app.update_employee(&id, &updates);
    settle_write(&mut app).await;

    // the facade lists active employees only
    assert!(app.employees().is_empty());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let client = ApiClient::new(config, tx).unwrap();
    client.get_employees(true);

    match rx.recv().await {
        Some(ApiEvent::EmployeesReceived(employees)) => {
            assert_eq!(employees.len(), 1);
            assert!(!employees[0].active);
            assert_eq!(employees[0].full_name(), "Alan Turing");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_reports_transport_error() {
    // grab a free port, then close it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = Config::from_lookup(|key| match key {
        "API_BASE_URL" => Some(format!("http://127.0.0.1:{port}")),
        _ => None,
    });
    let mut app = PersonnelApp::new(config).unwrap();

    app.create_department("Sales", "");
    settle(&mut app, 2).await;

    assert!(!app.error_message().is_empty());
    assert!(app.departments().is_empty());
}
