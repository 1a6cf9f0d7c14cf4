use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use super::operation::{Operation, Resource};
use super::payload::{
    CreateDepartment, CreateEmployee, CreateSalaryGrade, UpdateDepartment, UpdateSalaryGrade,
};
use super::transport::{ApiRequest, ReqwestTransport, Transport};
use crate::config::Config;
use crate::model::{Department, Employee, SalaryGrade, list_from_json};

pub const SUCCESS_MESSAGE: &str = "Operation completed successfully";

/// What a finished request reports back.
///
/// Every request produces exactly one of the three `*Received` variants or
/// one `OperationCompleted`. A failure is preceded by `ErrorOccurred`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    DepartmentsReceived(Vec<Department>),
    EmployeesReceived(Vec<Employee>),
    SalaryGradesReceived(Vec<SalaryGrade>),
    ErrorOccurred(String),
    OperationCompleted {
        operation: Operation,
        success: bool,
        message: String,
    },
}

/// Fire-and-forget REST client.
///
/// Calls return immediately; results arrive on the event channel given at
/// construction. Must be used from inside a tokio runtime.
#[derive(Clone)]
pub struct ApiClient {
    config: Config,
    transport: Arc<dyn Transport>,
    events: UnboundedSender<ApiEvent>,
}

impl ApiClient {
    pub fn new(config: Config, events: UnboundedSender<ApiEvent>) -> ApiResult<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport), events))
    }

    pub fn with_transport(
        config: Config,
        transport: Arc<dyn Transport>,
        events: UnboundedSender<ApiEvent>,
    ) -> Self {
        Self {
            config,
            transport,
            events,
        }
    }

    // ---------- departments ----------

    pub fn get_departments(&self) {
        let url = Resource::Department.collection_url(&self.config);
        self.dispatch::<()>(Operation::ListDepartments, url, None);
    }

    pub fn create_department(&self, name: &str, head_id: &str) {
        let body = CreateDepartment {
            name: name.to_string(),
            head_id: head_id.to_string(),
        };
        let url = Resource::Department.collection_url(&self.config);
        self.dispatch(Operation::CreateDepartment, url, Some(&body));
    }

    /// Blank `name` or `head_id` are left out of the patch.
    pub fn update_department(&self, id: &str, name: &str, head_id: &str) {
        let body = UpdateDepartment {
            name: name.to_string(),
            head_id: head_id.to_string(),
        };
        let url = Resource::Department.item_url(&self.config, id);
        self.dispatch(Operation::UpdateDepartment, url, Some(&body));
    }

    pub fn delete_department(&self, id: &str) {
        let url = Resource::Department.item_url(&self.config, id);
        self.dispatch::<()>(Operation::DeleteDepartment, url, None);
    }

    // ---------- employees ----------

    pub fn get_employees(&self, include_inactive: bool) {
        let mut url = Resource::Employee.collection_url(&self.config);
        if include_inactive {
            url.push_str("?include_inactive=true");
        }
        self.dispatch::<()>(Operation::ListEmployees, url, None);
    }

    pub fn create_employee(&self, employee: &CreateEmployee) {
        let url = Resource::Employee.collection_url(&self.config);
        self.dispatch(Operation::CreateEmployee, url, Some(employee));
    }

    /// Sends `updates` verbatim; field names are not checked.
    pub fn update_employee(&self, id: &str, updates: &Map<String, Value>) {
        let url = Resource::Employee.item_url(&self.config, id);
        self.dispatch(Operation::UpdateEmployee, url, Some(updates));
    }

    pub fn delete_employee(&self, id: &str) {
        let url = Resource::Employee.item_url(&self.config, id);
        self.dispatch::<()>(Operation::DeleteEmployee, url, None);
    }

    // ---------- salary grades ----------

    pub fn get_salary_grades(&self) {
        let url = Resource::SalaryGrade.collection_url(&self.config);
        self.dispatch::<()>(Operation::ListSalaryGrades, url, None);
    }

    pub fn create_salary_grade(&self, code: &str, base_salary: f64, description: &str) {
        let body = CreateSalaryGrade {
            code: code.to_string(),
            base_salary,
            description: description.to_string(),
        };
        let url = Resource::SalaryGrade.collection_url(&self.config);
        self.dispatch(Operation::CreateSalaryGrade, url, Some(&body));
    }

    /// A `base_salary` of `0.0` leaves the salary untouched.
    pub fn update_salary_grade(&self, id: &str, code: &str, base_salary: f64, description: &str) {
        let body = UpdateSalaryGrade {
            code: code.to_string(),
            base_salary,
            description: description.to_string(),
        };
        let url = Resource::SalaryGrade.item_url(&self.config, id);
        self.dispatch(Operation::UpdateSalaryGrade, url, Some(&body));
    }

    pub fn delete_salary_grade(&self, id: &str) {
        let url = Resource::SalaryGrade.item_url(&self.config, id);
        self.dispatch::<()>(Operation::DeleteSalaryGrade, url, None);
    }

    // ---------- dispatch ----------

    fn dispatch<B: Serialize>(&self, operation: Operation, url: String, body: Option<&B>) {
        let body = match body.map(serde_json::to_string).transpose() {
            Ok(body) => body,
            Err(e) => {
                let err = ApiError::Encode(e.to_string());
                warn!(operation = %operation, error = %err, "Failed to build request");
                self.emit(completion_events(operation, Err(err)));
                return;
            }
        };

        debug!(operation = %operation, method = %operation.method(), url = %url, body = ?body, "Dispatching request");

        let request = ApiRequest {
            method: operation.method(),
            url,
            body,
        };
        let pending = self.transport.send(request);
        let events = self.events.clone();

        tokio::spawn(async move {
            let outcome = pending.await;
            for event in completion_events(operation, outcome) {
                // receiver gone means nobody is listening anymore
                if events.send(event).is_err() {
                    break;
                }
            }
        });
    }

    fn emit(&self, events: Vec<ApiEvent>) {
        for event in events {
            let _ = self.events.send(event);
        }
    }
}

/// Turns a finished request into the events it reports.
pub(crate) fn completion_events(operation: Operation, outcome: ApiResult<String>) -> Vec<ApiEvent> {
    let parsed = outcome.and_then(|body| parse_body(operation, &body));

    match parsed {
        Ok(value) => {
            debug!(operation = %operation, "Response received");
            vec![success_event(operation, value)]
        }
        Err(err) => {
            let message = err.to_string();
            warn!(operation = %operation, error = %message, "Request failed");
            vec![
                ApiEvent::ErrorOccurred(message.clone()),
                ApiEvent::OperationCompleted {
                    operation,
                    success: false,
                    message,
                },
            ]
        }
    }
}

/// Lists must be JSON; write replies may also be empty.
fn parse_body(operation: Operation, body: &str) -> ApiResult<Value> {
    if !operation.is_list() && body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}

fn success_event(operation: Operation, value: Value) -> ApiEvent {
    match operation {
        Operation::ListDepartments => ApiEvent::DepartmentsReceived(list_from_json(&value)),
        Operation::ListEmployees => ApiEvent::EmployeesReceived(list_from_json(&value)),
        Operation::ListSalaryGrades => ApiEvent::SalaryGradesReceived(list_from_json(&value)),
        _ => ApiEvent::OperationCompleted {
            operation,
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        },
    }
}
