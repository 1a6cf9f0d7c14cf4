use serde_json::{Map, Value};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiEvent, ApiResult, CreateEmployee};
use crate::config::Config;
use crate::model::{Department, Employee, Role, SalaryGrade};

/// A piece of observable state that just changed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StateChange {
    CurrentTab,
    DarkMode,
    Departments,
    Employees,
    SalaryGrades,
    ErrorMessage,
}

/// Application state shared with the UI, kept in sync with the backend.
///
/// Writes are forwarded to the [`ApiClient`]. Every successful write is
/// followed by a full re-fetch of all three collections; a failure only sets
/// the error message and leaves the collections as they were.
pub struct PersonnelApp {
    client: ApiClient,
    events: UnboundedReceiver<ApiEvent>,
    observers: Vec<UnboundedSender<StateChange>>,

    departments: Vec<Department>,
    employees: Vec<Employee>,
    salary_grades: Vec<SalaryGrade>,
    error_message: String,

    current_tab: usize,
    dark_mode: bool,
}

impl PersonnelApp {
    /// Builds the client over HTTP. No request is sent until [`refresh_all`](Self::refresh_all).
    pub fn new(config: Config) -> ApiResult<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = ApiClient::new(config, tx)?;
        Ok(Self::with_client(client, rx))
    }

    /// `events` must be the receiving end of the channel `client` reports to.
    pub fn with_client(client: ApiClient, events: UnboundedReceiver<ApiEvent>) -> Self {
        Self {
            client,
            events,
            observers: Vec::new(),
            departments: Vec::new(),
            employees: Vec::new(),
            salary_grades: Vec::new(),
            error_message: String::new(),
            current_tab: 0,
            dark_mode: true,
        }
    }

    // ---------- observable state ----------

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn salary_grades(&self) -> &[SalaryGrade] {
        &self.salary_grades
    }

    /// Empty when the last operation went through.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn current_tab(&self) -> usize {
        self.current_tab
    }

    pub fn set_current_tab(&mut self, tab: usize) {
        if self.current_tab != tab {
            self.current_tab = tab;
            self.notify(StateChange::CurrentTab);
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        if self.dark_mode != dark {
            self.dark_mode = dark;
            self.notify(StateChange::DarkMode);
        }
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        if id.is_empty() {
            return None;
        }
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn department_head(&self, department: &Department) -> Option<&Employee> {
        self.employee(&department.head_id)
    }

    /// Every change applied from now on is delivered once, in order.
    pub fn subscribe(&mut self) -> UnboundedReceiver<StateChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(tx);
        rx
    }

    // ---------- departments ----------

    pub fn refresh_departments(&self) {
        self.client.get_departments();
    }

    pub fn create_department(&self, name: &str, head_id: &str) {
        self.client.create_department(name, head_id);
    }

    pub fn update_department(&self, id: &str, name: &str, head_id: &str) {
        self.client.update_department(id, name, head_id);
    }

    /// Points the department at a new head and fixes up both employees' roles.
    ///
    /// Three independent requests, sent in this order without waiting on each
    /// other: the department patch, the old head's demotion (only if there was
    /// one and it differs from the new head), the new head's promotion (only if
    /// there is one). There is no rollback if one of them fails.
    pub fn update_department_with_head(
        &self,
        department_id: &str,
        name: &str,
        new_head_id: &str,
        old_head_id: &str,
    ) {
        self.client.update_department(department_id, name, new_head_id);

        if !old_head_id.is_empty() && old_head_id != new_head_id {
            self.client.update_employee(old_head_id, &role_patch(Role::DEFAULT));
        }

        if !new_head_id.is_empty() {
            self.client.update_employee(new_head_id, &role_patch(Role::HEAD));
        }
    }

    pub fn delete_department(&self, id: &str) {
        self.client.delete_department(id);
    }

    // ---------- employees ----------

    pub fn refresh_employees(&self) {
        self.client.get_employees(false);
    }

    pub fn create_employee(&self, employee: &CreateEmployee) {
        self.client.create_employee(employee);
    }

    pub fn update_employee(&self, id: &str, updates: &Map<String, Value>) {
        self.client.update_employee(id, updates);
    }

    pub fn delete_employee(&self, id: &str) {
        self.client.delete_employee(id);
    }

    // ---------- salary grades ----------

    pub fn refresh_salary_grades(&self) {
        self.client.get_salary_grades();
    }

    pub fn create_salary_grade(&self, code: &str, base_salary: f64, description: &str) {
        self.client.create_salary_grade(code, base_salary, description);
    }

    pub fn update_salary_grade(&self, id: &str, code: &str, base_salary: f64, description: &str) {
        self.client.update_salary_grade(id, code, base_salary, description);
    }

    pub fn delete_salary_grade(&self, id: &str) {
        self.client.delete_salary_grade(id);
    }

    pub fn refresh_all(&self) {
        self.refresh_departments();
        self.refresh_employees();
        self.refresh_salary_grades();
    }

    // ---------- event handling ----------

    /// Waits for the next client event and applies it.
    ///
    /// Returns `false` once the client side of the channel is gone.
    pub async fn process_next(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Applies everything already queued, without waiting.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::DepartmentsReceived(departments) => {
                debug!(count = departments.len(), "Departments received");
                self.departments = departments;
                self.notify(StateChange::Departments);
            }
            ApiEvent::EmployeesReceived(employees) => {
                debug!(count = employees.len(), "Employees received");
                self.employees = employees;
                self.notify(StateChange::Employees);
            }
            ApiEvent::SalaryGradesReceived(grades) => {
                debug!(count = grades.len(), "Salary grades received");
                self.salary_grades = grades;
                self.notify(StateChange::SalaryGrades);
            }
            ApiEvent::ErrorOccurred(error) => {
                self.set_error_message(error);
            }
            ApiEvent::OperationCompleted {
                operation,
                success: true,
                ..
            } => {
                info!(operation = %operation, "Operation succeeded, refreshing");
                self.refresh_all();
                self.set_error_message(String::new());
            }
            ApiEvent::OperationCompleted {
                operation,
                success: false,
                message,
            } => {
                warn!(operation = %operation, error = %message, "Operation failed");
                self.set_error_message(message);
            }
        }
    }

    fn set_error_message(&mut self, message: String) {
        if self.error_message != message {
            self.error_message = message;
            self.notify(StateChange::ErrorMessage);
        }
    }

    fn notify(&mut self, change: StateChange) {
        // drop observers whose receiver went away
        self.observers.retain(|tx| tx.send(change).is_ok());
    }
}

fn role_patch(role: Role) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert("role".to_string(), Value::String(role.to_string()));
    patch
}
