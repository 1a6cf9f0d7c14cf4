use reqwest::Method;
use strum_macros::{AsRefStr, Display};

use crate::config::Config;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    Department,
    Employee,
    SalaryGrade,
}

impl Resource {
    /// Collection route, e.g. `{api_url}/departments`.
    pub fn collection_url(&self, config: &Config) -> String {
        match self {
            Resource::Department => config.departments_url(),
            Resource::Employee => config.employees_url(),
            Resource::SalaryGrade => config.salary_grades_url(),
        }
    }

    /// Item route: collection route + `/` + id.
    pub fn item_url(&self, config: &Config, id: &str) -> String {
        format!("{}/{}", self.collection_url(config), id)
    }
}

/// Tag carried by every in-flight request so its response can be routed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    ListDepartments,
    CreateDepartment,
    UpdateDepartment,
    DeleteDepartment,

    ListEmployees,
    CreateEmployee,
    UpdateEmployee,
    DeleteEmployee,

    ListSalaryGrades,
    CreateSalaryGrade,
    UpdateSalaryGrade,
    DeleteSalaryGrade,
}

impl Operation {
    pub fn resource(&self) -> Resource {
        use Operation::*;
        match self {
            ListDepartments | CreateDepartment | UpdateDepartment | DeleteDepartment => {
                Resource::Department
            }
            ListEmployees | CreateEmployee | UpdateEmployee | DeleteEmployee => Resource::Employee,
            ListSalaryGrades | CreateSalaryGrade | UpdateSalaryGrade | DeleteSalaryGrade => {
                Resource::SalaryGrade
            }
        }
    }

    pub fn method(&self) -> Method {
        use Operation::*;
        match self {
            ListDepartments | ListEmployees | ListSalaryGrades => Method::GET,
            CreateDepartment | CreateEmployee | CreateSalaryGrade => Method::POST,
            UpdateDepartment | UpdateEmployee | UpdateSalaryGrade => Method::PUT,
            DeleteDepartment | DeleteEmployee | DeleteSalaryGrade => Method::DELETE,
        }
    }

    /// List responses are decoded into a collection; everything else only
    /// needs a verdict.
    pub fn is_list(&self) -> bool {
        self.method() == Method::GET
    }
}
