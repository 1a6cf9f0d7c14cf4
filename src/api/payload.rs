//! Request bodies. Optional fields are left out when empty, never sent as
//! `null` or `""`. No validation happens here; the backend owns that.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDepartment {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub head_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDepartment {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub head_id: String,
}

/// First/last name and email are always sent, even if blank.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub department_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub manager_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub salary_grade_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSalaryGrade {
    pub code: String,
    pub base_salary: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A `base_salary` of zero (or below) counts as "not provided".
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSalaryGrade {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(skip_serializing_if = "not_positive")]
    pub base_salary: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

fn not_positive(value: &f64) -> bool {
    value.is_nan() || *value <= 0.0
}
