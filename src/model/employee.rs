use serde::{Deserialize, Serialize};

use super::lenient::{self, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    #[serde(skip_serializing, deserialize_with = "lenient::string")]
    pub id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub first_name: String,

    #[serde(deserialize_with = "lenient::string")]
    pub last_name: String,

    #[serde(deserialize_with = "lenient::string")]
    pub email: String,

    /// Free text on the wire; see [`super::Role`] for the values the backend knows.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "lenient::string"
    )]
    pub role: String,

    #[serde(deserialize_with = "lenient::bool_or_true")]
    pub active: bool,

    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "lenient::string"
    )]
    pub department_id: String,

    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "lenient::string"
    )]
    pub manager_id: String,

    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "lenient::string"
    )]
    pub salary_grade_id: String,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "lenient::serialize_timestamp",
        deserialize_with = "lenient::timestamp"
    )]
    pub hire_date: Option<Timestamp>,

    #[serde(skip_serializing, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<Timestamp>,

    #[serde(skip_serializing, deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<Timestamp>,

    #[serde(skip_serializing, deserialize_with = "lenient::timestamp")]
    pub deleted_at: Option<Timestamp>,
}

impl Default for Employee {
    fn default() -> Self {
        Self {
            id: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            role: String::new(),
            active: true,
            department_id: String::new(),
            manager_id: String::new(),
            salary_grade_id: String::new(),
            hire_date: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
