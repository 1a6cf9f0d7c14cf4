use serde::{Deserialize, Serialize};

use super::lenient::{self, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryGrade {
    #[serde(skip_serializing, deserialize_with = "lenient::string")]
    pub id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub code: String,

    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub base_salary: f64,

    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "lenient::string"
    )]
    pub description: String,

    #[serde(skip_serializing, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<Timestamp>,
}
