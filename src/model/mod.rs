pub mod department;
pub mod employee;
pub mod lenient;
pub mod role;
pub mod salary_grade;

pub use department::Department;
pub use employee::Employee;
pub use role::Role;
pub use salary_grade::SalaryGrade;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes one record from a wire value.
///
/// Never fails: a value that is not an object decodes to the default record.
pub fn from_json<T>(value: &Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(value.clone()).unwrap_or_default()
}

/// Decodes a JSON array element by element; anything else is an empty list.
pub fn list_from_json<T>(value: &Value) -> Vec<T>
where
    T: DeserializeOwned + Default,
{
    value
        .as_array()
        .map(|items| items.iter().map(from_json).collect())
        .unwrap_or_default()
}
