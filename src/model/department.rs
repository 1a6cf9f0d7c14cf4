use serde::{Deserialize, Serialize};

use super::lenient::{self, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Department {
    #[serde(skip_serializing, deserialize_with = "lenient::string")]
    pub id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub name: String,

    /// Employee id of the department head, empty when vacant.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "lenient::string"
    )]
    pub head_id: String,

    #[serde(skip_serializing, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<Timestamp>,

    #[serde(skip_serializing, deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl Department {
    pub fn has_head(&self) -> bool {
        !self.head_id.is_empty()
    }
}
