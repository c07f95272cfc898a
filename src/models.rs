use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const FIELD_MAX_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub program: Option<String>,
}

impl Student {
    pub fn new(fields: StudentFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            program: fields.program,
        }
    }

    /// Overwrites every mutable field. `id` is left alone.
    pub fn apply(&mut self, fields: StudentFields) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.program = fields.program;
    }
}

/// Request body for create and upsert. Nothing here is trusted until
/// [`StudentInput::validate`] has run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentInput {
    #[serde(default, rename = "firstName", alias = "FirstName", alias = "firstname")]
    pub first_name: Option<String>,
    #[serde(default, rename = "lastName", alias = "LastName", alias = "lastname")]
    pub last_name: Option<String>,
    #[serde(default, alias = "Program")]
    pub program: Option<String>,
}

/// Fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub program: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudentData {
    pub students: BTreeMap<Uuid, Student>,
}
