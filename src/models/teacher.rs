//! Teacher roster record.

use serde::{Deserialize, Serialize};

use super::{unknown_field, Resource};
use crate::errors::ClientError;
use crate::validation::{FieldRule, FieldSpec, FieldValue};

/// A teacher on the roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Teacher {
    pub teacher_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub contact_no: String,
    pub email_address: String,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Resource for Teacher {
    const PATH: &'static str = "Teachers";
    const ID_FIELD: &'static str = "teacherId";
    const LABEL: &'static str = "teacher";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("firstName", FieldRule::Required("First Name")),
        FieldSpec::new("lastName", FieldRule::Required("Last Name")),
        FieldSpec::new("contactNo", FieldRule::Phone),
        FieldSpec::new("emailAddress", FieldRule::Email),
    ];

    fn id(&self) -> i64 {
        self.teacher_id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "teacherId" => FieldValue::Id(self.teacher_id),
            "firstName" => FieldValue::Text(&self.first_name),
            "lastName" => FieldValue::Text(&self.last_name),
            "contactNo" => FieldValue::Text(&self.contact_no),
            "emailAddress" => FieldValue::Text(&self.email_address),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        match name {
            "firstName" => self.first_name = value.to_string(),
            "lastName" => self.last_name = value.to_string(),
            "contactNo" => self.contact_no = value.to_string(),
            "emailAddress" => self.email_address = value.to_string(),
            _ => return Err(unknown_field(name)),
        }
        Ok(())
    }
}
