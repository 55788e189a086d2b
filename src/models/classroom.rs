//! Classroom catalog record.

use serde::{Deserialize, Serialize};

use super::{unknown_field, Resource};
use crate::errors::ClientError;
use crate::validation::{FieldRule, FieldSpec, FieldValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Classroom {
    pub classroom_id: i64,
    pub classroom_name: String,
}

impl Resource for Classroom {
    const PATH: &'static str = "Classrooms";
    const ID_FIELD: &'static str = "classroomId";
    const LABEL: &'static str = "classroom";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::new(
        "classroomName",
        FieldRule::Required("Classroom Name"),
    )];

    fn id(&self) -> i64 {
        self.classroom_id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "classroomId" => Some(FieldValue::Id(self.classroom_id)),
            "classroomName" => Some(FieldValue::Text(&self.classroom_name)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        match name {
            "classroomName" => self.classroom_name = value.to_string(),
            _ => return Err(unknown_field(name)),
        }
        Ok(())
    }
}
