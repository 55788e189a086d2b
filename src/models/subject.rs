//! Subject catalog record.

use serde::{Deserialize, Serialize};

use super::{unknown_field, Resource};
use crate::errors::ClientError;
use crate::validation::{FieldRule, FieldSpec, FieldValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subject {
    pub subject_id: i64,
    pub subject_name: String,
}

impl Resource for Subject {
    const PATH: &'static str = "Subjects";
    const ID_FIELD: &'static str = "subjectId";
    const LABEL: &'static str = "subject";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::new(
        "subjectName",
        FieldRule::Required("Subject Name"),
    )];

    fn id(&self) -> i64 {
        self.subject_id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "subjectId" => Some(FieldValue::Id(self.subject_id)),
            "subjectName" => Some(FieldValue::Text(&self.subject_name)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        match name {
            "subjectName" => self.subject_name = value.to_string(),
            _ => return Err(unknown_field(name)),
        }
        Ok(())
    }
}
