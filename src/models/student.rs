//! Student record as registered through the student registration screen.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{unknown_field, Resource};
use crate::errors::ClientError;
use crate::notify::Action;
use crate::validation::{derive_age, parse_selection, FieldRule, FieldSpec, FieldValue};

/// A registered student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub contact_person: String,
    pub contact_no: String,
    pub email_address: String,
    /// `YYYY-MM-DD`, as entered in the date input
    pub date_of_birth: String,
    /// Derived from `date_of_birth` when the date changes
    pub age: String,
    pub classroom_id: i64,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Resource for Student {
    const PATH: &'static str = "Students";
    const ID_FIELD: &'static str = "studentId";
    const LABEL: &'static str = "student";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("firstName", FieldRule::Required("First Name")),
        FieldSpec::new("lastName", FieldRule::Required("Last Name")),
        FieldSpec::new("contactPerson", FieldRule::Required("Contact Person")),
        FieldSpec::new("contactNo", FieldRule::Phone),
        FieldSpec::new("emailAddress", FieldRule::Email),
        FieldSpec::new("dateOfBirth", FieldRule::DateOfBirth),
        FieldSpec::new("age", FieldRule::Age),
        FieldSpec::new("classroomId", FieldRule::Selection("Classroom")),
    ];

    fn id(&self) -> i64 {
        self.student_id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "studentId" => FieldValue::Id(self.student_id),
            "firstName" => FieldValue::Text(&self.first_name),
            "lastName" => FieldValue::Text(&self.last_name),
            "contactPerson" => FieldValue::Text(&self.contact_person),
            "contactNo" => FieldValue::Text(&self.contact_no),
            "emailAddress" => FieldValue::Text(&self.email_address),
            "dateOfBirth" => FieldValue::Text(&self.date_of_birth),
            "age" => FieldValue::Text(&self.age),
            "classroomId" => FieldValue::Id(self.classroom_id),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        match name {
            "firstName" => self.first_name = value.to_string(),
            "lastName" => self.last_name = value.to_string(),
            "contactPerson" => self.contact_person = value.to_string(),
            "contactNo" => self.contact_no = value.to_string(),
            "emailAddress" => self.email_address = value.to_string(),
            "dateOfBirth" => self.date_of_birth = value.to_string(),
            "age" => self.age = value.to_string(),
            "classroomId" => self.classroom_id = parse_selection(value),
            _ => return Err(unknown_field(name)),
        }
        Ok(())
    }

    fn derive_fields(&mut self, changed: &str, today: NaiveDate) -> &'static [&'static str] {
        if changed != "dateOfBirth" {
            return &[];
        }
        self.age = derive_age(&self.date_of_birth, today);
        &["age"]
    }

    fn success_message(action: Action) -> String {
        match action {
            Action::Create => "Student registration successful!".to_string(),
            Action::Update => "Student edited successfully!".to_string(),
            Action::Delete => "Student deleted successfully!".to_string(),
            Action::Load => "Students loaded successfully!".to_string(),
        }
    }
}
