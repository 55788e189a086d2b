//! Join records for the allocation screens.

use serde::{Deserialize, Serialize};

use super::{unknown_field, Allocation, Classroom, Resource, Subject, Teacher};
use crate::errors::ClientError;
use crate::notify::Action;
use crate::validation::{parse_selection, FieldRule, FieldSpec, FieldValue};

/// Teacher assigned to teach a subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubjectAllocation {
    pub allocation_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
}

/// Subject scheduled into a classroom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassroomAllocation {
    pub allocation_id: i64,
    pub classroom_id: i64,
    pub subject_id: i64,
}

fn allocation_message(noun: &str, action: Action) -> String {
    match action {
        Action::Create => format!("{noun} allocated successfully!"),
        Action::Delete => format!("{noun} deallocated successfully!"),
        Action::Update => format!("{noun} allocation updated successfully!"),
        Action::Load => format!("{noun} allocations loaded successfully!"),
    }
}

impl Resource for SubjectAllocation {
    const PATH: &'static str = "AllocateSubjects";
    const ID_FIELD: &'static str = "allocationId";
    const LABEL: &'static str = "subject allocation";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("teacherId", FieldRule::Selection("Teacher")),
        FieldSpec::new("subjectId", FieldRule::Selection("Subject")),
    ];

    fn id(&self) -> i64 {
        self.allocation_id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "allocationId" => Some(FieldValue::Id(self.allocation_id)),
            "teacherId" => Some(FieldValue::Id(self.teacher_id)),
            "subjectId" => Some(FieldValue::Id(self.subject_id)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        match name {
            "teacherId" => self.teacher_id = parse_selection(value),
            "subjectId" => self.subject_id = parse_selection(value),
            _ => return Err(unknown_field(name)),
        }
        Ok(())
    }

    fn success_message(action: Action) -> String {
        allocation_message("Subject", action)
    }
}

impl Allocation for SubjectAllocation {
    type Left = Teacher;
    type Right = Subject;

    fn left_id(&self) -> i64 {
        self.teacher_id
    }

    fn right_id(&self) -> i64 {
        self.subject_id
    }
}

impl Resource for ClassroomAllocation {
    const PATH: &'static str = "AllocateClassrooms";
    const ID_FIELD: &'static str = "allocationId";
    const LABEL: &'static str = "classroom allocation";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("classroomId", FieldRule::Selection("Classroom")),
        FieldSpec::new("subjectId", FieldRule::Selection("Subject")),
    ];

    fn id(&self) -> i64 {
        self.allocation_id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "allocationId" => Some(FieldValue::Id(self.allocation_id)),
            "classroomId" => Some(FieldValue::Id(self.classroom_id)),
            "subjectId" => Some(FieldValue::Id(self.subject_id)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        match name {
            "classroomId" => self.classroom_id = parse_selection(value),
            "subjectId" => self.subject_id = parse_selection(value),
            _ => return Err(unknown_field(name)),
        }
        Ok(())
    }

    fn success_message(action: Action) -> String {
        allocation_message("Classroom", action)
    }
}

impl Allocation for ClassroomAllocation {
    type Left = Classroom;
    type Right = Subject;

    fn left_id(&self) -> i64 {
        self.classroom_id
    }

    fn right_id(&self) -> i64 {
        self.subject_id
    }
}
