//! Data models for the School Management System API.
//!
//! These models match the API's JSON records (camelCase) so drafts can be posted
//! back unchanged.

mod allocation;
mod classroom;
mod student;
mod subject;
mod teacher;

pub use allocation::*;
pub use classroom::*;
pub use student::*;
pub use subject::*;
pub use teacher::*;

use std::fmt::Debug;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ClientError;
use crate::notify::Action;
use crate::validation::{FieldSpec, FieldValue};

/// A server-owned collection of records addressed by path and numeric id.
pub trait Resource: Debug + Clone + Default + Serialize + DeserializeOwned {
    /// Path segment under `/api`.
    const PATH: &'static str;
    /// Wire name of the identifier field.
    const ID_FIELD: &'static str;
    /// Lowercase noun used in notifications.
    const LABEL: &'static str;
    /// Validation table for drafts.
    const FIELDS: &'static [FieldSpec];

    /// Server-assigned id; `0` means not yet created.
    fn id(&self) -> i64;

    /// Read a field by wire name.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Write a field by wire name from form input.
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), ClientError>;

    /// Recompute fields derived from `changed`; returns the names it rewrote.
    fn derive_fields(&mut self, _changed: &str, _today: NaiveDate) -> &'static [&'static str] {
        &[]
    }

    /// Notification text after a successful action.
    fn success_message(action: Action) -> String {
        let mut title = Self::LABEL.to_string();
        if let Some(first) = title.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        format!("{} {} successfully!", title, action.past_tense())
    }

    /// Notification text after a failed action.
    fn failure_message(action: Action) -> String {
        match action {
            Action::Load => format!("An error occurred while loading the {}s.", Self::LABEL),
            _ => format!(
                "An error occurred while {} the {}.",
                action.gerund(),
                Self::LABEL
            ),
        }
    }
}

/// A join record linking two resources by foreign key.
pub trait Allocation: Resource {
    type Left: Resource;
    type Right: Resource;

    fn left_id(&self) -> i64;
    fn right_id(&self) -> i64;
}

/// An allocation with both foreign keys resolved for display.
#[derive(Debug, Clone)]
pub struct ResolvedAllocation<A: Allocation> {
    pub allocation_id: i64,
    pub left: A::Left,
    pub right: A::Right,
}

pub(crate) fn unknown_field(name: &str) -> ClientError {
    ClientError::UnknownField(name.to_string())
}
