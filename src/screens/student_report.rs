//! Read-only student detail report.

use crate::api::ApiClient;
use crate::controller::{ActivationScope, CancelHandle};
use crate::errors::ClientError;
use crate::models::Student;

pub struct StudentReport {
    api: ApiClient,
    scope: ActivationScope,
    students: Vec<Student>,
    selected: Option<i64>,
    details: Option<Student>,
}

impl StudentReport {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            scope: ActivationScope::new(),
            students: Vec::new(),
            selected: None,
            details: None,
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn details(&self) -> Option<&Student> {
        self.details.as_ref()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    pub async fn activate(&mut self) -> Result<(), ClientError> {
        self.scope.cancel();
        self.scope = ActivationScope::new();
        self.load().await
    }

    pub fn deactivate(&self) {
        self.scope.cancel();
    }

    /// Student list for the selector.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        match self.scope.guard(self.api.list::<Student>()).await {
            Ok(students) => {
                self.students = students;
                Ok(())
            }
            Err(e) => {
                if !e.is_cancelled() {
                    tracing::error!("Error fetching students: {}", e);
                }
                Err(e)
            }
        }
    }

    /// Fetch one student's details; a failure keeps the previous selection.
    pub async fn select(&mut self, student_id: i64) -> Result<(), ClientError> {
        match self.scope.guard(self.api.get::<Student>(student_id)).await {
            Ok(student) => {
                self.details = Some(student);
                self.selected = Some(student_id);
                Ok(())
            }
            Err(e) => {
                if !e.is_cancelled() {
                    tracing::error!("Error fetching student details: {}", e);
                }
                Err(e)
            }
        }
    }
}
