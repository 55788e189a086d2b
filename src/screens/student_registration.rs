//! Student registration: student CRUD plus the classroom dropdown.

use crate::api::ApiClient;
use crate::config::SubmitPolicy;
use crate::controller::{CancelHandle, Clock, CrudController};
use crate::errors::ClientError;
use crate::models::{Classroom, Student};

pub struct StudentRegistration {
    api: ApiClient,
    students: CrudController<Student>,
    classrooms: Vec<Classroom>,
}

impl StudentRegistration {
    pub fn new(api: ApiClient, policy: SubmitPolicy) -> Self {
        Self {
            students: CrudController::new(api.clone(), policy),
            api,
            classrooms: Vec::new(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.students = self.students.with_clock(clock);
        self
    }

    pub fn students(&self) -> &CrudController<Student> {
        &self.students
    }

    pub fn students_mut(&mut self) -> &mut CrudController<Student> {
        &mut self.students
    }

    pub fn classrooms(&self) -> &[Classroom] {
        &self.classrooms
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.students.cancel_handle()
    }

    /// Load the student table and the classroom dropdown side by side. Each
    /// list fails on its own; the student error is reported first.
    pub async fn activate(&mut self) -> Result<(), ClientError> {
        self.students.renew_scope();
        let scope = self.students.scope().clone();

        let (students, classrooms) = tokio::join!(
            self.students.load(),
            scope.guard(self.api.list::<Classroom>()),
        );

        let classrooms = self.publish_classrooms(classrooms);
        students?;
        classrooms
    }

    pub fn deactivate(&self) {
        self.students.deactivate();
    }

    /// Classroom options; a failure leaves the dropdown as it was.
    pub async fn load_classrooms(&mut self) -> Result<(), ClientError> {
        let result = self
            .students
            .scope()
            .guard(self.api.list::<Classroom>())
            .await;
        self.publish_classrooms(result)
    }

    fn publish_classrooms(
        &mut self,
        result: Result<Vec<Classroom>, ClientError>,
    ) -> Result<(), ClientError> {
        match result {
            Ok(classrooms) => {
                tracing::info!("Loaded {} classroom options", classrooms.len());
                self.classrooms = classrooms;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                tracing::error!("Error fetching classrooms: {}", e);
                Err(e)
            }
        }
    }

    /// Name of the student's classroom, if it is among the loaded options.
    pub fn classroom_name(&self, student: &Student) -> Option<&str> {
        self.classrooms
            .iter()
            .find(|classroom| classroom.classroom_id == student.classroom_id)
            .map(|classroom| classroom.classroom_name.as_str())
    }
}
