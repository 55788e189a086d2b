//! Screens of the admin client, each backed by its own controller instance.

mod student_registration;
mod student_report;

pub use student_registration::StudentRegistration;
pub use student_report::StudentReport;

use crate::allocation::AllocationController;
use crate::controller::CrudController;
use crate::models::{Classroom, ClassroomAllocation, Subject, SubjectAllocation, Teacher};

pub type TeacherRoster = CrudController<Teacher>;
pub type SubjectCatalog = CrudController<Subject>;
pub type ClassroomCatalog = CrudController<Classroom>;
pub type SubjectAllocations = AllocationController<SubjectAllocation>;
pub type ClassroomAllocations = AllocationController<ClassroomAllocation>;
