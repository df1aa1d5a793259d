//! Student admission, editing and deletion.

use std::sync::mpsc::Receiver;

use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::domain::commands::students::{
    AdmitStudentCommand, AdmitStudentResult, DeleteStudentCommand, DeleteStudentResult,
    ListStudentsResult, UpdateStudentCommand, UpdateStudentResult,
};
use crate::domain::errors::DomainError;
use crate::domain::models::student::Student;
use crate::storage::csv::StudentRepository;
use crate::storage::traits::StudentStorage;

/// Service for the student lifecycle inside a batch.
#[derive(Clone)]
pub struct StudentService {
    student_repository: StudentRepository,
}

impl StudentService {
    pub fn new(student_repository: StudentRepository) -> Self {
        Self { student_repository }
    }

    /// Admit a student into a batch. This is the combined write that also
    /// increments the batch's cached student count.
    pub fn admit_student(&self, command: AdmitStudentCommand) -> Result<AdmitStudentResult> {
        info!(
            "Admitting student: name={}, batch={}",
            command.name, command.batch_id
        );

        if command.name.trim().is_empty() {
            return Err(DomainError::validation("Name cannot be empty.").into());
        }
        if command.batch_id.trim().is_empty() {
            return Err(DomainError::validation("A batch must be selected.").into());
        }

        let student = Student {
            id: Student::generate_id(),
            name: command.name.trim().to_string(),
            roll: command.roll,
            phone: command.phone,
            address: command.address,
            class_name: command.class_name,
            section: command.section,
            school: command.school,
            teacher_id: command.teacher_id,
            batch_id: command.batch_id,
            admission_date: Utc::now(),
            payments: Vec::new(),
        };

        self.student_repository.admit_student(&student)?;

        info!("Admitted student: {} with ID: {}", student.name, student.id);

        Ok(AdmitStudentResult { student })
    }

    /// Edit a student's identity fields. Payments are never touched here.
    pub fn update_student(&self, command: UpdateStudentCommand) -> Result<UpdateStudentResult> {
        info!("Updating student: {}", command.student_id);

        let mut student = self
            .student_repository
            .get_student(&command.batch_id, &command.student_id)?
            .ok_or_else(|| DomainError::not_found("student", &command.student_id))?;

        if let Some(name) = &command.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("Name cannot be empty.").into());
            }
        }

        if let Some(name) = command.name {
            student.name = name.trim().to_string();
        }
        if let Some(roll) = command.roll {
            student.roll = roll;
        }
        if let Some(phone) = command.phone {
            student.phone = phone;
        }
        if let Some(address) = command.address {
            student.address = address;
        }
        if let Some(class_name) = command.class_name {
            student.class_name = class_name;
        }
        if let Some(section) = command.section {
            student.section = section;
        }
        if let Some(school) = command.school {
            student.school = school;
        }

        self.student_repository.update_student(&student)?;

        info!("Updated student: {} with ID: {}", student.name, student.id);

        Ok(UpdateStudentResult { student })
    }

    /// Delete a student. This is the combined write that also decrements
    /// the batch's cached student count by exactly 1.
    pub fn delete_student(&self, command: DeleteStudentCommand) -> Result<DeleteStudentResult> {
        info!("Deleting student: {}", command.student_id);

        let removed = self
            .student_repository
            .remove_student(&command.batch_id, &command.student_id)?;
        if !removed {
            return Err(DomainError::not_found("student", &command.student_id).into());
        }

        Ok(DeleteStudentResult {
            success_message: "Student deleted successfully".to_string(),
        })
    }

    /// List a batch's students ordered by admission time.
    pub fn list_students(&self, batch_id: &str) -> Result<ListStudentsResult> {
        let students = self.student_repository.list_students(batch_id)?;
        Ok(ListStudentsResult { students })
    }

    /// List every student a teacher owns, across all batches.
    pub fn list_all_students(&self, teacher_id: &str) -> Result<ListStudentsResult> {
        let students = self.student_repository.list_students_by_teacher(teacher_id)?;
        Ok(ListStudentsResult { students })
    }

    /// Get a student by batch and ID; absence is `None`, not an error.
    pub fn get_student(&self, batch_id: &str, student_id: &str) -> Result<Option<Student>> {
        self.student_repository.get_student(batch_id, student_id)
    }

    /// Subscribe to live student snapshots across every batch.
    pub fn subscribe(&self) -> Result<Receiver<Vec<Student>>> {
        self.student_repository.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::batches::CreateBatchCommand;
    use crate::domain::batch_service::BatchService;
    use crate::storage::csv::test_utils::TestHelper;

    fn setup_test() -> (StudentService, BatchService, String, TestHelper) {
        let helper = TestHelper::new().unwrap();
        let batch_service = BatchService::new(helper.batch_repo.clone());
        let student_service = StudentService::new(helper.student_repo.clone());
        let batch = batch_service
            .create_batch(CreateBatchCommand {
                teacher_id: "teacher-1".to_string(),
                name: "Physics".to_string(),
            })
            .unwrap()
            .batch;
        (student_service, batch_service, batch.id, helper)
    }

    fn admit_command(name: &str, batch_id: &str) -> AdmitStudentCommand {
        AdmitStudentCommand {
            teacher_id: "teacher-1".to_string(),
            batch_id: batch_id.to_string(),
            name: name.to_string(),
            roll: "7".to_string(),
            phone: String::new(),
            address: String::new(),
            class_name: "Nine".to_string(),
            section: "A".to_string(),
            school: String::new(),
        }
    }

    #[test]
    fn test_admit_student_increments_batch_count() {
        let (students, batches, batch_id, _helper) = setup_test();

        let result = students.admit_student(admit_command(" Asha ", &batch_id)).unwrap();
        assert_eq!(result.student.name, "Asha");
        assert!(result.student.payments.is_empty());

        let batch = batches.get_batch(&batch_id).unwrap().unwrap();
        assert_eq!(batch.student_count, 1);
    }

    #[test]
    fn test_admit_student_validation() {
        let (students, _batches, batch_id, _helper) = setup_test();

        let err = students
            .admit_student(admit_command("  ", &batch_id))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));

        assert!(students.admit_student(admit_command("Asha", "")).is_err());
    }

    #[test]
    fn test_update_student_edits_identity_fields_only() {
        let (students, _batches, batch_id, _helper) = setup_test();
        let admitted = students
            .admit_student(admit_command("Asha", &batch_id))
            .unwrap()
            .student;

        let updated = students
            .update_student(UpdateStudentCommand {
                batch_id: batch_id.clone(),
                student_id: admitted.id.clone(),
                name: Some("Asha Rahman".to_string()),
                school: Some("City High".to_string()),
                ..UpdateStudentCommand::default()
            })
            .unwrap()
            .student;

        assert_eq!(updated.name, "Asha Rahman");
        assert_eq!(updated.school, "City High");
        // Fields without an edit keep their values
        assert_eq!(updated.roll, "7");
    }

    #[test]
    fn test_update_missing_student_is_not_found() {
        let (students, _batches, batch_id, _helper) = setup_test();
        let err = students
            .update_student(UpdateStudentCommand {
                batch_id,
                student_id: "student-missing".to_string(),
                ..UpdateStudentCommand::default()
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_student_decrements_count_exactly_once() {
        let (students, batches, batch_id, _helper) = setup_test();
        let admitted = students
            .admit_student(admit_command("Asha", &batch_id))
            .unwrap()
            .student;
        students
            .admit_student(admit_command("Bina", &batch_id))
            .unwrap();

        students
            .delete_student(DeleteStudentCommand {
                batch_id: batch_id.clone(),
                student_id: admitted.id.clone(),
            })
            .unwrap();
        assert_eq!(
            batches.get_batch(&batch_id).unwrap().unwrap().student_count,
            1
        );

        // Deleting the same student again fails and must not decrement
        let err = students
            .delete_student(DeleteStudentCommand {
                batch_id: batch_id.clone(),
                student_id: admitted.id,
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound { .. })
        ));
        assert_eq!(
            batches.get_batch(&batch_id).unwrap().unwrap().student_count,
            1
        );
    }

    #[test]
    fn test_list_all_students_spans_batches() {
        let (students, batches, batch_id, _helper) = setup_test();
        let second_batch = batches
            .create_batch(CreateBatchCommand {
                teacher_id: "teacher-1".to_string(),
                name: "Chemistry".to_string(),
            })
            .unwrap()
            .batch;

        students.admit_student(admit_command("Asha", &batch_id)).unwrap();
        students
            .admit_student(admit_command("Bina", &second_batch.id))
            .unwrap();

        let all = students.list_all_students("teacher-1").unwrap();
        assert_eq!(all.students.len(), 2);
    }
}
