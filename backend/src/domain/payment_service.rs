//! Payment recording.

use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::domain::commands::payments::{RecordPaymentCommand, RecordPaymentResult};
use crate::domain::errors::DomainError;
use crate::domain::models::payment::Payment;
use crate::storage::csv::StudentRepository;
use crate::storage::traits::StudentStorage;

/// Service for appending payments to a student's payment list.
///
/// Payments are append-only: once recorded they are never mutated or
/// individually deleted.
#[derive(Clone)]
pub struct PaymentService {
    student_repository: StudentRepository,
}

impl PaymentService {
    pub fn new(student_repository: StudentRepository) -> Self {
        Self { student_repository }
    }

    /// Record one payment against a student. The amount must be strictly
    /// positive; the date defaults to now.
    pub fn record_payment(&self, command: RecordPaymentCommand) -> Result<RecordPaymentResult> {
        info!(
            "Recording payment: student={}, amount={}",
            command.student_id, command.amount
        );

        if !(command.amount > 0.0) {
            return Err(DomainError::validation("Please enter a valid amount.").into());
        }

        let payment = Payment {
            amount: command.amount,
            payment_date: command.payment_date.unwrap_or_else(Utc::now),
            note: command.note,
        };

        let appended = self.student_repository.append_payment(
            &command.batch_id,
            &command.student_id,
            &payment,
        )?;
        if !appended {
            return Err(DomainError::not_found("student", &command.student_id).into());
        }

        let student = self
            .student_repository
            .get_student(&command.batch_id, &command.student_id)?
            .ok_or_else(|| DomainError::not_found("student", &command.student_id))?;

        info!(
            "Recorded payment of {} for student {}",
            payment.amount, student.id
        );

        Ok(RecordPaymentResult { student })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::batch_service::BatchService;
    use crate::domain::commands::batches::CreateBatchCommand;
    use crate::domain::commands::students::AdmitStudentCommand;
    use crate::domain::student_service::StudentService;
    use crate::storage::csv::test_utils::TestHelper;
    use chrono::TimeZone;

    fn setup_test() -> (PaymentService, String, String, TestHelper) {
        let helper = TestHelper::new().unwrap();
        let batch = BatchService::new(helper.batch_repo.clone())
            .create_batch(CreateBatchCommand {
                teacher_id: "teacher-1".to_string(),
                name: "Physics".to_string(),
            })
            .unwrap()
            .batch;
        let student = StudentService::new(helper.student_repo.clone())
            .admit_student(AdmitStudentCommand {
                teacher_id: "teacher-1".to_string(),
                batch_id: batch.id.clone(),
                name: "Asha".to_string(),
                roll: "7".to_string(),
                phone: String::new(),
                address: String::new(),
                class_name: String::new(),
                section: String::new(),
                school: String::new(),
            })
            .unwrap()
            .student;
        let service = PaymentService::new(helper.student_repo.clone());
        (service, batch.id, student.id, helper)
    }

    #[test]
    fn test_record_payment_appends_in_order() {
        let (service, batch_id, student_id, _helper) = setup_test();

        let first = chrono::Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0).unwrap();
        let second = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

        service
            .record_payment(RecordPaymentCommand {
                batch_id: batch_id.clone(),
                student_id: student_id.clone(),
                amount: 500.0,
                payment_date: Some(first),
                note: "June fee".to_string(),
            })
            .unwrap();
        // Backdated payment lands after the June one: insertion order wins
        let result = service
            .record_payment(RecordPaymentCommand {
                batch_id,
                student_id,
                amount: 400.0,
                payment_date: Some(second),
                note: "May fee".to_string(),
            })
            .unwrap();

        let payments = &result.student.payments;
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].note, "June fee");
        assert_eq!(payments[1].note, "May fee");
    }

    #[test]
    fn test_record_payment_rejects_non_positive_amounts() {
        let (service, batch_id, student_id, _helper) = setup_test();

        for amount in [0.0, -10.0] {
            let err = service
                .record_payment(RecordPaymentCommand {
                    batch_id: batch_id.clone(),
                    student_id: student_id.clone(),
                    amount,
                    payment_date: None,
                    note: String::new(),
                })
                .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<DomainError>(),
                Some(DomainError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_record_payment_for_missing_student_is_not_found() {
        let (service, batch_id, _student_id, _helper) = setup_test();

        let err = service
            .record_payment(RecordPaymentCommand {
                batch_id,
                student_id: "student-missing".to_string(),
                amount: 100.0,
                payment_date: None,
                note: String::new(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_record_payment_defaults_date_to_now() {
        let (service, batch_id, student_id, _helper) = setup_test();
        let before = Utc::now();
        let result = service
            .record_payment(RecordPaymentCommand {
                batch_id,
                student_id,
                amount: 100.0,
                payment_date: None,
                note: String::new(),
            })
            .unwrap();
        let recorded = result.student.payments[0].payment_date;
        assert!(recorded >= before && recorded <= Utc::now());
    }
}
