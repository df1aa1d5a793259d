//! Mapping from domain models to the inert DTOs in the `shared` crate.
//!
//! Domain models carry real `chrono` timestamps; the DTOs handed to the
//! presentation adapter carry RFC 3339 strings.

use crate::domain::models::batch::Batch;
use crate::domain::models::payment::Payment;
use crate::domain::models::student::Student;

pub struct BatchMapper;

impl BatchMapper {
    pub fn to_dto(batch: &Batch) -> shared::Batch {
        shared::Batch {
            id: batch.id.clone(),
            name: batch.name.clone(),
            teacher_id: batch.teacher_id.clone(),
            student_count: batch.student_count,
            created_at: batch.created_at.to_rfc3339(),
        }
    }
}

pub struct PaymentMapper;

impl PaymentMapper {
    pub fn to_dto(payment: &Payment) -> shared::Payment {
        shared::Payment {
            amount: payment.amount,
            payment_date: payment.payment_date.to_rfc3339(),
            note: payment.note.clone(),
        }
    }
}

pub struct StudentMapper;

impl StudentMapper {
    pub fn to_dto(student: &Student) -> shared::Student {
        shared::Student {
            id: student.id.clone(),
            name: student.name.clone(),
            roll: student.roll.clone(),
            phone: student.phone.clone(),
            address: student.address.clone(),
            class_name: student.class_name.clone(),
            section: student.section.clone(),
            school: student.school.clone(),
            teacher_id: student.teacher_id.clone(),
            batch_id: student.batch_id.clone(),
            admission_date: student.admission_date.to_rfc3339(),
            payments: student.payments.iter().map(PaymentMapper::to_dto).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_student_dto_carries_rfc3339_dates() {
        let student = Student {
            id: "student-1".to_string(),
            name: "Asha".to_string(),
            roll: "1".to_string(),
            phone: String::new(),
            address: String::new(),
            class_name: String::new(),
            section: String::new(),
            school: String::new(),
            teacher_id: "teacher-1".to_string(),
            batch_id: "batch-1".to_string(),
            admission_date: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            payments: vec![Payment {
                amount: 500.0,
                payment_date: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
                note: "Feb fee".to_string(),
            }],
        };

        let dto = StudentMapper::to_dto(&student);
        assert_eq!(dto.admission_date, "2024-01-15T09:30:00+00:00");
        assert_eq!(dto.payments.len(), 1);
        assert_eq!(dto.payments[0].payment_date, "2024-02-01T00:00:00+00:00");
    }

    #[test]
    fn test_batch_dto() {
        let batch = Batch {
            id: "batch-1".to_string(),
            name: "Physics".to_string(),
            teacher_id: "teacher-1".to_string(),
            student_count: 12,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let dto = BatchMapper::to_dto(&batch);
        assert_eq!(dto.student_count, 12);
        assert_eq!(dto.created_at, "2024-01-01T00:00:00+00:00");
    }
}
