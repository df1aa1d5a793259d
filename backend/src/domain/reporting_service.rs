//! Report orchestration: pulls the latest records from storage and runs
//! the aggregation engine over them, handing inert DTOs to the caller.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::debug;
use shared::{DashboardStats, PaymentStats, StudentSearchResult, SummaryKind};

use crate::domain::aggregation;
use crate::domain::calendar::CalendarService;
use crate::domain::mappers::StudentMapper;
use crate::storage::csv::{BatchRepository, StudentRepository};
use crate::storage::traits::{BatchStorage, StudentStorage};

/// Read-only service behind the dashboard and batch-details screens.
#[derive(Clone)]
pub struct ReportingService {
    batch_repository: BatchRepository,
    student_repository: StudentRepository,
    calendar_service: CalendarService,
}

impl ReportingService {
    pub fn new(
        batch_repository: BatchRepository,
        student_repository: StudentRepository,
        calendar_service: CalendarService,
    ) -> Self {
        Self {
            batch_repository,
            student_repository,
            calendar_service,
        }
    }

    /// Headline numbers across every batch a teacher owns, for now's
    /// month and year.
    pub fn dashboard_stats(&self, teacher_id: &str) -> Result<DashboardStats> {
        let students = self.student_repository.list_students_by_teacher(teacher_id)?;
        debug!("Dashboard over {} student(s)", students.len());
        Ok(aggregation::dashboard_stats(&students, Utc::now()))
    }

    /// Paid/unpaid counts for one batch against the navigable focus month.
    pub fn payment_stats(&self, batch_id: &str) -> Result<PaymentStats> {
        let students = self.student_repository.list_students(batch_id)?;
        let reference = self.focus_reference();
        Ok(aggregation::count_stats(&students, reference))
    }

    /// Full paid/unpaid partition for one batch against the focus month.
    pub fn monthly_classification(&self, batch_id: &str) -> Result<shared::MonthlyClassification> {
        let students = self.student_repository.list_students(batch_id)?;
        let classification = aggregation::classify_by_month(&students, self.focus_reference());
        Ok(shared::MonthlyClassification {
            paid: classification
                .paid
                .iter()
                .map(|(student, amount)| shared::PaidStudent {
                    student: StudentMapper::to_dto(student),
                    amount_paid: *amount,
                })
                .collect(),
            unpaid: classification
                .unpaid
                .iter()
                .map(StudentMapper::to_dto)
                .collect(),
            total_collected: classification.total_collected,
        })
    }

    /// Search a teacher's students by name, joined with batch names.
    pub fn search_students(
        &self,
        teacher_id: &str,
        query: &str,
    ) -> Result<Vec<StudentSearchResult>> {
        let students = self.student_repository.list_students_by_teacher(teacher_id)?;
        let batches = self.batch_repository.list_batches(teacher_id)?;
        Ok(aggregation::search_students(&students, &batches, query)
            .into_iter()
            .map(|(student, batch_name)| StudentSearchResult {
                student: StudentMapper::to_dto(student),
                batch_name,
            })
            .collect())
    }

    /// One drill-down report behind a dashboard tile.
    pub fn summary(
        &self,
        teacher_id: &str,
        kind: SummaryKind,
    ) -> Result<Vec<shared::PaymentSummary>> {
        let students = self.student_repository.list_students_by_teacher(teacher_id)?;
        let batches = self.batch_repository.list_batches(teacher_id)?;
        Ok(aggregation::summary_for(kind, &students, &batches, Utc::now()))
    }

    fn focus_reference(&self) -> DateTime<Utc> {
        // Midday avoids any edge effects from converting the naive focus
        // date back into a timestamp.
        self.calendar_service
            .focus_date()
            .and_hms_opt(12, 0, 0)
            .unwrap_or_default()
            .and_utc()
    }
}
