//! Aggregation engine for the reporting views.
//!
//! Pure functions over a snapshot of students (each carrying its embedded
//! payments) plus a reference date. No I/O and no side effects: every
//! snapshot pushed by the storage layer triggers a full recomputation of
//! these views from scratch, so there is no incremental state to keep
//! consistent.
//!
//! Month/year matching is exact: a payment counts for the selected month
//! only when both its calendar month and its calendar year equal the
//! reference date's. Malformed data is accepted as-is; there is no
//! validation layer here.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use shared::{DashboardStats, PaymentStats, SummaryKind};

use crate::domain::models::batch::Batch;
use crate::domain::models::payment::Payment;
use crate::domain::models::student::Student;

/// Batch name used by summary rows whose batch could not be resolved.
/// Batches and students are fetched from independently-updating sources,
/// so a student can transiently reference a batch that is not loaded.
const UNKNOWN_BATCH: &str = "Unknown Batch";

/// Paid/unpaid partition of a student list for one month.
///
/// Output order follows input order on both sides; no sorting is imposed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyClassification {
    pub paid: Vec<(Student, f64)>,
    pub unpaid: Vec<Student>,
    pub total_collected: f64,
}

/// True when the payment is dated in the given calendar month and year.
fn paid_in_month(payment: &Payment, month: u32, year: i32) -> bool {
    payment.payment_date.month() == month && payment.payment_date.year() == year
}

/// Sum of a student's payments dated in the given month and year.
fn amount_paid_in_month(student: &Student, month: u32, year: i32) -> f64 {
    student
        .payments
        .iter()
        .filter(|p| paid_in_month(p, month, year))
        .map(|p| p.amount)
        .sum()
}

/// The student's most recent payment amount, or 0 if they have none.
fn last_payment_amount(student: &Student) -> f64 {
    student
        .payments
        .iter()
        .max_by_key(|p| p.payment_date)
        .map(|p| p.amount)
        .unwrap_or(0.0)
}

fn batch_name_for<'a>(batches: &'a [Batch], batch_id: &str) -> Option<&'a str> {
    batches
        .iter()
        .find(|b| b.id == batch_id)
        .map(|b| b.name.as_str())
}

/// Partition students into paid/unpaid for the reference date's month.
///
/// A student is paid when at least one payment falls in the reference
/// month AND year; their amount is the sum of all such payments. A student
/// with zero payments is always unpaid.
pub fn classify_by_month(students: &[Student], reference: DateTime<Utc>) -> MonthlyClassification {
    let month = reference.month();
    let year = reference.year();

    let mut classification = MonthlyClassification::default();
    for student in students {
        let amount = amount_paid_in_month(student, month, year);
        let has_paid = student
            .payments
            .iter()
            .any(|p| paid_in_month(p, month, year));
        if has_paid {
            classification.total_collected += amount;
            classification.paid.push((student.clone(), amount));
        } else {
            classification.unpaid.push(student.clone());
        }
    }
    classification
}

/// Paid/unpaid counts for the reference date's month.
///
/// `paid_count + unpaid_count` always equals the number of students.
pub fn count_stats(students: &[Student], reference: DateTime<Utc>) -> PaymentStats {
    let month = reference.month();
    let year = reference.year();

    let paid_count = students
        .iter()
        .filter(|s| s.payments.iter().any(|p| paid_in_month(p, month, year)))
        .count();
    PaymentStats {
        paid_count,
        unpaid_count: students.len() - paid_count,
    }
}

/// Headline dashboard numbers for `now`'s month and year.
pub fn dashboard_stats(students: &[Student], now: DateTime<Utc>) -> DashboardStats {
    let current_month = now.month();
    let current_year = now.year();

    let mut stats = DashboardStats {
        total_students: students.len(),
        ..DashboardStats::default()
    };

    for student in students {
        let mut has_monthly_payment = false;
        for payment in &student.payments {
            if paid_in_month(payment, current_month, current_year) {
                stats.monthly_collection += payment.amount;
                has_monthly_payment = true;
            }
            if payment.payment_date.year() == current_year {
                stats.yearly_collection += payment.amount;
            }
        }
        if has_monthly_payment {
            stats.monthly_paid_students += 1;
        }
    }

    stats.monthly_unpaid_students = stats.total_students - stats.monthly_paid_students;
    stats
}

/// Case-insensitive substring search on student name, joined with the
/// batch name.
///
/// A blank query suppresses the search entirely (empty result, not
/// match-all). Students whose batch cannot be found are dropped.
pub fn search_students<'a>(
    students: &'a [Student],
    batches: &[Batch],
    query: &str,
) -> Vec<(&'a Student, String)> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    students
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .filter_map(|s| {
            batch_name_for(batches, &s.batch_id).map(|name| (s, name.to_string()))
        })
        .collect()
}

/// One drill-down report behind a dashboard tile.
pub fn summary_for(
    kind: SummaryKind,
    students: &[Student],
    batches: &[Batch],
    now: DateTime<Utc>,
) -> Vec<shared::PaymentSummary> {
    match kind {
        SummaryKind::MonthlyCollection => collection_history(students, "%Y-%m"),
        SummaryKind::YearlyCollection => collection_history(students, "%Y"),
        SummaryKind::TotalStudents => all_students_summary(students, batches),
        SummaryKind::PaidStudents => paid_students_summary(students, batches, now),
        SummaryKind::UnpaidStudents => unpaid_students_summary(students, batches, now),
    }
}

/// Group every payment by a formatted period key and sum amounts, newest
/// period first. Keys are ISO-ordered (`YYYY-MM` / `YYYY`) so the
/// descending lexical sort is also chronological.
fn collection_history(students: &[Student], period_format: &str) -> Vec<shared::PaymentSummary> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for student in students {
        for payment in &student.payments {
            let key = payment.payment_date.format(period_format).to_string();
            *totals.entry(key).or_insert(0.0) += payment.amount;
        }
    }

    totals
        .into_iter()
        .rev()
        .map(|(period, amount)| shared::PaymentSummary {
            period,
            amount,
            ..shared::PaymentSummary::default()
        })
        .collect()
}

/// Every student with their most recent payment amount, sorted by name.
fn all_students_summary(students: &[Student], batches: &[Batch]) -> Vec<shared::PaymentSummary> {
    let mut rows: Vec<shared::PaymentSummary> = students
        .iter()
        .map(|student| shared::PaymentSummary {
            student_name: student.name.clone(),
            batch_name: batch_name_for(batches, &student.batch_id)
                .unwrap_or(UNKNOWN_BATCH)
                .to_string(),
            amount: last_payment_amount(student),
            ..shared::PaymentSummary::default()
        })
        .collect();
    rows.sort_by(|a, b| a.student_name.cmp(&b.student_name));
    rows
}

/// Students who paid this month, with their month total, sorted by name.
fn paid_students_summary(
    students: &[Student],
    batches: &[Batch],
    now: DateTime<Utc>,
) -> Vec<shared::PaymentSummary> {
    let classification = classify_by_month(students, now);
    let mut rows: Vec<shared::PaymentSummary> = classification
        .paid
        .into_iter()
        .map(|(student, amount)| shared::PaymentSummary {
            student_name: student.name.clone(),
            batch_name: batch_name_for(batches, &student.batch_id)
                .unwrap_or(UNKNOWN_BATCH)
                .to_string(),
            amount,
            ..shared::PaymentSummary::default()
        })
        .collect();
    rows.sort_by(|a, b| a.student_name.cmp(&b.student_name));
    rows
}

/// Students who have not paid this month, with their most recent payment
/// amount, sorted by name.
fn unpaid_students_summary(
    students: &[Student],
    batches: &[Batch],
    now: DateTime<Utc>,
) -> Vec<shared::PaymentSummary> {
    let classification = classify_by_month(students, now);
    let mut rows: Vec<shared::PaymentSummary> = classification
        .unpaid
        .into_iter()
        .map(|student| shared::PaymentSummary {
            student_name: student.name.clone(),
            batch_name: batch_name_for(batches, &student.batch_id)
                .unwrap_or(UNKNOWN_BATCH)
                .to_string(),
            amount: last_payment_amount(&student),
            ..shared::PaymentSummary::default()
        })
        .collect();
    rows.sort_by(|a, b| a.student_name.cmp(&b.student_name));
    rows
}
