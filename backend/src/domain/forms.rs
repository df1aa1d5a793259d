//! Immutable form values for the admit/edit/payment screens.
//!
//! Each form is a plain value struct; `apply` is a reducer that returns a
//! new struct per field change instead of mutating observable fields in
//! place. Validation happens once, when a form is converted into a domain
//! command, and failures surface as `DomainError::Validation` before any
//! write is attempted.

use chrono::{DateTime, Utc};

use crate::domain::commands::payments::RecordPaymentCommand;
use crate::domain::commands::students::{AdmitStudentCommand, UpdateStudentCommand};
use crate::domain::errors::DomainError;
use crate::domain::models::payment::Payment;
use crate::domain::models::student::Student;

/// Field values for the admit-student and edit-student screens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentForm {
    pub name: String,
    pub roll: String,
    pub phone: String,
    pub address: String,
    pub class_name: String,
    pub section: String,
    pub school: String,
}

/// One field change on a [`StudentForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentFormEdit {
    Name(String),
    Roll(String),
    Phone(String),
    Address(String),
    ClassName(String),
    Section(String),
    School(String),
}

impl StudentForm {
    /// Prefill the form from an existing student (edit screen).
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            roll: student.roll.clone(),
            phone: student.phone.clone(),
            address: student.address.clone(),
            class_name: student.class_name.clone(),
            section: student.section.clone(),
            school: student.school.clone(),
        }
    }

    /// Apply one field edit, returning the updated form.
    pub fn apply(self, edit: StudentFormEdit) -> Self {
        match edit {
            StudentFormEdit::Name(v) => Self { name: v, ..self },
            StudentFormEdit::Roll(v) => Self { roll: v, ..self },
            StudentFormEdit::Phone(v) => Self { phone: v, ..self },
            StudentFormEdit::Address(v) => Self { address: v, ..self },
            StudentFormEdit::ClassName(v) => Self { class_name: v, ..self },
            StudentFormEdit::Section(v) => Self { section: v, ..self },
            StudentFormEdit::School(v) => Self { school: v, ..self },
        }
    }

    /// Validate and convert into an admission command.
    pub fn into_admit_command(
        self,
        teacher_id: impl Into<String>,
        batch_id: impl Into<String>,
    ) -> Result<AdmitStudentCommand, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Name cannot be empty."));
        }
        Ok(AdmitStudentCommand {
            teacher_id: teacher_id.into(),
            batch_id: batch_id.into(),
            name: self.name,
            roll: self.roll,
            phone: self.phone,
            address: self.address,
            class_name: self.class_name,
            section: self.section,
            school: self.school,
        })
    }

    /// Validate and convert into an edit command replacing every identity
    /// field with the form's values.
    pub fn into_update_command(
        self,
        batch_id: impl Into<String>,
        student_id: impl Into<String>,
    ) -> Result<UpdateStudentCommand, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Name cannot be empty."));
        }
        Ok(UpdateStudentCommand {
            batch_id: batch_id.into(),
            student_id: student_id.into(),
            name: Some(self.name),
            roll: Some(self.roll),
            phone: Some(self.phone),
            address: Some(self.address),
            class_name: Some(self.class_name),
            section: Some(self.section),
            school: Some(self.school),
        })
    }
}

/// Field values for the payment-entry screen. The amount stays a raw
/// string until submission so the screen can echo back whatever was typed.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub amount: String,
    pub payment_date: DateTime<Utc>,
    pub note: String,
}

/// One field change on a [`PaymentForm`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentFormEdit {
    Amount(String),
    PaymentDate(DateTime<Utc>),
    Note(String),
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            payment_date: Utc::now(),
            note: String::new(),
        }
    }
}

impl PaymentForm {
    /// Apply one field edit, returning the updated form.
    pub fn apply(self, edit: PaymentFormEdit) -> Self {
        match edit {
            PaymentFormEdit::Amount(v) => Self { amount: v, ..self },
            PaymentFormEdit::PaymentDate(v) => Self {
                payment_date: v,
                ..self
            },
            PaymentFormEdit::Note(v) => Self { note: v, ..self },
        }
    }

    /// Parse and validate the amount. Anything that does not parse as a
    /// number, or is not strictly positive, is rejected.
    pub fn parsed_amount(&self) -> Result<f64, DomainError> {
        match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount > 0.0 => Ok(amount),
            _ => Err(DomainError::validation("Please enter a valid amount.")),
        }
    }

    /// Validate and convert into a payment command.
    pub fn into_command(
        self,
        batch_id: impl Into<String>,
        student_id: impl Into<String>,
    ) -> Result<RecordPaymentCommand, DomainError> {
        let amount = self.parsed_amount()?;
        Ok(RecordPaymentCommand {
            batch_id: batch_id.into(),
            student_id: student_id.into(),
            amount,
            payment_date: Some(self.payment_date),
            note: self.note,
        })
    }

    /// The payment this form describes, without routing information.
    pub fn to_payment(&self) -> Result<Payment, DomainError> {
        Ok(Payment {
            amount: self.parsed_amount()?,
            payment_date: self.payment_date,
            note: self.note.clone(),
        })
    }
}
