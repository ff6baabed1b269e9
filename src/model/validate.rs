// File: src/model/validate.rs
use crate::model::parser::{is_valid_date, is_valid_time};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    ActivityTooShort,
    InvalidDate,
    InvalidTime,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::ActivityTooShort => "Aktivitas terlalu pendek atau kosong",
            ValidationError::InvalidDate => "Format tanggal tidak valid",
            ValidationError::InvalidTime => "Format waktu tidak valid",
        };
        f.write_str(msg)
    }
}

/// Result of checking an activity/date/time triple. Every failed check is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<ValidationError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The failures joined into one line, in check order.
    pub fn describe(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn validate_activity(activity: &str) -> bool {
    activity.trim().chars().count() >= 2
}

pub fn validate(activity: &str, date: &str, time: &str) -> Validation {
    let mut errors = Vec::new();
    if !validate_activity(activity) {
        errors.push(ValidationError::ActivityTooShort);
    }
    if !is_valid_date(date) {
        errors.push(ValidationError::InvalidDate);
    }
    if !is_valid_time(time) {
        errors.push(ValidationError::InvalidTime);
    }
    Validation { errors }
}
