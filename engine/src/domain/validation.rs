//! Form input validation for reservation and transaction dialogs.
//!
//! Validates raw form input before it is handed to the backend, so the
//! dialogs can mark individual fields instead of round-tripping obvious
//! mistakes. The backend remains authoritative; this is a first line.

use anyhow::Result;
use shared::{ReservationDraft, ValidationError, ValidationResult};

use crate::domain::models::parse_day;

const MAX_TITLE_LENGTH: usize = 256;
const MAX_NOTE_LENGTH: usize = 1000;

/// Validation service for the reservation and transaction forms
#[derive(Clone, Default)]
pub struct FormValidationService;

impl FormValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a reservation form draft
    pub fn validate_reservation_input(&self, draft: &ReservationDraft) -> ValidationResult {
        let mut errors = Vec::new();

        let start = parse_day("startDate", &draft.start_date);
        let end = parse_day("endDate", &draft.end_date);

        if start.is_err() {
            errors.push(ValidationError::InvalidDate {
                field: "startDate".to_string(),
                value: draft.start_date.clone(),
            });
        }
        if end.is_err() {
            errors.push(ValidationError::InvalidDate {
                field: "endDate".to_string(),
                value: draft.end_date.clone(),
            });
        }
        if let (Ok(start), Ok(end)) = (start, end) {
            if end < start {
                errors.push(ValidationError::EndBeforeStart);
            }
        }

        if draft.persons < 1 {
            errors.push(ValidationError::PersonsOutOfRange(draft.persons));
        }

        if !draft.price_per_night.is_finite() {
            errors.push(ValidationError::AmountNotFinite);
        } else if draft.price_per_night < 0.0 {
            errors.push(ValidationError::NegativePricePerNight);
        }

        if draft.note.len() > MAX_NOTE_LENGTH {
            errors.push(ValidationError::NoteTooLong(draft.note.len()));
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount: None,
        }
    }

    /// Validate transaction form input.
    ///
    /// Amounts may be negative (refunds and adjustments); only
    /// unparseable or non-finite input is rejected.
    pub fn validate_transaction_input(
        &self,
        title: &str,
        amount_input: &str,
        date: &str,
    ) -> ValidationResult {
        let mut errors = Vec::new();

        if title.trim().is_empty() {
            errors.push(ValidationError::EmptyTitle);
        } else if title.len() > MAX_TITLE_LENGTH {
            errors.push(ValidationError::TitleTooLong(title.len()));
        }

        let cleaned_amount = match self.clean_and_parse_amount(amount_input) {
            Ok(amount) => {
                if amount.is_finite() {
                    Some(amount)
                } else {
                    errors.push(ValidationError::AmountNotFinite);
                    None
                }
            }
            Err(parse_error) => {
                errors.push(ValidationError::InvalidAmount(parse_error.to_string()));
                None
            }
        };

        if parse_day("date", date).is_err() {
            errors.push(ValidationError::InvalidDate {
                field: "date".to_string(),
                value: date.to_string(),
            });
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
        }
    }

    /// Clean and parse an amount input string, stripping currency noise
    pub fn clean_and_parse_amount(&self, amount_input: &str) -> Result<f64> {
        let cleaned = amount_input
            .trim()
            .replace("CZK", "")
            .replace(',', "")
            .replace(' ', "");

        cleaned
            .parse::<f64>()
            .map_err(|e| anyhow::anyhow!("Invalid number format: {}", e))
    }

    /// Human-readable message for a validation error
    pub fn validation_error_message(&self, error: &ValidationError) -> String {
        match error {
            ValidationError::EmptyTitle => "Please enter a title".to_string(),
            ValidationError::TitleTooLong(len) => {
                format!("Title is too long ({} characters). Maximum is {}.", len, MAX_TITLE_LENGTH)
            }
            ValidationError::InvalidAmount(msg) => {
                format!("Please enter a valid amount (like 500 or 500.00): {}", msg)
            }
            ValidationError::AmountNotFinite => "Amount must be a finite number".to_string(),
            ValidationError::InvalidDate { field, value } => {
                format!("{} is not a valid date for {}", value, field)
            }
            ValidationError::EndBeforeStart => {
                "End date must not precede the start date".to_string()
            }
            ValidationError::PersonsOutOfRange(persons) => {
                format!("Number of persons must be at least 1, got {}", persons)
            }
            ValidationError::NegativePricePerNight => {
                "Price per night must not be negative".to_string()
            }
            ValidationError::NoteTooLong(len) => {
                format!("Note is too long ({} characters). Maximum is {}.", len, MAX_NOTE_LENGTH)
            }
        }
    }

    /// All validation error messages for a result, in order
    pub fn validation_error_messages(&self, errors: &[ValidationError]) -> Vec<String> {
        errors
            .iter()
            .map(|error| self.validation_error_message(error))
            .collect()
    }
}
