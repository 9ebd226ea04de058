//! Reservation list formatting.
//!
//! Transforms raw reservation records into the formatted rows the list
//! view renders: resolved customer names, localized date ranges, and a
//! revenue figure with a styling classification. Pure formatting logic,
//! independent of any UI framework.

use serde::{Deserialize, Serialize};
use shared::{AmountType, Customer, FormattedReservation, Reservation};

use crate::domain::models::ReservationSpan;

/// Configuration for reservation list display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingConfig {
    /// Currency code appended after the amount, e.g. "CZK"
    pub currency_suffix: Option<String>,
    pub date_format: DateFormat,
}

/// Date formatting options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DateFormat {
    DayMonthYearDots, // "13.06.2025"
    Iso,              // "2025-06-13"
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            currency_suffix: Some("CZK".to_string()),
            date_format: DateFormat::DayMonthYearDots,
        }
    }
}

/// Reservation list service that handles all row-formatting logic
#[derive(Clone, Default)]
pub struct ReservationListService {
    config: ListingConfig,
}

impl ReservationListService {
    pub fn new() -> Self {
        Self {
            config: ListingConfig::default(),
        }
    }

    pub fn with_config(config: ListingConfig) -> Self {
        Self { config }
    }

    /// Format a list of reservations for display, preserving input order
    pub fn format_reservations(
        &self,
        reservations: &[Reservation],
        customers: &[Customer],
    ) -> Vec<FormattedReservation> {
        reservations
            .iter()
            .map(|reservation| self.format_single_reservation(reservation, customers))
            .collect()
    }

    /// Format a single reservation row
    pub fn format_single_reservation(
        &self,
        reservation: &Reservation,
        customers: &[Customer],
    ) -> FormattedReservation {
        let revenue =
            reservation.total_price.unwrap_or(0.0) + reservation.sum_reservation.unwrap_or(0.0);

        FormattedReservation {
            id: reservation.id.clone(),
            title: reservation
                .title
                .clone()
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| "Reservation".to_string()),
            customer_name: self.customer_name(reservation, customers),
            formatted_start: self.format_date(&reservation.start_date),
            formatted_end: self.format_date(&reservation.end_date),
            formatted_revenue: self.format_amount(revenue),
            revenue_type: self.classify_amount(revenue),
            raw_revenue: revenue,
        }
    }

    /// Resolve the customer display name, falling back to the raw customer
    /// id and then to a fixed placeholder
    pub fn customer_name(&self, reservation: &Reservation, customers: &[Customer]) -> String {
        match &reservation.customer_id {
            Some(customer_id) => customers
                .iter()
                .find(|customer| &customer.id == customer_id)
                .map(Customer::display_name)
                .unwrap_or_else(|| customer_id.clone()),
            None => "No customer".to_string(),
        }
    }

    /// Format a date string for display based on configuration.
    ///
    /// Falls back to the raw string when it does not parse.
    pub fn format_date(&self, date_str: &str) -> String {
        match crate::domain::models::parse_day("date", date_str) {
            Ok(date) => match self.config.date_format {
                DateFormat::DayMonthYearDots => date.format("%d.%m.%Y").to_string(),
                DateFormat::Iso => date.format("%Y-%m-%d").to_string(),
            },
            Err(_) => date_str.to_string(),
        }
    }

    /// Format an amount with the configured currency suffix
    pub fn format_amount(&self, amount: f64) -> String {
        match &self.config.currency_suffix {
            Some(suffix) => format!("{:.2} {}", amount, suffix),
            None => format!("{:.2}", amount),
        }
    }

    /// Classify an amount for styling purposes
    pub fn classify_amount(&self, amount: f64) -> AmountType {
        if amount > 0.0 {
            AmountType::Positive
        } else if amount < 0.0 {
            AmountType::Negative
        } else {
            AmountType::Zero
        }
    }

    /// CSS class hint for revenue styling
    pub fn amount_css_class(&self, amount: f64) -> &'static str {
        match self.classify_amount(amount) {
            AmountType::Positive => "revenue positive",
            AmountType::Negative => "revenue negative",
            AmountType::Zero => "revenue zero",
        }
    }
}

/// Number of billable nights between two dates, never less than one.
///
/// A same-day booking still bills a single night.
pub fn nights_between(span: &ReservationSpan) -> i64 {
    (span.end - span.start).num_days().max(1)
}

/// Quote for a stay: billable nights times the per-night rate
pub fn quoted_price(nights: i64, price_per_night: f64) -> f64 {
    nights as f64 * price_per_night
}
