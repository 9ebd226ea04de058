//! Parsed reservation interval used by the calendar engine.

use chrono::NaiveDate;
use log::warn;
use shared::{DayClassification, Reservation};
use thiserror::Error;

/// Why a reservation record was rejected during parsing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpanError {
    #[error("unparseable {field} value {value:?}")]
    UnparseableDate { field: &'static str, value: String },
    #[error("end date precedes start date")]
    ReversedRange,
}

/// A reservation normalized to day granularity.
///
/// Input dates may carry a time-of-day suffix; it is dropped here so that
/// all later comparisons are plain date equality. Absent price fields
/// default to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationSpan {
    pub id: String,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_price: f64,
    pub sum_reservation: f64,
}

impl ReservationSpan {
    pub fn parse(reservation: &Reservation) -> Result<Self, SpanError> {
        let start = parse_day("startDate", &reservation.start_date)?;
        let end = parse_day("endDate", &reservation.end_date)?;
        if end < start {
            return Err(SpanError::ReversedRange);
        }

        Ok(Self {
            id: reservation.id.clone(),
            title: reservation.title.clone().unwrap_or_default(),
            start,
            end,
            total_price: reservation.total_price.unwrap_or(0.0),
            sum_reservation: reservation.sum_reservation.unwrap_or(0.0),
        })
    }

    /// Inclusive day membership over [start, end]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Classify a day against this interval.
    ///
    /// The start date is checked first, so a same-day booking reports
    /// Arrival rather than Departure.
    pub fn classify(&self, day: NaiveDate) -> DayClassification {
        if day == self.start {
            DayClassification::Arrival
        } else if day == self.end {
            DayClassification::Departure
        } else if self.start < day && day < self.end {
            DayClassification::Occupied
        } else {
            DayClassification::None
        }
    }

    /// Recognized revenue: quoted price plus the net of payment transactions
    pub fn revenue(&self) -> f64 {
        self.total_price + self.sum_reservation
    }
}

/// Parse every usable reservation, preserving input order.
///
/// Input order is load-bearing: the grid's first-match tie-break follows
/// it. A malformed record is skipped with a warning instead of failing
/// the whole computation.
pub fn parse_spans(reservations: &[Reservation]) -> Vec<ReservationSpan> {
    reservations
        .iter()
        .filter_map(|reservation| match ReservationSpan::parse(reservation) {
            Ok(span) => Some(span),
            Err(e) => {
                warn!("Skipping reservation {}: {}", reservation.id, e);
                None
            }
        })
        .collect()
}

/// Parse an ISO date string at day granularity, tolerating a time suffix
pub(crate) fn parse_day(field: &'static str, value: &str) -> Result<NaiveDate, SpanError> {
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").map_err(|_| {
        SpanError::UnparseableDate {
            field,
            value: value.to_string(),
        }
    })
}
