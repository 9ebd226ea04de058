//! Calendar grid computation for the reservation dashboard.
//!
//! This module builds the month view the dashboard renders: one cell per
//! day (plus leading blanks for weekday alignment), each classified
//! against the supplied reservation intervals. All functions are pure;
//! the caller passes the reservation snapshot and the reference date for
//! "today" marking on every invocation, so output is reproducible and no
//! clock is read here.

use chrono::{Datelike, NaiveDate};
use log::debug;
use shared::{CalendarGrid, DayCell, DayClassification, MonthRef, Reservation};
use thiserror::Error;

use crate::domain::models::{parse_spans, ReservationSpan};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    #[error("invalid month index {0}: expected 0..=11")]
    InvalidMonth(u32),
    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),
}

/// Calendar service that handles all grid-related business logic
#[derive(Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Build the day-cell grid for one displayed month.
    ///
    /// Cells are emitted Monday-first: `first_weekday` leading blanks,
    /// then days 1 through the end of the month. For a contested day the
    /// first reservation in input order that touches it fixes both the
    /// classification and the owner; later reservations are not
    /// reconsidered. Malformed reservations are skipped entirely.
    pub fn build_month_grid(
        &self,
        month: MonthRef,
        reservations: &[Reservation],
        today: NaiveDate,
    ) -> Result<CalendarGrid, CalendarError> {
        if month.month0 > 11 {
            return Err(CalendarError::InvalidMonth(month.month0));
        }
        let first_of_month = NaiveDate::from_ymd_opt(month.year, month.month0 + 1, 1)
            .ok_or(CalendarError::InvalidYear(month.year))?;

        let first_weekday = first_of_month.weekday().num_days_from_monday();
        let days_in_month = self.days_in_month(month.month0, month.year);
        let spans = parse_spans(reservations);

        debug!(
            "Building grid for {}/{}: first weekday {}, {} days, {} usable reservations",
            month.month0 + 1,
            month.year,
            first_weekday,
            days_in_month,
            spans.len()
        );

        let mut days = Vec::with_capacity((first_weekday + days_in_month) as usize);
        for _ in 0..first_weekday {
            days.push(DayCell {
                day_of_month: None,
                classification: DayClassification::None,
                is_today: false,
                owner_reservation_id: None,
                tooltip: None,
            });
        }

        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(month.year, month.month0 + 1, day)
                .ok_or(CalendarError::InvalidYear(month.year))?;

            let mut classification = DayClassification::None;
            let mut owner: Option<&ReservationSpan> = None;
            for span in &spans {
                let candidate = span.classify(date);
                if candidate != DayClassification::None {
                    classification = candidate;
                    owner = Some(span);
                    break;
                }
            }

            days.push(DayCell {
                day_of_month: Some(day),
                classification,
                is_today: date == today,
                owner_reservation_id: owner.map(|span| span.id.clone()),
                tooltip: owner.map(tooltip_text),
            });
        }

        Ok(CalendarGrid {
            year: month.year,
            month0: month.month0,
            first_weekday,
            days,
        })
    }

    /// Every reservation whose inclusive interval contains the given day,
    /// in input order.
    ///
    /// This intentionally differs from the grid's single-owner
    /// classification: a contested cell shows one reservation but a day
    /// click resolves all of them.
    pub fn match_reservations_for_day(
        &self,
        day: NaiveDate,
        reservations: &[Reservation],
    ) -> Vec<String> {
        parse_spans(reservations)
            .into_iter()
            .filter(|span| span.contains(day))
            .map(|span| span.id)
            .collect()
    }

    /// Number of days in a given month (0-indexed) and year
    pub fn days_in_month(&self, month0: u32, year: i32) -> u32 {
        match month0 + 1 {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Human-readable name for a 0-indexed month
    pub fn month_name(&self, month0: u32) -> &'static str {
        match month0 {
            0 => "January",
            1 => "February",
            2 => "March",
            3 => "April",
            4 => "May",
            5 => "June",
            6 => "July",
            7 => "August",
            8 => "September",
            9 => "October",
            10 => "November",
            11 => "December",
            _ => "Invalid Month",
        }
    }
}

/// Hover text for a cell's owning reservation
fn tooltip_text(span: &ReservationSpan) -> String {
    format!(
        "{} – {} – {}",
        span.title,
        span.start.format("%d.%m.%Y"),
        span.end.format("%d.%m.%Y")
    )
}
