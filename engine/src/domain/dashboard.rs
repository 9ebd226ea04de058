//! Dashboard aggregation and view state for the reservation overview.
//!
//! The list filter and the revenue figure deliberately use different
//! month membership rules: the list shows everything touching the
//! displayed month, while revenue counts only reservations that end in
//! it. Keeping both here stops callers from conflating them.

use chrono::NaiveDate;
use shared::{MonthRef, Reservation};
use thiserror::Error;
use tracing::info;

use crate::domain::calendar::CalendarService;
use crate::domain::models::ReservationSpan;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HighlightError {
    #[error("reservation {0} not found")]
    NotFound(String),
    #[error("reservation {0} has no valid dates")]
    InvalidDates(String),
}

/// Dashboard service that handles month-scoped aggregation
#[derive(Clone, Default)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Reservations shown in the list for the displayed month: starting in
    /// it, ending in it, or spanning across the reference date.
    ///
    /// Broader than [`compute_month_revenue`]'s set: a booking that runs
    /// through the whole month without starting or ending in it is listed
    /// but earns nothing here.
    ///
    /// [`compute_month_revenue`]: Self::compute_month_revenue
    pub fn filter_reservations_for_month(
        &self,
        reference: NaiveDate,
        reservations: &[Reservation],
    ) -> Vec<Reservation> {
        let month = MonthRef::from_date(reference);
        reservations
            .iter()
            .filter(|reservation| match ReservationSpan::parse(reservation) {
                Ok(span) => {
                    month.contains(span.start)
                        || month.contains(span.end)
                        || (span.start < reference && span.end > reference)
                }
                Err(_) => false,
            })
            .cloned()
            .collect()
    }

    /// Revenue recognized in the displayed month.
    ///
    /// Sums quoted price plus net transactions over reservations whose end
    /// date falls inside the month. A reservation ending in an adjacent
    /// month contributes nothing even when it overlaps this one. The
    /// result may be negative; formatting and rounding are caller
    /// concerns.
    pub fn compute_month_revenue(&self, month: MonthRef, reservations: &[Reservation]) -> f64 {
        reservations
            .iter()
            .filter_map(|reservation| ReservationSpan::parse(reservation).ok())
            .filter(|span| month.contains(span.end))
            .map(|span| span.revenue())
            .sum()
    }

    /// Overall quoted-price total across the whole collection, shown next
    /// to the month figure when the reservation list is loaded.
    pub fn compute_total_revenue(&self, reservations: &[Reservation]) -> f64 {
        reservations
            .iter()
            .map(|reservation| reservation.total_price.unwrap_or(0.0))
            .sum()
    }

    /// Locate the month containing a reservation's start date so the
    /// caller can re-point the displayed month before highlighting it.
    ///
    /// A missing id is reported distinctly from a reservation that exists
    /// but carries unusable dates; neither silently falls back to a
    /// default month.
    pub fn resolve_highlight_target(
        &self,
        reservation_id: &str,
        reservations: &[Reservation],
    ) -> Result<MonthRef, HighlightError> {
        let reservation = reservations
            .iter()
            .find(|r| r.id == reservation_id)
            .ok_or_else(|| HighlightError::NotFound(reservation_id.to_string()))?;
        let span = ReservationSpan::parse(reservation)
            .map_err(|_| HighlightError::InvalidDates(reservation_id.to_string()))?;

        Ok(MonthRef::from_date(span.start))
    }
}

/// View state owned by the presentation layer.
///
/// The original client kept the displayed month, the selected day and the
/// highlighted ids in component state scattered over the dashboard; it is
/// explicit here so every transition is a plain function of the previous
/// state and the triggering event. Nothing in the engine holds this
/// between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub displayed_month: MonthRef,
    pub selected_day: Option<NaiveDate>,
    /// Ids glowing in the reservation list, most recently selected first
    pub highlighted: Vec<String>,
}

impl DashboardState {
    pub fn new(displayed_month: MonthRef) -> Self {
        Self {
            displayed_month,
            selected_day: None,
            highlighted: Vec::new(),
        }
    }

    pub fn prev_month(&mut self) {
        self.displayed_month = self.displayed_month.prev();
    }

    pub fn next_month(&mut self) {
        self.displayed_month = self.displayed_month.next();
    }

    /// Day click: remember the selection and highlight every reservation
    /// touching that day.
    pub fn select_day(
        &mut self,
        day: NaiveDate,
        reservations: &[Reservation],
        calendar: &CalendarService,
    ) {
        self.selected_day = Some(day);
        self.highlighted = calendar.match_reservations_for_day(day, reservations);
    }

    /// Jump to a reservation: switch the displayed month to its start
    /// month and highlight it. State is untouched when the id cannot be
    /// resolved, so the caller can surface the failure.
    pub fn jump_to_reservation(
        &mut self,
        reservation_id: &str,
        reservations: &[Reservation],
        dashboard: &DashboardService,
    ) -> Result<(), HighlightError> {
        let target = dashboard.resolve_highlight_target(reservation_id, reservations)?;
        info!(
            "Jumping to reservation {} in {}/{}",
            reservation_id,
            target.month0 + 1,
            target.year
        );

        self.displayed_month = target;
        self.highlighted = vec![reservation_id.to_string()];
        Ok(())
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted.clear();
    }

    pub fn is_highlighted(&self, reservation_id: &str) -> bool {
        self.highlighted.iter().any(|id| id == reservation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_reservation(
        id: &str,
        start: &str,
        end: &str,
        total_price: f64,
        sum_reservation: f64,
    ) -> Reservation {
        Reservation {
            id: id.to_string(),
            customer_id: None,
            title: Some(format!("Reservation {}", id)),
            start_date: start.to_string(),
            end_date: end.to_string(),
            persons: Some(2),
            price_per_night: None,
            note: None,
            total_price: Some(total_price),
            sum_reservation: Some(sum_reservation),
            transactions: None,
            created_at: None,
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_month_revenue_counts_reservations_ending_in_month() {
        let service = DashboardService::new();
        let reservations = vec![create_test_reservation("A", "2024-06-10", "2024-06-12", 3000.0, 0.0)];

        assert_eq!(
            service.compute_month_revenue(MonthRef::new(2024, 5), &reservations),
            3000.0
        );
    }

    #[test]
    fn test_month_revenue_excludes_reservation_ending_next_month() {
        let service = DashboardService::new();
        // Overlaps June but ends in July, so June earns nothing from it
        let reservations = vec![create_test_reservation("A", "2024-06-28", "2024-07-02", 5000.0, 0.0)];

        assert_eq!(
            service.compute_month_revenue(MonthRef::new(2024, 5), &reservations),
            0.0
        );
        assert_eq!(
            service.compute_month_revenue(MonthRef::new(2024, 6), &reservations),
            5000.0
        );
    }

    #[test]
    fn test_month_revenue_includes_transaction_net_and_may_go_negative() {
        let service = DashboardService::new();
        let reservations = vec![
            create_test_reservation("A", "2024-06-10", "2024-06-12", 3000.0, -4500.0),
            create_test_reservation("B", "2024-06-15", "2024-06-15", 0.0, 800.0),
        ];

        assert_eq!(
            service.compute_month_revenue(MonthRef::new(2024, 5), &reservations),
            -700.0
        );
    }

    #[test]
    fn test_month_revenue_skips_malformed_records() {
        let service = DashboardService::new();
        let reservations = vec![
            create_test_reservation("A", "2024-06-10", "2024-06-12", 3000.0, 0.0),
            create_test_reservation("broken", "junk", "2024-06-12", 9999.0, 0.0),
        ];

        assert_eq!(
            service.compute_month_revenue(MonthRef::new(2024, 5), &reservations),
            3000.0
        );
    }

    #[test]
    fn test_total_revenue_sums_quoted_prices_only() {
        let service = DashboardService::new();
        let reservations = vec![
            create_test_reservation("A", "2024-06-10", "2024-06-12", 3000.0, -500.0),
            create_test_reservation("B", "2024-08-01", "2024-08-05", 7000.0, 200.0),
        ];

        assert_eq!(service.compute_total_revenue(&reservations), 10000.0);
    }

    #[test]
    fn test_filter_includes_start_or_end_in_month() {
        let service = DashboardService::new();
        let reservations = vec![
            create_test_reservation("starts", "2024-06-28", "2024-07-02", 0.0, 0.0),
            create_test_reservation("ends", "2024-05-30", "2024-06-02", 0.0, 0.0),
            create_test_reservation("other", "2024-08-01", "2024-08-05", 0.0, 0.0),
        ];

        let filtered = service.filter_reservations_for_month(date(2024, 6, 8), &reservations);

        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["starts", "ends"]);
    }

    #[test]
    fn test_filter_includes_month_spanning_reservation() {
        let service = DashboardService::new();
        // Runs May through July; displayed month is the middle one
        let reservations = vec![create_test_reservation("span", "2024-05-20", "2024-07-10", 0.0, 0.0)];

        let filtered = service.filter_reservations_for_month(date(2024, 6, 8), &reservations);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "span");
    }

    #[test]
    fn test_filter_is_broader_than_revenue() {
        let service = DashboardService::new();
        let reservations = vec![create_test_reservation("span", "2024-05-20", "2024-07-10", 6000.0, 0.0)];
        let june = MonthRef::new(2024, 5);

        assert_eq!(
            service
                .filter_reservations_for_month(date(2024, 6, 8), &reservations)
                .len(),
            1
        );
        assert_eq!(service.compute_month_revenue(june, &reservations), 0.0);
    }

    #[test]
    fn test_resolve_highlight_target() {
        let service = DashboardService::new();
        let reservations = vec![create_test_reservation("A", "2024-06-10", "2024-06-12", 0.0, 0.0)];

        assert_eq!(
            service.resolve_highlight_target("A", &reservations),
            Ok(MonthRef::new(2024, 5))
        );
    }

    #[test]
    fn test_resolve_highlight_target_missing_id() {
        let service = DashboardService::new();
        let reservations = vec![create_test_reservation("A", "2024-06-10", "2024-06-12", 0.0, 0.0)];

        assert_eq!(
            service.resolve_highlight_target("missing-id", &reservations),
            Err(HighlightError::NotFound("missing-id".to_string()))
        );
    }

    #[test]
    fn test_resolve_highlight_target_invalid_dates() {
        let service = DashboardService::new();
        let reservations = vec![create_test_reservation("A", "junk", "2024-06-12", 0.0, 0.0)];

        assert_eq!(
            service.resolve_highlight_target("A", &reservations),
            Err(HighlightError::InvalidDates("A".to_string()))
        );
    }

    #[test]
    fn test_state_month_navigation() {
        let mut state = DashboardState::new(MonthRef::new(2025, 0));

        state.prev_month();
        assert_eq!(state.displayed_month, MonthRef::new(2024, 11));

        state.next_month();
        state.next_month();
        assert_eq!(state.displayed_month, MonthRef::new(2025, 1));
    }

    #[test]
    fn test_state_select_day_highlights_all_matches() {
        let calendar = CalendarService::new();
        let mut state = DashboardState::new(MonthRef::new(2024, 5));
        let reservations = vec![
            create_test_reservation("A", "2024-06-19", "2024-06-21", 0.0, 0.0),
            create_test_reservation("B", "2024-06-20", "2024-06-22", 0.0, 0.0),
        ];

        state.select_day(date(2024, 6, 20), &reservations, &calendar);

        assert_eq!(state.selected_day, Some(date(2024, 6, 20)));
        assert_eq!(state.highlighted, vec!["A".to_string(), "B".to_string()]);
        assert!(state.is_highlighted("A"));
        assert!(!state.is_highlighted("C"));
    }

    #[test]
    fn test_state_jump_to_reservation_repoints_month() {
        let dashboard = DashboardService::new();
        let mut state = DashboardState::new(MonthRef::new(2024, 6));
        let reservations = vec![create_test_reservation("A", "2024-06-10", "2024-06-12", 0.0, 0.0)];

        state
            .jump_to_reservation("A", &reservations, &dashboard)
            .unwrap();

        assert_eq!(state.displayed_month, MonthRef::new(2024, 5));
        assert_eq!(state.highlighted, vec!["A".to_string()]);
    }

    #[test]
    fn test_state_jump_to_missing_reservation_leaves_state_untouched() {
        let dashboard = DashboardService::new();
        let mut state = DashboardState::new(MonthRef::new(2024, 6));
        state.highlighted = vec!["A".to_string()];
        let reservations = vec![create_test_reservation("A", "2024-06-10", "2024-06-12", 0.0, 0.0)];

        let result = state.jump_to_reservation("missing-id", &reservations, &dashboard);

        assert_eq!(result, Err(HighlightError::NotFound("missing-id".to_string())));
        assert_eq!(state.displayed_month, MonthRef::new(2024, 6));
        assert_eq!(state.highlighted, vec!["A".to_string()]);
    }

    #[test]
    fn test_state_clear_highlight() {
        let mut state = DashboardState::new(MonthRef::new(2024, 5));
        state.highlighted = vec!["A".to_string(), "B".to_string()];

        state.clear_highlight();

        assert!(state.highlighted.is_empty());
    }
}
