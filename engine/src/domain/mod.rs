//! Domain services behind the reservation dashboard.

pub mod calendar;
pub mod dashboard;
pub mod listing;
pub mod models;
pub mod validation;

pub use calendar::{CalendarError, CalendarService};
pub use dashboard::{DashboardService, DashboardState, HighlightError};
pub use listing::ReservationListService;
pub use validation::FormValidationService;
