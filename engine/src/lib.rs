//! # Reservation calendar engine
//!
//! Pure, synchronous domain logic behind the reservation dashboard:
//! month-grid occupancy classification, day-to-reservation resolution,
//! month-scoped revenue aggregation, list formatting and form
//! validation.
//!
//! The engine performs no I/O and reads no clocks. Callers hand it a
//! snapshot of reservation records (fetched elsewhere) together with the
//! displayed month and a reference date for "today" marking, and render
//! whatever comes back. Given identical inputs, every function returns
//! identical output.

pub mod domain;

pub use domain::calendar::{CalendarError, CalendarService};
pub use domain::dashboard::{DashboardService, DashboardState, HighlightError};
pub use domain::listing::{DateFormat, ListingConfig, ReservationListService};
pub use domain::models::{parse_spans, ReservationSpan, SpanError};
pub use domain::validation::FormValidationService;

/// Main engine struct that bundles all domain services
#[derive(Clone, Default)]
pub struct Engine {
    pub calendar: CalendarService,
    pub dashboard: DashboardService,
    pub listing: ReservationListService,
    pub validation: FormValidationService,
}

impl Engine {
    /// Create an engine instance with all services
    pub fn new() -> Self {
        Self::default()
    }
}
