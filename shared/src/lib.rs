use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reservation record as delivered by the booking backend.
///
/// Dates arrive as ISO 8601 date strings (YYYY-MM-DD); the engine parses
/// and normalizes them to day granularity before any comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    /// ID of the customer this reservation belongs to, if any
    pub customer_id: Option<String>,
    /// Display label, carried through to tooltips and list rows
    pub title: Option<String>,
    /// First night of the stay (YYYY-MM-DD)
    pub start_date: String,
    /// Last day of the stay (YYYY-MM-DD); equal to start_date for a
    /// same-day booking
    pub end_date: String,
    pub persons: Option<u32>,
    pub price_per_night: Option<f64>,
    pub note: Option<String>,
    /// Quoted price for the whole stay
    pub total_price: Option<f64>,
    /// Net total of secondary payment transactions (may be negative)
    pub sum_reservation: Option<f64>,
    /// Payment transactions, present on the detail payload only
    pub transactions: Option<Vec<ReservationTransaction>>,
    pub created_at: Option<String>,
}

/// A payment or refund recorded against a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationTransaction {
    pub id: String,
    pub title: String,
    /// Positive for payments, negative for refunds/adjustments
    pub amount: f64,
    pub note: Option<String>,
    /// Transaction date (YYYY-MM-DD)
    pub date: String,
}

/// Customer record used to resolve display names in the reservation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Option<String>,
}

impl Customer {
    /// Full name as shown in list rows and pickers
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Per-day occupancy classification relative to the reservation intervals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DayClassification {
    /// No reservation touches this day
    None,
    /// The day is a reservation's start date (wins the same-day case)
    Arrival,
    /// The day is a reservation's end date
    Departure,
    /// The day lies strictly between a reservation's start and end
    Occupied,
}

/// A single cell of the calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayCell {
    /// 1-based day number; `None` for the leading blank cells that align
    /// the first of the month to its weekday column
    pub day_of_month: Option<u32>,
    pub classification: DayClassification,
    /// Day-granularity equality against the caller-supplied reference date
    pub is_today: bool,
    /// The reservation whose classification is shown when several touch
    /// this day (first match in input order)
    pub owner_reservation_id: Option<String>,
    /// Hover text for the owning reservation (title and date range)
    pub tooltip: Option<String>,
}

/// One computed month of calendar cells
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarGrid {
    pub year: i32,
    /// 0-indexed month (0 = January)
    pub month0: u32,
    /// Weekday of the 1st, Monday-first (0 = Monday .. 6 = Sunday)
    pub first_weekday: u32,
    /// Leading blanks followed by one cell per day of the month
    pub days: Vec<DayCell>,
}

impl CalendarGrid {
    /// Look up the cell for a given day of the month
    pub fn day(&self, day_of_month: u32) -> Option<&DayCell> {
        self.days
            .iter()
            .find(|cell| cell.day_of_month == Some(day_of_month))
    }
}

/// The month/year a calendar view is pointed at, distinct from "today"
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthRef {
    pub year: i32,
    /// 0-indexed month (0 = January), matching chrono's `Datelike::month0`
    pub month0: u32,
}

impl MonthRef {
    pub fn new(year: i32, month0: u32) -> Self {
        Self { year, month0 }
    }

    /// The month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// Whether the given date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// The previous month, rolling over the year boundary
    pub fn prev(&self) -> Self {
        if self.month0 == 0 {
            Self::new(self.year - 1, 11)
        } else {
            Self::new(self.year, self.month0 - 1)
        }
    }

    /// The next month, rolling over the year boundary
    pub fn next(&self) -> Self {
        if self.month0 == 11 {
            Self::new(self.year + 1, 0)
        } else {
            Self::new(self.year, self.month0 + 1)
        }
    }
}

/// Form input for creating or editing a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    pub customer_id: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub persons: u32,
    pub price_per_night: f64,
    pub note: String,
}

/// Validation result for form input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    /// Parsed amount when the input carried one and it was valid
    pub cleaned_amount: Option<f64>,
}

/// Specific validation errors for reservation and transaction forms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    InvalidAmount(String),
    AmountNotFinite,
    InvalidDate { field: String, value: String },
    EndBeforeStart,
    PersonsOutOfRange(u32),
    NegativePricePerNight,
    NoteTooLong(usize),
}

/// Type of amount for styling and display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AmountType {
    Positive,
    Negative,
    Zero,
}

/// Reservation formatted for list display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedReservation {
    pub id: String,
    pub title: String,
    pub customer_name: String,
    pub formatted_start: String,
    pub formatted_end: String,
    pub formatted_revenue: String,
    pub revenue_type: AmountType,
    pub raw_revenue: f64,
}

/// Error payload returned by the booking backend, normalized from its
/// loosely-shaped JSON forms.
///
/// The backend reports failures in three shapes: an array of
/// AJV-style `{instancePath, message}` objects, a plain object mapping
/// field names to messages, or a bare string. Anything else collapses to
/// a fixed general message instead of being inspected ad hoc at each
/// call site.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiErrorPayload {
    /// Field-level errors keyed by form field name
    FieldErrors(BTreeMap<String, String>),
    /// A single error not attributable to one field
    General(String),
}

impl ApiErrorPayload {
    pub const UNKNOWN_ERROR: &'static str = "Unknown error";

    /// Normalize the `error` member of a backend failure response
    pub fn from_value(error: &serde_json::Value) -> Self {
        match error {
            serde_json::Value::Array(items) => {
                let mut fields = BTreeMap::new();
                for item in items {
                    let field = item
                        .get("instancePath")
                        .and_then(serde_json::Value::as_str)
                        .map(|path| path.strip_prefix('/').unwrap_or(path))
                        .filter(|path| !path.is_empty())
                        .unwrap_or("general");
                    let message = item
                        .get("message")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or(Self::UNKNOWN_ERROR);
                    fields.insert(field.to_string(), message.to_string());
                }
                Self::FieldErrors(fields)
            }
            serde_json::Value::Object(map) => {
                let fields = map
                    .iter()
                    .map(|(field, message)| {
                        let message = message
                            .as_str()
                            .map(str::to_string)
                            .unwrap_or_else(|| message.to_string());
                        (field.clone(), message)
                    })
                    .collect();
                Self::FieldErrors(fields)
            }
            serde_json::Value::String(message) => Self::General(message.clone()),
            _ => Self::General(Self::UNKNOWN_ERROR.to_string()),
        }
    }

    /// Message for a specific form field, if any
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::FieldErrors(fields) => fields.get(name).map(String::as_str),
            Self::General(_) => None,
        }
    }

    /// The general (non-field) message, if any
    pub fn general(&self) -> Option<&str> {
        match self {
            Self::FieldErrors(_) => None,
            Self::General(message) => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_month_ref_navigation() {
        assert_eq!(MonthRef::new(2025, 5).prev(), MonthRef::new(2025, 4));
        assert_eq!(MonthRef::new(2025, 0).prev(), MonthRef::new(2024, 11));

        assert_eq!(MonthRef::new(2025, 5).next(), MonthRef::new(2025, 6));
        assert_eq!(MonthRef::new(2025, 11).next(), MonthRef::new(2026, 0));
    }

    #[test]
    fn test_month_ref_contains() {
        let june = MonthRef::new(2024, 5);
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

        assert!(june.contains(date(2024, 6, 1)));
        assert!(june.contains(date(2024, 6, 30)));
        assert!(!june.contains(date(2024, 7, 1)));
        assert!(!june.contains(date(2023, 6, 15)));
    }

    #[test]
    fn test_month_ref_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(MonthRef::from_date(date), MonthRef::new(2024, 5));
    }

    #[test]
    fn test_error_payload_from_validator_array() {
        let error = json!([
            { "instancePath": "/startDate", "message": "must match format \"date\"" },
            { "instancePath": "", "message": "missing required property" },
        ]);

        let payload = ApiErrorPayload::from_value(&error);

        assert_eq!(payload.field("startDate"), Some("must match format \"date\""));
        assert_eq!(payload.field("general"), Some("missing required property"));
        assert_eq!(payload.general(), None);
    }

    #[test]
    fn test_error_payload_from_object() {
        let error = json!({ "endDate": "end date must not precede start date" });

        let payload = ApiErrorPayload::from_value(&error);

        assert_eq!(payload.field("endDate"), Some("end date must not precede start date"));
    }

    #[test]
    fn test_error_payload_from_string() {
        let payload = ApiErrorPayload::from_value(&json!("reservation does not exist"));

        assert_eq!(payload.general(), Some("reservation does not exist"));
        assert_eq!(payload.field("startDate"), None);
    }

    #[test]
    fn test_error_payload_from_unrecognized_shape() {
        let payload = ApiErrorPayload::from_value(&json!(null));
        assert_eq!(payload.general(), Some(ApiErrorPayload::UNKNOWN_ERROR));

        let payload = ApiErrorPayload::from_value(&json!(42));
        assert_eq!(payload.general(), Some(ApiErrorPayload::UNKNOWN_ERROR));
    }

    #[test]
    fn test_reservation_deserializes_camel_case() {
        let reservation: Reservation = serde_json::from_value(json!({
            "id": "res-1",
            "customerId": "cust-1",
            "title": "Smith family",
            "startDate": "2024-06-10",
            "endDate": "2024-06-12",
            "persons": 2,
            "pricePerNight": 1500.0,
            "totalPrice": 3000.0,
            "sumReservation": 0.0,
        }))
        .unwrap();

        assert_eq!(reservation.customer_id.as_deref(), Some("cust-1"));
        assert_eq!(reservation.start_date, "2024-06-10");
        assert_eq!(reservation.total_price, Some(3000.0));
        assert_eq!(reservation.note, None);
        assert_eq!(reservation.transactions, None);
    }

    #[test]
    fn test_customer_display_name() {
        let customer = Customer {
            id: "cust-1".to_string(),
            first_name: "Jana".to_string(),
            last_name: "Nováková".to_string(),
            email: Some("jana@example.com".to_string()),
            phone: None,
            created_at: None,
        };

        assert_eq!(customer.display_name(), "Jana Nováková");
    }
}
