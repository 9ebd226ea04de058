//! Engine-internal domain models.

pub mod reservation_span;

pub use reservation_span::{parse_spans, ReservationSpan, SpanError};

pub(crate) use reservation_span::parse_day;
