//! Transport-layer types shared between the compute crate and the backend.
//! These structs mirror the report payloads the handlers return so the
//! aggregation code can produce them without depending on the web layer.

mod reports;

pub use reports::{DateRange, EmployeeAttendanceSummary, PayrollSummaryRow};
