pub mod attendance;
pub mod error;
pub mod payroll;

pub use error::{ComputeError, Result};
pub use payroll::{compute_figures, PayrollFigures, MONTH_DAYS};
