use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Per-employee attendance counts over a report window. Every employee
/// appears, with zero counts when no attendance was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeAttendanceSummary {
    pub employee_id: i32,
    pub name: String,
    pub present_days: u32,
    pub absent_days: u32,
    pub leave_days: u32,
}

/// One payroll period with the employee name joined, as listed by the
/// payroll report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PayrollSummaryRow {
    pub payroll_id: i32,
    pub employee_id: i32,
    pub name: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub basic_salary: Decimal,
    pub deductions: Decimal,
    pub bonuses: Decimal,
    pub net_salary: Decimal,
}
