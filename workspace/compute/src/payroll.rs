use rust_decimal::Decimal;

/// Number of days a monthly salary is spread over when pricing one day.
/// Always 30, regardless of how long the payroll period actually is.
pub const MONTH_DAYS: i64 = 30;

/// The figures stored on a payroll row for one (employee, period) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollFigures {
    pub basic_salary: Decimal,
    pub absences: u64,
    /// One day of salary deducted per absence in the period.
    pub auto_deduction: Decimal,
    /// Manual deductions plus the automatic one.
    pub total_deductions: Decimal,
    pub bonuses: Decimal,
    /// Clamped at zero.
    pub net_salary: Decimal,
}

/// Computes payroll figures from the base salary and the absence count.
///
/// `per_day = basic / 30`, `auto = per_day * absences`,
/// `net = max(0, basic - (manual + auto) + bonuses)`, all rounded to
/// two decimal places.
pub fn compute_figures(
    basic_salary: Decimal,
    absences: u64,
    manual_deductions: Decimal,
    bonuses: Decimal,
) -> PayrollFigures {
    let per_day = basic_salary / Decimal::from(MONTH_DAYS);
    let auto_deduction = (per_day * Decimal::from(absences)).round_dp(2);
    let total_deductions = (manual_deductions + auto_deduction).round_dp(2);
    let net_salary = (basic_salary - total_deductions + bonuses)
        .max(Decimal::ZERO)
        .round_dp(2);

    PayrollFigures {
        basic_salary,
        absences,
        auto_deduction,
        total_deductions,
        bonuses,
        net_salary,
    }
}
