use std::collections::HashMap;

use common::{DateRange, EmployeeAttendanceSummary};
use model::entities::{attendance, attendance::AttendanceStatus, employee};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument};

use crate::error::Result;

/// Counts Absent attendance rows for one employee over an inclusive range.
#[instrument(skip(db))]
pub async fn count_absences(
    db: &DatabaseConnection,
    employee_id: i32,
    range: DateRange,
) -> Result<u64> {
    let absences = attendance::Entity::find()
        .filter(attendance::Column::EmployeeId.eq(employee_id))
        .filter(attendance::Column::Status.eq(AttendanceStatus::Absent))
        .filter(attendance::Column::Date.gte(range.start))
        .filter(attendance::Column::Date.lte(range.end))
        .count(db)
        .await?;

    debug!("Employee {} has {} absences in {:?}", employee_id, absences, range);
    Ok(absences)
}

/// Aggregates per-employee Present/Absent/Leave counts over a window.
/// Every employee is listed, ordered by name, with zero counts when no
/// attendance was recorded in the window.
#[instrument(skip(db))]
pub async fn summarize_window(
    db: &DatabaseConnection,
    range: DateRange,
) -> Result<Vec<EmployeeAttendanceSummary>> {
    let employees = employee::Entity::find()
        .order_by_asc(employee::Column::Name)
        .all(db)
        .await?;

    let records = attendance::Entity::find()
        .filter(attendance::Column::Date.gte(range.start))
        .filter(attendance::Column::Date.lte(range.end))
        .all(db)
        .await?;

    let mut counts: HashMap<i32, (u32, u32, u32)> = HashMap::new();
    for record in records {
        let entry = counts.entry(record.employee_id).or_default();
        match record.status {
            AttendanceStatus::Present => entry.0 += 1,
            AttendanceStatus::Absent => entry.1 += 1,
            AttendanceStatus::Leave => entry.2 += 1,
        }
    }

    let summaries = employees
        .into_iter()
        .map(|employee| {
            let (present_days, absent_days, leave_days) =
                counts.get(&employee.id).copied().unwrap_or_default();
            EmployeeAttendanceSummary {
                employee_id: employee.id,
                name: employee.name,
                present_days,
                absent_days,
                leave_days,
            }
        })
        .collect();

    Ok(summaries)
}
