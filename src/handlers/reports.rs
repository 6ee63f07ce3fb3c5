use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState, CachedData};
use axum::{extract::State, response::Json, Extension};
use common::{DateRange, EmployeeAttendanceSummary, PayrollSummaryRow};
use model::entities::{employee, payroll, user::Role};
use sea_orm::{EntityTrait, QueryOrder, QuerySelect};
use tracing::{debug, instrument};

const REPORT_WINDOW_DAYS: i64 = 30;
const PAYROLL_REPORT_LIMIT: u64 = 50;

/// Per-employee attendance counts over the trailing 30 days
#[utoipa::path(
    get,
    path = "/api/v1/reports/attendance",
    tag = "reports",
    responses(
        (status = 200, description = "Attendance summary retrieved successfully", body = ApiResponse<Vec<EmployeeAttendanceSummary>>),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn attendance_report(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EmployeeAttendanceSummary>>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let today = chrono::Utc::now().date_naive();
    let window = DateRange::new(today - chrono::Duration::days(REPORT_WINDOW_DAYS), today);
    let cache_key = format!("attendance_report_{}", today);

    if let Some(CachedData::AttendanceReport(summary)) = state.cache.get(&cache_key).await {
        debug!("Attendance summary served from cache");
        let response = ApiResponse {
            data: summary,
            message: "Attendance summary retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let summary = compute::attendance::summarize_window(&state.db, window)
        .await
        .map_err(|e| {
            tracing::error!("Attendance summary failed: {}", e);
            ApiError::Internal
        })?;

    state
        .cache
        .insert(cache_key, CachedData::AttendanceReport(summary.clone()))
        .await;

    let response = ApiResponse {
        data: summary,
        message: "Attendance summary retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// The 50 most recently ended payroll periods across all employees
#[utoipa::path(
    get,
    path = "/api/v1/reports/payroll",
    tag = "reports",
    responses(
        (status = 200, description = "Payroll summary retrieved successfully", body = ApiResponse<Vec<PayrollSummaryRow>>),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn payroll_report(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PayrollSummaryRow>>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let cache_key = "payroll_report".to_string();
    if let Some(CachedData::PayrollReport(rows)) = state.cache.get(&cache_key).await {
        debug!("Payroll summary served from cache");
        let response = ApiResponse {
            data: rows,
            message: "Payroll summary retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let records = payroll::Entity::find()
        .find_also_related(employee::Entity)
        .order_by_desc(payroll::Column::PeriodEnd)
        .limit(PAYROLL_REPORT_LIMIT)
        .all(&state.db)
        .await?;

    let rows: Vec<PayrollSummaryRow> = records
        .into_iter()
        .filter_map(|(record, emp)| {
            emp.map(|emp| PayrollSummaryRow {
                payroll_id: record.id,
                employee_id: record.employee_id,
                name: emp.name,
                period_start: record.period_start,
                period_end: record.period_end,
                basic_salary: record.basic_salary,
                deductions: record.deductions,
                bonuses: record.bonuses,
                net_salary: record.net_salary,
            })
        })
        .collect();

    state
        .cache
        .insert(cache_key, CachedData::PayrollReport(rows.clone()))
        .await;

    let response = ApiResponse {
        data: rows,
        message: "Payroll summary retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
