use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use chrono::NaiveDate;
use common::DateRange;
use model::entities::{employee, payroll, user::Role};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

/// Request body for generating payroll for one (employee, period) pair
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GeneratePayrollRequest {
    pub employee_id: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Manual deductions on top of the per-absence deduction (default: 0)
    pub deductions: Option<Decimal>,
    /// Bonuses (default: 0)
    pub bonuses: Option<Decimal>,
}

/// Payroll response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PayrollResponse {
    pub id: i32,
    pub employee_id: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub basic_salary: Decimal,
    pub deductions: Decimal,
    pub bonuses: Decimal,
    pub net_salary: Decimal,
    pub employee_name: Option<String>,
}

impl PayrollResponse {
    pub fn from_joined(model: payroll::Model, emp: Option<employee::Model>) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            period_start: model.period_start,
            period_end: model.period_end,
            basic_salary: model.basic_salary,
            deductions: model.deductions,
            bonuses: model.bonuses,
            net_salary: model.net_salary,
            employee_name: emp.map(|e| e.name),
        }
    }
}

/// A single payroll record rendered for one employee's view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PayslipResponse {
    pub id: i32,
    pub employee_id: i32,
    pub employee_name: String,
    pub position: Option<String>,
    pub email: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub basic_salary: Decimal,
    pub deductions: Decimal,
    pub bonuses: Decimal,
    pub net_salary: Decimal,
}

/// Generate payroll for an employee and period. One day of salary on a
/// fixed 30-day month basis is deducted per Absent day in the period;
/// re-generating the same period overwrites the stored figures.
#[utoipa::path(
    post,
    path = "/api/v1/payroll",
    tag = "payroll",
    request_body = GeneratePayrollRequest,
    responses(
        (status = 200, description = "Payroll generated", body = ApiResponse<PayrollResponse>),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn generate_payroll(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(request): Json<GeneratePayrollRequest>,
) -> Result<Json<ApiResponse<PayrollResponse>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let employee = employee::Entity::find_by_id(request.employee_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let period = DateRange::new(request.period_start, request.period_end);
    let absences = compute::attendance::count_absences(&state.db, employee.id, period)
        .await
        .map_err(|e| {
            tracing::error!("Absence count failed: {}", e);
            ApiError::Internal
        })?;

    let figures = compute::compute_figures(
        employee.salary,
        absences,
        request.deductions.unwrap_or(Decimal::ZERO),
        request.bonuses.unwrap_or(Decimal::ZERO),
    );
    debug!(
        "Payroll for employee {} over {:?}: {} absences, net {}",
        employee.id, period, absences, figures.net_salary
    );

    let record = payroll::ActiveModel {
        employee_id: Set(employee.id),
        period_start: Set(request.period_start),
        period_end: Set(request.period_end),
        basic_salary: Set(figures.basic_salary),
        deductions: Set(figures.total_deductions),
        bonuses: Set(figures.bonuses),
        net_salary: Set(figures.net_salary),
        ..Default::default()
    };

    payroll::Entity::insert(record)
        .on_conflict(
            OnConflict::columns([
                payroll::Column::EmployeeId,
                payroll::Column::PeriodStart,
                payroll::Column::PeriodEnd,
            ])
            .update_columns([
                payroll::Column::BasicSalary,
                payroll::Column::Deductions,
                payroll::Column::Bonuses,
                payroll::Column::NetSalary,
            ])
            .to_owned(),
        )
        .exec(&state.db)
        .await?;

    let stored = payroll::Entity::find()
        .filter(payroll::Column::EmployeeId.eq(employee.id))
        .filter(payroll::Column::PeriodStart.eq(request.period_start))
        .filter(payroll::Column::PeriodEnd.eq(request.period_end))
        .one(&state.db)
        .await?
        .ok_or(ApiError::Internal)?;

    info!(
        "Payroll {} generated for employee {} by {}",
        stored.id, employee.id, actor.username
    );
    let response = ApiResponse {
        data: PayrollResponse::from_joined(stored, Some(employee)),
        message: "Payroll generated".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// List payroll records ordered by period end, newest first. ADMIN/HR see
/// all employees with names joined; EMPLOYEE sees only their own.
#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    tag = "payroll",
    responses(
        (status = 200, description = "Payroll retrieved successfully", body = ApiResponse<Vec<PayrollResponse>>),
        (status = 400, description = "No linked employee", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_payroll(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PayrollResponse>>>, ApiError> {
    let records = if actor.is_staff() {
        payroll::Entity::find()
            .find_also_related(employee::Entity)
            .order_by_desc(payroll::Column::PeriodEnd)
            .all(&state.db)
            .await?
    } else {
        let own = actor.require_employee()?;
        payroll::Entity::find()
            .filter(payroll::Column::EmployeeId.eq(own))
            .order_by_desc(payroll::Column::PeriodEnd)
            .all(&state.db)
            .await?
            .into_iter()
            .map(|record| (record, None))
            .collect()
    };

    debug!("Retrieved {} payroll records", records.len());
    let response = ApiResponse {
        data: records
            .into_iter()
            .map(|(record, emp)| PayrollResponse::from_joined(record, emp))
            .collect(),
        message: "Payroll retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Retrieve one payslip. EMPLOYEE may only view payslips belonging to
/// their own employee record.
#[utoipa::path(
    get,
    path = "/api/v1/payroll/{payroll_id}/payslip",
    tag = "payroll",
    params(
        ("payroll_id" = i32, Path, description = "Payroll ID"),
    ),
    responses(
        (status = 200, description = "Payslip retrieved successfully", body = ApiResponse<PayslipResponse>),
        (status = 403, description = "Payslip belongs to another employee", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Payslip not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn payslip(
    Extension(actor): Extension<CurrentUser>,
    Path(payroll_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PayslipResponse>>, ApiError> {
    let (record, emp) = payroll::Entity::find_by_id(payroll_id)
        .find_also_related(employee::Entity)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payslip not found".to_string()))?;

    if !actor.is_staff() && actor.employee_id != Some(record.employee_id) {
        return Err(ApiError::Forbidden);
    }

    // The cascade keeps payroll rows from outliving their employee
    let emp = emp.ok_or(ApiError::Internal)?;

    let response = ApiResponse {
        data: PayslipResponse {
            id: record.id,
            employee_id: record.employee_id,
            employee_name: emp.name,
            position: emp.position,
            email: emp.email,
            period_start: record.period_start,
            period_end: record.period_end,
            basic_salary: record.basic_salary,
            deductions: record.deductions,
            bonuses: record.bonuses,
            net_salary: record.net_salary,
        },
        message: "Payslip retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
