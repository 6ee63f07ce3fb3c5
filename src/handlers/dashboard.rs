use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::handlers::payroll::PayrollResponse;
use crate::schemas::{ApiResponse, AppState};
use axum::{extract::State, response::Json, Extension};
use model::entities::{attendance, department, employee, leave_request, leave_request::LeaveStatus, payroll};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

/// Dashboard counters, plus the caller's own today/payroll snapshot when
/// the session is linked to an employee record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub employees: u64,
    pub departments: u64,
    pub pending_leaves: u64,
    /// Today's attendance status for the linked employee, "Not Marked"
    /// when nothing was recorded yet
    pub today_status: Option<String>,
    pub last_payroll: Option<PayrollResponse>,
}

/// Role-aware dashboard counters
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard retrieved successfully", body = ApiResponse<DashboardResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn dashboard(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let employees = employee::Entity::find().count(&state.db).await?;
    let departments = department::Entity::find().count(&state.db).await?;
    let pending_leaves = leave_request::Entity::find()
        .filter(leave_request::Column::Status.eq(LeaveStatus::Pending))
        .count(&state.db)
        .await?;

    let mut today_status = None;
    let mut last_payroll = None;
    if let Some(employee_id) = actor.employee_id {
        let today = chrono::Utc::now().date_naive();
        let marked = attendance::Entity::find()
            .filter(attendance::Column::EmployeeId.eq(employee_id))
            .filter(attendance::Column::Date.eq(today))
            .one(&state.db)
            .await?;
        today_status = Some(
            marked
                .map(|record| record.status.as_str().to_string())
                .unwrap_or_else(|| "Not Marked".to_string()),
        );

        last_payroll = payroll::Entity::find()
            .filter(payroll::Column::EmployeeId.eq(employee_id))
            .order_by_desc(payroll::Column::PeriodEnd)
            .one(&state.db)
            .await?
            .map(|record| PayrollResponse::from_joined(record, None));
    }

    let response = ApiResponse {
        data: DashboardResponse {
            employees,
            departments,
            pending_leaves,
            today_status,
            last_payroll,
        },
        message: "Dashboard retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
