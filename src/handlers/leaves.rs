use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use chrono::NaiveDate;
use model::entities::{employee, leave_request, leave_request::LeaveStatus, user::Role};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

const LISTING_LIMIT: u64 = 100;

/// Request body for submitting a leave request
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RequestLeaveRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Leave request response, with the employee name joined for staff
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaveResponse {
    pub id: i32,
    pub employee_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub employee_name: Option<String>,
}

impl LeaveResponse {
    fn from_joined(model: leave_request::Model, emp: Option<employee::Model>) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            start_date: model.start_date,
            end_date: model.end_date,
            status: model.status.as_str().to_string(),
            employee_name: emp.map(|e| e.name),
        }
    }
}

/// Submit a leave request. Only the EMPLOYEE role may submit, and every
/// request starts out Pending.
#[utoipa::path(
    post,
    path = "/api/v1/leaves",
    tag = "leaves",
    request_body = RequestLeaveRequest,
    responses(
        (status = 200, description = "Leave requested", body = ApiResponse<LeaveResponse>),
        (status = 400, description = "start_date after end_date", body = crate::schemas::ErrorResponse),
        (status = 403, description = "Not an employee", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn request_leave(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(request): Json<RequestLeaveRequest>,
) -> Result<Json<ApiResponse<LeaveResponse>>, ApiError> {
    actor.require_role(&[Role::Employee])?;
    let employee_id = actor.require_employee()?;

    if request.start_date > request.end_date {
        return Err(ApiError::Validation(
            "start_date must not be after end_date".to_string(),
        ));
    }

    let created = leave_request::ActiveModel {
        employee_id: Set(employee_id),
        start_date: Set(request.start_date),
        end_date: Set(request.end_date),
        status: Set(LeaveStatus::Pending),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(
        "Leave {} requested by employee {} for {}..{}",
        created.id, employee_id, created.start_date, created.end_date
    );
    let response = ApiResponse {
        data: LeaveResponse::from_joined(created, None),
        message: "Leave requested".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// List leave requests, newest first. ADMIN/HR see the latest 100 across
/// all employees with names joined; EMPLOYEE sees only their own.
#[utoipa::path(
    get,
    path = "/api/v1/leaves",
    tag = "leaves",
    responses(
        (status = 200, description = "Leaves retrieved successfully", body = ApiResponse<Vec<LeaveResponse>>),
        (status = 400, description = "No linked employee", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_leaves(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LeaveResponse>>>, ApiError> {
    let leaves = if actor.is_staff() {
        leave_request::Entity::find()
            .find_also_related(employee::Entity)
            .order_by_desc(leave_request::Column::Id)
            .limit(LISTING_LIMIT)
            .all(&state.db)
            .await?
    } else {
        let own = actor.require_employee()?;
        leave_request::Entity::find()
            .filter(leave_request::Column::EmployeeId.eq(own))
            .order_by_desc(leave_request::Column::Id)
            .limit(LISTING_LIMIT)
            .all(&state.db)
            .await?
            .into_iter()
            .map(|leave| (leave, None))
            .collect()
    };

    debug!("Retrieved {} leave requests", leaves.len());
    let response = ApiResponse {
        data: leaves
            .into_iter()
            .map(|(leave, emp)| LeaveResponse::from_joined(leave, emp))
            .collect(),
        message: "Leaves retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Approve or reject a pending leave request. The action path segment must
/// be Approved or Rejected; a request that already left Pending stays put.
#[utoipa::path(
    post,
    path = "/api/v1/leaves/{leave_id}/{action}",
    tag = "leaves",
    params(
        ("leave_id" = i32, Path, description = "Leave request ID"),
        ("action" = String, Path, description = "Approved or Rejected"),
    ),
    responses(
        (status = 200, description = "Leave actioned", body = ApiResponse<LeaveResponse>),
        (status = 400, description = "Invalid action or already actioned", body = crate::schemas::ErrorResponse),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Leave not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn act_on_leave(
    Extension(actor): Extension<CurrentUser>,
    Path((leave_id, action)): Path<(i32, String)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LeaveResponse>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let status = match action.as_str() {
        "Approved" => LeaveStatus::Approved,
        "Rejected" => LeaveStatus::Rejected,
        other => {
            return Err(ApiError::InvalidAction(format!("Invalid action: {}", other)));
        }
    };

    let leave = leave_request::Entity::find_by_id(leave_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Leave request not found".to_string()))?;

    if leave.status != LeaveStatus::Pending {
        return Err(ApiError::InvalidAction(format!(
            "Leave is already {}",
            leave.status.as_str()
        )));
    }

    let mut active: leave_request::ActiveModel = leave.into();
    active.status = Set(status);
    let updated = active.update(&state.db).await?;

    info!(
        "Leave {} {} by {}",
        leave_id,
        updated.status.as_str().to_lowercase(),
        actor.username
    );
    let message = format!("Leave {}", updated.status.as_str().to_lowercase());
    let response = ApiResponse {
        data: LeaveResponse::from_joined(updated, None),
        message,
        success: true,
    };
    Ok(Json(response))
}
