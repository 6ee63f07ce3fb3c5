use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState};
use axum::{extract::State, response::Json, Extension};
use chrono::NaiveDate;
use model::entities::{attendance, attendance::AttendanceStatus, employee};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

const LISTING_LIMIT: u64 = 50;

/// Request body for marking a day's attendance
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MarkAttendanceRequest {
    /// Target employee. Required for ADMIN/HR; ignored for EMPLOYEE, whose
    /// own linked employee is always the target.
    pub employee_id: Option<i32>,
    /// Day to mark (default: today)
    pub date: Option<NaiveDate>,
    /// One of Present, Absent, Leave
    pub status: String,
}

/// Attendance record with the employee name joined where the caller may
/// see other employees
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecordResponse {
    pub id: i32,
    pub employee_id: i32,
    pub date: NaiveDate,
    pub status: String,
    pub employee_name: Option<String>,
}

impl AttendanceRecordResponse {
    fn from_joined(model: attendance::Model, emp: Option<employee::Model>) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            date: model.date,
            status: model.status.as_str().to_string(),
            employee_name: emp.map(|e| e.name),
        }
    }
}

/// Mark attendance for a day. The write is an upsert keyed on
/// (employee, date): marking the same day twice keeps one row with the
/// latest status.
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    tag = "attendance",
    request_body = MarkAttendanceRequest,
    responses(
        (status = 200, description = "Attendance recorded", body = ApiResponse<AttendanceRecordResponse>),
        (status = 400, description = "Unknown status or missing target", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn mark_attendance(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(request): Json<MarkAttendanceRequest>,
) -> Result<Json<ApiResponse<AttendanceRecordResponse>>, ApiError> {
    let status = AttendanceStatus::parse(&request.status)
        .ok_or_else(|| ApiError::Validation(format!("Unknown attendance status: {}", request.status)))?;

    // EMPLOYEE always marks their own record; the form field is not trusted.
    let target_employee = if actor.is_staff() {
        request
            .employee_id
            .ok_or_else(|| ApiError::Validation("employee_id required".to_string()))?
    } else {
        actor.require_employee()?
    };

    let date = request.date.unwrap_or_else(|| chrono::Utc::now().date_naive());

    // Unknown targets report not-found, not a constraint conflict
    employee::Entity::find_by_id(target_employee)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let record = attendance::ActiveModel {
        employee_id: Set(target_employee),
        date: Set(date),
        status: Set(status),
        ..Default::default()
    };

    attendance::Entity::insert(record)
        .on_conflict(
            OnConflict::columns([attendance::Column::EmployeeId, attendance::Column::Date])
                .update_column(attendance::Column::Status)
                .to_owned(),
        )
        .exec(&state.db)
        .await?;

    let stored = attendance::Entity::find()
        .filter(attendance::Column::EmployeeId.eq(target_employee))
        .filter(attendance::Column::Date.eq(date))
        .one(&state.db)
        .await?
        .ok_or(ApiError::Internal)?;

    info!(
        "Attendance for employee {} on {} set to {} by {}",
        target_employee,
        date,
        stored.status.as_str(),
        actor.username
    );
    let response = ApiResponse {
        data: AttendanceRecordResponse::from_joined(stored, None),
        message: "Attendance recorded".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// List attendance records, newest first. ADMIN/HR see the latest 50
/// across all employees with names joined; EMPLOYEE sees only their own.
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    tag = "attendance",
    responses(
        (status = 200, description = "Attendance retrieved successfully", body = ApiResponse<Vec<AttendanceRecordResponse>>),
        (status = 400, description = "No linked employee", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_attendance(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AttendanceRecordResponse>>>, ApiError> {
    let records = if actor.is_staff() {
        attendance::Entity::find()
            .find_also_related(employee::Entity)
            .order_by_desc(attendance::Column::Date)
            .limit(LISTING_LIMIT)
            .all(&state.db)
            .await?
    } else {
        let own = actor.require_employee()?;
        attendance::Entity::find()
            .filter(attendance::Column::EmployeeId.eq(own))
            .order_by_desc(attendance::Column::Date)
            .limit(LISTING_LIMIT)
            .all(&state.db)
            .await?
            .into_iter()
            .map(|record| (record, None))
            .collect()
    };

    debug!("Retrieved {} attendance records", records.len());
    let response = ApiResponse {
        data: records
            .into_iter()
            .map(|(record, emp)| AttendanceRecordResponse::from_joined(record, emp))
            .collect(),
        message: "Attendance retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
