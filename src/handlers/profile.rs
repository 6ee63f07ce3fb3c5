use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState};
use axum::{extract::State, response::Json, Extension};
use model::entities::{department, employee};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Request body for the self-service profile update. Only name and phone
/// are writable; everything else on the employee record is HR's business.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone: Option<String>,
}

/// The caller's own employee record with the department name joined
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub employee_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department_name: Option<String>,
    pub salary: Decimal,
}

fn profile_from(model: employee::Model, dept: Option<department::Model>) -> ProfileResponse {
    ProfileResponse {
        employee_id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        position: model.position,
        department_name: dept.map(|d| d.name),
        salary: model.salary,
    }
}

/// View the caller's own employee record
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<ProfileResponse>),
        (status = 400, description = "No linked employee", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Linked employee no longer exists", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_profile(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let employee_id = actor.require_employee()?;

    let (emp, dept) = employee::Entity::find_by_id(employee_id)
        .find_also_related(department::Entity)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee record not found".to_string()))?;

    let response = ApiResponse {
        data: profile_from(emp, dept),
        message: "Profile retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update the caller's own name and phone
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    tag = "profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ProfileResponse>),
        (status = 400, description = "No linked employee or blank name", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Linked employee no longer exists", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_profile(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let employee_id = actor.require_employee()?;

    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::Validation("Name required".to_string()));
    }

    let existing = employee::Entity::find_by_id(employee_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee record not found".to_string()))?;

    let mut active: employee::ActiveModel = existing.into();
    active.name = Set(name);
    active.phone = Set(request.phone);
    let updated = active.update(&state.db).await?;

    info!("Profile of employee {} updated by {}", employee_id, actor.username);

    let dept = match updated.department_id {
        Some(dept_id) => department::Entity::find_by_id(dept_id).one(&state.db).await?,
        None => None,
    };

    let response = ApiResponse {
        data: profile_from(updated, dept),
        message: "Profile updated".to_string(),
        success: true,
    };
    Ok(Json(response))
}
