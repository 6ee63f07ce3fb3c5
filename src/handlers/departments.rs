use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use axum_valid::Valid;
use model::entities::{department, user::Role};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a department
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateDepartmentRequest {
    /// Department name, must be non-blank and unique
    #[validate(length(min = 1, message = "Department name required"))]
    pub name: String,
}

/// Department response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: i32,
    pub name: String,
}

impl From<department::Model> for DepartmentResponse {
    fn from(model: department::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// List all departments ordered by name
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    tag = "directory",
    responses(
        (status = 200, description = "Departments retrieved successfully", body = ApiResponse<Vec<DepartmentResponse>>),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_departments(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DepartmentResponse>>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let departments = department::Entity::find()
        .order_by_asc(department::Column::Name)
        .all(&state.db)
        .await?;

    debug!("Retrieved {} departments", departments.len());
    let response = ApiResponse {
        data: departments.into_iter().map(DepartmentResponse::from).collect(),
        message: "Departments retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Create a new department
#[utoipa::path(
    post,
    path = "/api/v1/departments",
    tag = "directory",
    request_body = CreateDepartmentRequest,
    responses(
        (status = 200, description = "Department created", body = ApiResponse<DepartmentResponse>),
        (status = 400, description = "Blank name", body = crate::schemas::ErrorResponse),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse),
        (status = 409, description = "Duplicate name", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_department(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateDepartmentRequest>>,
) -> Result<Json<ApiResponse<DepartmentResponse>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::Validation("Department name required".to_string()));
    }

    let created = department::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!("Department {} created by {}", created.name, actor.username);
    let response = ApiResponse {
        data: DepartmentResponse::from(created),
        message: "Department added".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete a department. Fails with a conflict when employees still
/// reference it.
#[utoipa::path(
    delete,
    path = "/api/v1/departments/{department_id}",
    tag = "directory",
    params(
        ("department_id" = i32, Path, description = "Department ID"),
    ),
    responses(
        (status = 200, description = "Department deleted", body = ApiResponse<String>),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Department not found", body = crate::schemas::ErrorResponse),
        (status = 409, description = "Department still has employees", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_department(
    Extension(actor): Extension<CurrentUser>,
    Path(department_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let result = department::Entity::delete_by_id(department_id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Department not found".to_string()));
    }

    info!("Department {} deleted by {}", department_id, actor.username);
    let response = ApiResponse {
        data: format!("Department {} deleted", department_id),
        message: "Department deleted".to_string(),
        success: true,
    };
    Ok(Json(response))
}
