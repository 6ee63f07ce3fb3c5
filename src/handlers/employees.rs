use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use axum_valid::Valid;
use model::entities::{department, employee, user::Role};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating an employee
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateEmployeeRequest {
    /// Employee name, required
    #[validate(length(min = 1, message = "Name required"))]
    pub name: String,
    /// Contact email, required
    #[validate(email(message = "Valid email required"))]
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department_id: Option<i32>,
    /// Monthly base salary (default: 0)
    pub salary: Option<Decimal>,
}

/// Request body for updating an employee
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department_id: Option<i32>,
    pub salary: Option<Decimal>,
}

/// Employee response model with the department name joined
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
    pub salary: Decimal,
}

impl EmployeeResponse {
    fn from_joined(model: employee::Model, dept: Option<department::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            position: model.position,
            department_id: model.department_id,
            department_name: dept.map(|d| d.name),
            salary: model.salary,
        }
    }
}

/// List all employees, newest first, with their department names
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    tag = "directory",
    responses(
        (status = 200, description = "Employees retrieved successfully", body = ApiResponse<Vec<EmployeeResponse>>),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_employees(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EmployeeResponse>>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let employees = employee::Entity::find()
        .find_also_related(department::Entity)
        .order_by_desc(employee::Column::Id)
        .all(&state.db)
        .await?;

    debug!("Retrieved {} employees", employees.len());
    let response = ApiResponse {
        data: employees
            .into_iter()
            .map(|(emp, dept)| EmployeeResponse::from_joined(emp, dept))
            .collect(),
        message: "Employees retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Create a new employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    tag = "directory",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 200, description = "Employee created", body = ApiResponse<EmployeeResponse>),
        (status = 400, description = "Missing name or email", body = crate::schemas::ErrorResponse),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse),
        (status = 409, description = "Constraint violation", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_employee(
    Extension(actor): Extension<CurrentUser>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateEmployeeRequest>>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let name = request.name.trim().to_string();
    let email = request.email.trim().to_string();
    if name.is_empty() || email.is_empty() {
        return Err(ApiError::Validation("Name and email required".to_string()));
    }

    let created = employee::ActiveModel {
        name: Set(name),
        email: Set(email),
        phone: Set(request.phone),
        position: Set(request.position),
        department_id: Set(request.department_id),
        salary: Set(request.salary.unwrap_or(Decimal::ZERO)),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!("Employee {} ({}) created by {}", created.name, created.id, actor.username);
    let response = ApiResponse {
        data: EmployeeResponse::from_joined(created, None),
        message: "Employee added".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}",
    tag = "directory",
    params(
        ("employee_id" = i32, Path, description = "Employee ID"),
    ),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = ApiResponse<EmployeeResponse>),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_employee(
    Extension(actor): Extension<CurrentUser>,
    Path(employee_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let existing = employee::Entity::find_by_id(employee_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let mut active: employee::ActiveModel = existing.into();
    if let Some(name) = request.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::Validation("Name required".to_string()));
        }
        active.name = Set(name);
    }
    if let Some(phone) = request.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(position) = request.position {
        active.position = Set(Some(position));
    }
    if request.department_id.is_some() {
        active.department_id = Set(request.department_id);
    }
    if let Some(salary) = request.salary {
        active.salary = Set(salary);
    }

    let updated = active.update(&state.db).await?;

    info!("Employee {} updated by {}", employee_id, actor.username);
    let response = ApiResponse {
        data: EmployeeResponse::from_joined(updated, None),
        message: "Employee updated".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete an employee. Dependent attendance, leave and payroll rows are
/// removed with it; a linked login account survives with its link cleared.
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{employee_id}",
    tag = "directory",
    params(
        ("employee_id" = i32, Path, description = "Employee ID"),
    ),
    responses(
        (status = 200, description = "Employee deleted", body = ApiResponse<String>),
        (status = 403, description = "Not permitted for this role", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_employee(
    Extension(actor): Extension<CurrentUser>,
    Path(employee_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    actor.require_role(&[Role::Admin, Role::Hr])?;

    let result = employee::Entity::delete_by_id(employee_id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    info!("Employee {} deleted by {}", employee_id, actor.username);
    let response = ApiResponse {
        data: format!("Employee {} deleted", employee_id),
        message: "Employee deleted".to_string(),
        success: true,
    };
    Ok(Json(response))
}
