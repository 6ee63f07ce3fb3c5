use common::{EmployeeAttendanceSummary, PayrollSummaryRow};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for the report aggregations
    pub cache: Cache<String, CachedData>,
    /// Secret that signs session tokens
    pub session_secret: String,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    AttendanceReport(Vec<EmployeeAttendanceSummary>),
    PayrollReport(Vec<PayrollSummaryRow>),
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Stable machine-readable error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::dashboard::dashboard,
        crate::handlers::departments::list_departments,
        crate::handlers::departments::create_department,
        crate::handlers::departments::delete_department,
        crate::handlers::employees::list_employees,
        crate::handlers::employees::create_employee,
        crate::handlers::employees::update_employee,
        crate::handlers::employees::delete_employee,
        crate::handlers::attendance::mark_attendance,
        crate::handlers::attendance::list_attendance,
        crate::handlers::leaves::request_leave,
        crate::handlers::leaves::list_leaves,
        crate::handlers::leaves::act_on_leave,
        crate::handlers::payroll::generate_payroll,
        crate::handlers::payroll::list_payroll,
        crate::handlers::payroll::payslip,
        crate::handlers::reports::attendance_report,
        crate::handlers::reports::payroll_report,
        crate::handlers::profile::get_profile,
        crate::handlers::profile::update_profile,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::LoginResponse,
            crate::handlers::dashboard::DashboardResponse,
            crate::handlers::departments::CreateDepartmentRequest,
            crate::handlers::departments::DepartmentResponse,
            crate::handlers::employees::CreateEmployeeRequest,
            crate::handlers::employees::UpdateEmployeeRequest,
            crate::handlers::employees::EmployeeResponse,
            crate::handlers::attendance::MarkAttendanceRequest,
            crate::handlers::attendance::AttendanceRecordResponse,
            crate::handlers::leaves::RequestLeaveRequest,
            crate::handlers::leaves::LeaveResponse,
            crate::handlers::payroll::GeneratePayrollRequest,
            crate::handlers::payroll::PayrollResponse,
            crate::handlers::payroll::PayslipResponse,
            crate::handlers::profile::UpdateProfileRequest,
            crate::handlers::profile::ProfileResponse,
            common::EmployeeAttendanceSummary,
            common::PayrollSummaryRow,
            common::DateRange,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Login and logout"),
        (name = "dashboard", description = "Role-aware dashboard counters"),
        (name = "directory", description = "Departments and employees"),
        (name = "attendance", description = "Daily attendance marking and listing"),
        (name = "leaves", description = "Leave requests and approvals"),
        (name = "payroll", description = "Payroll generation and payslips"),
        (name = "reports", description = "Read-only aggregate reports"),
        (name = "profile", description = "Employee self-service profile"),
    ),
    info(
        title = "OEMS API",
        description = "Office Employee Management Service - directory, attendance, leave and payroll over one relational database",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
