use crate::auth::require_session;
use crate::handlers::{
    attendance::{list_attendance, mark_attendance},
    auth::{login, logout},
    dashboard::dashboard,
    departments::{create_department, delete_department, list_departments},
    employees::{create_employee, delete_employee, list_employees, update_employee},
    health::health_check,
    leaves::{act_on_leave, list_leaves, request_leave},
    payroll::{generate_payroll, list_payroll, payslip},
    profile::{get_profile, update_profile},
    reports::{attendance_report, payroll_report},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Everything except login and the health check sits behind the
    // session middleware.
    let protected = Router::new()
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/dashboard", get(dashboard))
        // Directory routes
        .route("/api/v1/departments", get(list_departments))
        .route("/api/v1/departments", post(create_department))
        .route("/api/v1/departments/:department_id", delete(delete_department))
        .route("/api/v1/employees", get(list_employees))
        .route("/api/v1/employees", post(create_employee))
        .route("/api/v1/employees/:employee_id", put(update_employee))
        .route("/api/v1/employees/:employee_id", delete(delete_employee))
        // Attendance routes
        .route("/api/v1/attendance", get(list_attendance))
        .route("/api/v1/attendance", post(mark_attendance))
        // Leave routes
        .route("/api/v1/leaves", get(list_leaves))
        .route("/api/v1/leaves", post(request_leave))
        .route("/api/v1/leaves/:leave_id/:action", post(act_on_leave))
        // Payroll routes
        .route("/api/v1/payroll", get(list_payroll))
        .route("/api/v1/payroll", post(generate_payroll))
        .route("/api/v1/payroll/:payroll_id/payslip", get(payslip))
        // Reports
        .route("/api/v1/reports/attendance", get(attendance_report))
        .route("/api/v1/reports/payroll", get(payroll_report))
        // Self-service profile
        .route("/api/v1/profile", get(get_profile))
        .route("/api/v1/profile", put(update_profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        // Health check and login stay public
        .route("/health", get(health_check))
        .route("/api/v1/auth/login", post(login))
        .merge(protected)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
