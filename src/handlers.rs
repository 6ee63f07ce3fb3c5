pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod employees;
pub mod health;
pub mod leaves;
pub mod payroll;
pub mod profile;
pub mod reports;
