//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the office management application here:
//! login accounts, the organizational directory, and the attendance,
//! leave and payroll records that hang off employees.

pub mod attendance;
pub mod department;
pub mod employee;
pub mod leave_request;
pub mod payroll;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::attendance::Entity as Attendance;
    pub use super::department::Entity as Department;
    pub use super::employee::Entity as Employee;
    pub use super::leave_request::Entity as LeaveRequest;
    pub use super::payroll::Entity as Payroll;
    pub use super::user::Entity as User;
}
