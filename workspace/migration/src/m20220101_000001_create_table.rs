use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(pk_auto(Departments::Id))
                    .col(string(Departments::Name).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create employees table
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(pk_auto(Employees::Id))
                    .col(string(Employees::Name))
                    .col(string(Employees::Email))
                    .col(string_null(Employees::Phone))
                    .col(string_null(Employees::Position))
                    .col(integer_null(Employees::DepartmentId))
                    .col(decimal_len(Employees::Salary, 12, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_department")
                            .from(Employees::Table, Employees::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string_len(Users::Role, 20))
                    .col(integer_null(Users::EmployeeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_employee")
                            .from(Users::Table, Users::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create attendance table
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(pk_auto(Attendance::Id))
                    .col(integer(Attendance::EmployeeId))
                    .col(date(Attendance::Date))
                    .col(string_len(Attendance::Status, 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_employee")
                            .from(Attendance::Table, Attendance::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Natural key for the attendance upsert
        manager
            .create_index(
                Index::create()
                    .name("uq_attendance_employee_date")
                    .table(Attendance::Table)
                    .col(Attendance::EmployeeId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create leave_requests table
        manager
            .create_table(
                Table::create()
                    .table(LeaveRequests::Table)
                    .if_not_exists()
                    .col(pk_auto(LeaveRequests::Id))
                    .col(integer(LeaveRequests::EmployeeId))
                    .col(date(LeaveRequests::StartDate))
                    .col(date(LeaveRequests::EndDate))
                    .col(string_len(LeaveRequests::Status, 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_request_employee")
                            .from(LeaveRequests::Table, LeaveRequests::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create payroll table
        manager
            .create_table(
                Table::create()
                    .table(Payroll::Table)
                    .if_not_exists()
                    .col(pk_auto(Payroll::Id))
                    .col(integer(Payroll::EmployeeId))
                    .col(date(Payroll::PeriodStart))
                    .col(date(Payroll::PeriodEnd))
                    .col(decimal_len(Payroll::BasicSalary, 12, 2))
                    .col(decimal_len(Payroll::Deductions, 12, 2))
                    .col(decimal_len(Payroll::Bonuses, 12, 2))
                    .col(decimal_len(Payroll::NetSalary, 12, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payroll_employee")
                            .from(Payroll::Table, Payroll::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Natural key for the payroll upsert
        manager
            .create_index(
                Index::create()
                    .name("uq_payroll_employee_period")
                    .table(Payroll::Table)
                    .col(Payroll::EmployeeId)
                    .col(Payroll::PeriodStart)
                    .col(Payroll::PeriodEnd)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payroll::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeaveRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Position,
    DepartmentId,
    Salary,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Role,
    EmployeeId,
}

#[derive(DeriveIden)]
enum Attendance {
    Table,
    Id,
    EmployeeId,
    Date,
    Status,
}

#[derive(DeriveIden)]
enum LeaveRequests {
    Table,
    Id,
    EmployeeId,
    StartDate,
    EndDate,
    Status,
}

#[derive(DeriveIden)]
enum Payroll {
    Table,
    Id,
    EmployeeId,
    PeriodStart,
    PeriodEnd,
    BasicSalary,
    Deductions,
    Bonuses,
    NetSalary,
}
