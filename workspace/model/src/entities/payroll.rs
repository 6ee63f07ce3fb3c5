use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// One payroll row per employee per period, enforced by a unique
/// (employee_id, period_start, period_end) index. Re-generating a period
/// overwrites the stored figures rather than stacking new rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payroll")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub basic_salary: Decimal,
    /// Manual deductions plus the automatic per-absence deduction.
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub deductions: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub bonuses: Decimal,
    /// Clamped at zero: never negative.
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub net_salary: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
