use strum_macros::{AsRefStr, Display, EnumString};

/// Role values the backend accepts for `Employee.role`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString, AsRefStr)]
pub enum Role {
    Admin,
    DepartmentHead, // no space, API format
    DeputyHead,
    Employee,
}

impl Role {
    /// Role given to whoever heads a department.
    pub const HEAD: Role = Role::DepartmentHead;

    /// Role a demoted head falls back to.
    pub const DEFAULT: Role = Role::Employee;
}
