//! Role hierarchy for payroll operations.
//!
//! Roles are ranked by level; a user may perform an operation when their
//! level is at least the level of the role it requires. The session layer in
//! front of the API supplies the caller's role in the [`USER_ROLE_HEADER`]
//! request header.

use std::fmt;

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Header carrying the authenticated caller's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The role required to preview or process payroll.
pub const PAYROLL_ROLE: Role = Role::HrManager;

/// A user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Managing director.
    ManagingDirector,
    /// System super administrator.
    SuperAdmin,
    /// HR manager.
    HrManager,
    /// Accountant.
    Accountant,
    /// Department head.
    DeptHead,
    /// Section head.
    SectionHead,
    /// Line manager.
    Manager,
    /// Regular employee.
    Employee,
    /// Unauthenticated or unrecognised caller.
    Guest,
}

impl Role {
    /// Returns the role's rank in the hierarchy.
    pub fn level(self) -> u8 {
        match self {
            Role::ManagingDirector => 6,
            Role::SuperAdmin => 5,
            Role::HrManager | Role::Accountant => 4,
            Role::DeptHead => 3,
            Role::SectionHead => 2,
            Role::Manager => 1,
            Role::Employee | Role::Guest => 0,
        }
    }

    /// Returns the role's wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::ManagingDirector => "managing_director",
            Role::SuperAdmin => "super_admin",
            Role::HrManager => "hr_manager",
            Role::Accountant => "accountant",
            Role::DeptHead => "dept_head",
            Role::SectionHead => "section_head",
            Role::Manager => "manager",
            Role::Employee => "employee",
            Role::Guest => "guest",
        }
    }

    /// Parses a role name, falling back to [`Role::Guest`] for anything
    /// unrecognised.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "managing_director" => Role::ManagingDirector,
            "super_admin" => Role::SuperAdmin,
            "hr_manager" => Role::HrManager,
            "accountant" => Role::Accountant,
            "dept_head" => Role::DeptHead,
            "section_head" => Role::SectionHead,
            "manager" => Role::Manager,
            "employee" => Role::Employee,
            _ => Role::Guest,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if `user` ranks at or above `required`.
pub fn has_permission(user: Role, required: Role) -> bool {
    user.level() >= required.level()
}

/// Reads the caller's role from request headers.
///
/// A missing or non-UTF-8 header yields [`Role::Guest`].
pub fn role_from_headers(headers: &HeaderMap) -> Role {
    headers
        .get(USER_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(Role::parse)
        .unwrap_or(Role::Guest)
}
