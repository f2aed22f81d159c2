//! Actor identity and role-based authorization.
//!
//! The engine never reads the caller's identity from ambient state. Every
//! mutating operation takes an explicit `Option<&Actor>`: `None` means no
//! authenticated caller (Unauthorized), an actor without the required role
//! means Forbidden. Token verification happens upstream; this module only
//! models the verified claims.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried by an authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub email: String,
    pub role: Role,
}

impl Actor {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }
}

/// Capability check consulted once per mutating operation.
pub trait Authorizer: Send + Sync {
    fn has_role(&self, actor: &Actor, role: Role) -> bool;
}

/// Default authorizer: an actor holds exactly the role on its claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAuthorizer;

impl Authorizer for RoleAuthorizer {
    fn has_role(&self, actor: &Actor, role: Role) -> bool {
        actor.role == role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("principal".parse::<Role>().is_err());
    }

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn role_authorizer_matches_exact_role() {
        let authorizer = RoleAuthorizer;
        let admin = Actor::new("head@school.edu.np", Role::Admin);
        let teacher = Actor::new("t@school.edu.np", Role::Teacher);

        assert!(authorizer.has_role(&admin, Role::Admin));
        assert!(!authorizer.has_role(&teacher, Role::Admin));
        assert!(authorizer.has_role(&teacher, Role::Teacher));
    }
}
