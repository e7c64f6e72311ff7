//! Caller identity supplied by the external auth service
//!
//! The identity lookup happens outside this workspace; components here only
//! read the resulting value. The project-role resolution mirrors the realm
//! role naming scheme used platform-wide: `<project>-admin`,
//! `<project>-contributor`, `<project>-collaborator`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Platform-wide administrator role name
const PLATFORM_ADMIN_ROLE: &str = "admin";

/// Role suffixes a user may hold within a project realm
const PROJECT_ROLE_SUFFIXES: [&str; 3] = ["admin", "contributor", "collaborator"];

/// Read-only identity of the calling user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique user identifier from the auth service
    pub user_id: String,
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Platform role ("admin" or "member")
    pub role: String,
    /// Realm-scoped role strings, e.g. "testproject-contributor"
    pub realm_roles: HashSet<String>,
    /// Opaque bearer token the identity was resolved from
    pub token: String,
}

impl Identity {
    /// True when the user is a platform administrator
    pub fn is_platform_admin(&self) -> bool {
        self.role == PLATFORM_ADMIN_ROLE
    }

    /// Resolve the user's role within a project
    ///
    /// Platform admins resolve to "platform-admin" regardless of realm
    /// roles. Everyone else gets the intersection of their realm roles with
    /// the `<project>-<suffix>` candidates, or `None` when they hold no role
    /// in the project.
    pub fn project_role(&self, project_code: &str) -> Option<String> {
        if self.is_platform_admin() {
            return Some("platform-admin".to_string());
        }
        PROJECT_ROLE_SUFFIXES
            .iter()
            .map(|suffix| format!("{project_code}-{suffix}"))
            .find(|candidate| self.realm_roles.contains(candidate))
    }

    /// True when the user holds any role in the given project
    pub fn is_project_member(&self, project_code: &str) -> bool {
        self.project_role(project_code).is_some()
    }
}
