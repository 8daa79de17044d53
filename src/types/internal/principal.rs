use serde::Serialize;

/// Name of the role that short-circuits every policy check
pub const ADMIN_ROLE: &str = "Admin";

/// Default role for ordinary accounts
pub const USER_ROLE: &str = "User";

/// The authenticated caller with the role set resolved for this call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: i32,
    pub username: String,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(user_id: i32, username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            roles,
        }
    }

    /// Role names compare case-insensitively, matching role name uniqueness
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}
