use std::fmt;

/// Operations the policy engine decides on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
    /// Create, rename, delete roles; grant and revoke membership
    ManageRoles,
    /// Create, inspect and delete user accounts
    ManageUsers,
}

impl Operation {
    pub fn requires_authentication(self) -> bool {
        !matches!(self, Operation::Read)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::ManageRoles => "manage_roles",
            Operation::ManageUsers => "manage_users",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The attributes of a protected resource the policy looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceRef {
    /// Owner reference (assigned manager) as currently stored
    pub owner_id: Option<i32>,
}

impl ResourceRef {
    pub fn owned_by(owner_id: Option<i32>) -> Self {
        Self { owner_id }
    }
}

/// What an allowed caller may change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every field, including the owner reference
    Full,
    /// Descriptive fields only; owner reference changes are dropped
    DescriptiveOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    Forbidden,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::Unauthenticated => f.write_str("unauthenticated"),
            DenyReason::Forbidden => f.write_str("forbidden"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow(Scope),
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }
}
