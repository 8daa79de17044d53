use super::principal::Principal;

/// Lifecycle of an authenticated context
///
/// ```text
/// Anonymous --login--> Authenticated --logout--> Terminated
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No token presented
    Anonymous,
    /// Live session; the principal's roles were read from the store just now
    Authenticated(Principal),
    /// Token is genuine but its session was logged out or has expired
    Terminated,
}

impl SessionState {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionState::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }

    pub fn into_principal(self) -> Option<Principal> {
        match self {
            SessionState::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }
}
