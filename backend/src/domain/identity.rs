//! Caller identity passed explicitly into every mutating service call.

use super::UserId;

/// The authenticated user acting on a request.
///
/// Built by an inbound adapter from whatever the upstream authentication
/// collaborator attached to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
}

impl Identity {
    /// Act as `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// The acting user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
