use crate::entities::UserId;

/// Request-scoped context handed to every mutating service call.
///
/// Carries the already-authenticated acting identity. The service never
/// resolves identity on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    acting_user_id: UserId,
}

impl RequestContext {
    pub fn new(acting_user_id: UserId) -> Self {
        Self { acting_user_id }
    }

    pub fn acting_user_id(&self) -> UserId {
        self.acting_user_id
    }
}
