//! Identity of the caller performing an operation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is asking.
///
/// Internal services authenticate with signed service tokens instead of an
/// account session, so privileged lookups distinguish the two caller kinds
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    /// A logged-in account, identified by its ID
    Account(Uuid),
    /// A sibling service, identified by its verified token subject
    Service(String),
}

impl Actor {
    /// The account ID if the actor is an account
    pub fn account_id(&self) -> Option<Uuid> {
        match self {
            Actor::Account(id) => Some(*id),
            Actor::Service(_) => None,
        }
    }

    /// Whether the actor is an internal service
    pub fn is_service(&self) -> bool {
        matches!(self, Actor::Service(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_accessors() {
        let id = Uuid::new_v4();
        let account = Actor::Account(id);
        let service = Actor::Service("order".to_string());

        assert_eq!(account.account_id(), Some(id));
        assert!(!account.is_service());
        assert_eq!(service.account_id(), None);
        assert!(service.is_service());
    }
}
