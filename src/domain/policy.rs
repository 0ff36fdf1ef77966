//! Role-based access policy.
//!
//! One pure function decides every permission question in the system.
//! Services consult it before each mutation and each scoped read, so the
//! role × operation matrix lives in exactly one place.

use crate::domain::user::UserRole;
use crate::domain::{DomainError, DomainResult};

/// The authenticated principal performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i32,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: i32, role: UserRole) -> Self {
        Self { id, role }
    }
}

/// Every permission-gated operation.
///
/// For call reads/updates the owner is the call's operator; for
/// evaluation reads it is the parent call's operator; for evaluation
/// updates it is the original evaluator; for user-profile updates it is
/// the account itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadCall,
    CreateCall,
    UpdateCall,
    DeleteCall,
    ReadEvaluation,
    CreateEvaluation,
    UpdateEvaluation,
    DeleteEvaluation,
    UpdateUserProfile,
    UpdateUserAccount,
    ViewOperatorPerformance,
}

impl Action {
    fn describe(&self) -> &'static str {
        match self {
            Self::ReadCall => "view this call",
            Self::CreateCall => "create calls",
            Self::UpdateCall => "update this call",
            Self::DeleteCall => "delete calls",
            Self::ReadEvaluation => "view this evaluation",
            Self::CreateEvaluation => "create evaluations",
            Self::UpdateEvaluation => "update this evaluation",
            Self::DeleteEvaluation => "delete evaluations",
            Self::UpdateUserProfile => "update this user",
            Self::UpdateUserAccount => "change user roles or status",
            Self::ViewOperatorPerformance => "view operator performance",
        }
    }
}

/// Decide whether `actor` may perform `action` on a resource owned by
/// `resource_owner` (`None` for operations without an owned resource).
///
/// Denial is always `Forbidden`; callers resolve existence separately so
/// a missing resource stays `NotFound`.
pub fn authorize(actor: &Actor, action: Action, resource_owner: Option<i32>) -> DomainResult<()> {
    use Action::*;
    use UserRole::*;

    let owns = resource_owner == Some(actor.id);

    let allowed = match (actor.role, action) {
        (Admin, _) => true,

        (Supervisor, DeleteEvaluation | UpdateUserAccount) => false,
        (Supervisor, UpdateEvaluation | UpdateUserProfile) => owns,
        (Supervisor, _) => true,

        (Operator, CreateCall) => true,
        (Operator, ReadCall | UpdateCall | ReadEvaluation | UpdateUserProfile) => owns,
        (Operator, _) => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!(
            "No permission to {}",
            action.describe()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELF_ID: i32 = 10;
    const OTHER_ID: i32 = 20;

    fn allowed(role: UserRole, action: Action, owner: Option<i32>) -> bool {
        authorize(&Actor::new(SELF_ID, role), action, owner).is_ok()
    }

    /// The full role × operation matrix, own-resource and foreign-resource
    /// columns checked separately.
    #[test]
    fn matrix_is_exhaustive() {
        use Action::*;
        use UserRole::*;

        // (action, admin, supervisor, operator) — for own resources.
        let own: &[(Action, bool, bool, bool)] = &[
            (ReadCall, true, true, true),
            (CreateCall, true, true, true),
            (UpdateCall, true, true, true),
            (DeleteCall, true, true, false),
            (ReadEvaluation, true, true, true),
            (CreateEvaluation, true, true, false),
            (UpdateEvaluation, true, true, false),
            (DeleteEvaluation, true, false, false),
            (UpdateUserProfile, true, true, true),
            (UpdateUserAccount, true, false, false),
            (ViewOperatorPerformance, true, true, false),
        ];

        // Same matrix for resources owned by someone else.
        let foreign: &[(Action, bool, bool, bool)] = &[
            (ReadCall, true, true, false),
            (CreateCall, true, true, true),
            (UpdateCall, true, true, false),
            (DeleteCall, true, true, false),
            (ReadEvaluation, true, true, false),
            (CreateEvaluation, true, true, false),
            (UpdateEvaluation, true, false, false),
            (DeleteEvaluation, true, false, false),
            (UpdateUserProfile, true, false, false),
            (UpdateUserAccount, true, false, false),
            (ViewOperatorPerformance, true, true, false),
        ];

        for &(action, admin, supervisor, operator) in own {
            let owner = Some(SELF_ID);
            assert_eq!(allowed(Admin, action, owner), admin, "admin own {:?}", action);
            assert_eq!(
                allowed(Supervisor, action, owner),
                supervisor,
                "supervisor own {:?}",
                action
            );
            assert_eq!(
                allowed(Operator, action, owner),
                operator,
                "operator own {:?}",
                action
            );
        }

        for &(action, admin, supervisor, operator) in foreign {
            let owner = Some(OTHER_ID);
            assert_eq!(allowed(Admin, action, owner), admin, "admin foreign {:?}", action);
            assert_eq!(
                allowed(Supervisor, action, owner),
                supervisor,
                "supervisor foreign {:?}",
                action
            );
            assert_eq!(
                allowed(Operator, action, owner),
                operator,
                "operator foreign {:?}",
                action
            );
        }
    }

    #[test]
    fn denial_is_forbidden_kind() {
        let err = authorize(
            &Actor::new(SELF_ID, UserRole::Operator),
            Action::DeleteCall,
            Some(SELF_ID),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn ownerless_actions_deny_own_only_roles() {
        // Performance view carries no owner; operators are still denied.
        assert!(!allowed(UserRole::Operator, Action::ViewOperatorPerformance, None));
        assert!(allowed(UserRole::Supervisor, Action::ViewOperatorPerformance, None));
    }
}
