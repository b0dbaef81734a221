//! Application status constants and state machine.
//!
//! An application is one user's request to join another user's post. It is
//! created `pending` and moves to exactly one of the other states. The
//! machine is shared by the API layer and the repository tests.

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_CANCELLED: &str = "cancelled";

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Who is allowed to perform a given transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The author of the post the application targets.
    PostAuthor,
    /// The user who submitted the application.
    Applicant,
}

/// Returns the set of statuses reachable from `from`.
///
/// `rejected` and `cancelled` are terminal. `accepted` can still be
/// cancelled by the applicant (withdrawing from an accepted application).
pub fn valid_transitions(from: &str) -> &'static [&'static str] {
    match from {
        STATUS_PENDING => &[STATUS_ACCEPTED, STATUS_REJECTED, STATUS_CANCELLED],
        STATUS_ACCEPTED => &[STATUS_CANCELLED],
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: &str, to: &str) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a transition, returning an error message for invalid ones.
pub fn validate_transition(from: &str, to: &str) -> Result<(), String> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(format!("Invalid application transition: {from} -> {to}"))
    }
}

/// The actor entitled to move an application into `to`.
///
/// Accepting and rejecting belong to the post author; cancelling belongs
/// to the applicant. Unknown statuses have no entitled actor.
pub fn required_actor(to: &str) -> Option<Actor> {
    match to {
        STATUS_ACCEPTED | STATUS_REJECTED => Some(Actor::PostAuthor),
        STATUS_CANCELLED => Some(Actor::Applicant),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Valid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_accepted() {
        assert!(can_transition(STATUS_PENDING, STATUS_ACCEPTED));
    }

    #[test]
    fn pending_to_rejected() {
        assert!(can_transition(STATUS_PENDING, STATUS_REJECTED));
    }

    #[test]
    fn pending_to_cancelled() {
        assert!(can_transition(STATUS_PENDING, STATUS_CANCELLED));
    }

    #[test]
    fn accepted_to_cancelled() {
        assert!(can_transition(STATUS_ACCEPTED, STATUS_CANCELLED));
    }

    // -----------------------------------------------------------------------
    // Terminal states
    // -----------------------------------------------------------------------

    #[test]
    fn rejected_has_no_transitions() {
        assert!(valid_transitions(STATUS_REJECTED).is_empty());
    }

    #[test]
    fn cancelled_has_no_transitions() {
        assert!(valid_transitions(STATUS_CANCELLED).is_empty());
    }

    // -----------------------------------------------------------------------
    // Invalid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn accepted_to_rejected_invalid() {
        assert!(!can_transition(STATUS_ACCEPTED, STATUS_REJECTED));
    }

    #[test]
    fn rejected_to_accepted_invalid() {
        assert!(!can_transition(STATUS_REJECTED, STATUS_ACCEPTED));
    }

    #[test]
    fn cancelled_to_pending_invalid() {
        assert!(!can_transition(STATUS_CANCELLED, STATUS_PENDING));
    }

    #[test]
    fn unknown_status_has_no_transitions() {
        assert!(valid_transitions("archived").is_empty());
    }

    #[test]
    fn validate_transition_err_names_both_states() {
        let err = validate_transition(STATUS_REJECTED, STATUS_ACCEPTED).unwrap_err();
        assert!(err.contains("rejected"));
        assert!(err.contains("accepted"));
    }

    // -----------------------------------------------------------------------
    // Actor entitlement
    // -----------------------------------------------------------------------

    #[test]
    fn author_accepts_and_rejects() {
        assert_eq!(required_actor(STATUS_ACCEPTED), Some(Actor::PostAuthor));
        assert_eq!(required_actor(STATUS_REJECTED), Some(Actor::PostAuthor));
    }

    #[test]
    fn applicant_cancels() {
        assert_eq!(required_actor(STATUS_CANCELLED), Some(Actor::Applicant));
    }

    #[test]
    fn no_actor_for_unknown_status() {
        assert_eq!(required_actor("archived"), None);
    }
}
