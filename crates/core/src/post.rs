//! Post status constants and lifecycle rules.

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_OPEN: &str = "open";
pub const STATUS_CLOSED: &str = "closed";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Post kinds: an offer to teach, or a request to learn.
pub const KIND_TEACH: &str = "teach";
pub const KIND_LEARN: &str = "learn";

/// Reason recorded when a post is closed by the expiry batch.
pub const CLOSED_REASON_DEADLINE: &str = "deadline";

/// Reason recorded when the author closes a post by hand.
pub const CLOSED_REASON_MANUAL: &str = "manual";

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Statuses an author can move an open post into. All post transitions
/// start from `open`; closed/completed/cancelled are terminal.
pub fn valid_transitions(from: &str) -> &'static [&'static str] {
    match from {
        STATUS_OPEN => &[STATUS_CLOSED, STATUS_COMPLETED, STATUS_CANCELLED],
        _ => &[],
    }
}

/// Check whether a post transition is valid.
pub fn can_transition(from: &str, to: &str) -> bool {
    valid_transitions(from).contains(&to)
}

/// Check whether `kind` is a recognized post kind.
pub fn is_valid_kind(kind: &str) -> bool {
    kind == KIND_TEACH || kind == KIND_LEARN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_can_close_complete_cancel() {
        assert!(can_transition(STATUS_OPEN, STATUS_CLOSED));
        assert!(can_transition(STATUS_OPEN, STATUS_COMPLETED));
        assert!(can_transition(STATUS_OPEN, STATUS_CANCELLED));
    }

    #[test]
    fn terminal_statuses_have_no_transitions() {
        for status in [STATUS_CLOSED, STATUS_COMPLETED, STATUS_CANCELLED] {
            assert!(valid_transitions(status).is_empty(), "{status}");
        }
    }

    #[test]
    fn closed_cannot_reopen() {
        assert!(!can_transition(STATUS_CLOSED, STATUS_OPEN));
    }

    #[test]
    fn kinds() {
        assert!(is_valid_kind(KIND_TEACH));
        assert!(is_valid_kind(KIND_LEARN));
        assert!(!is_valid_kind("mentor"));
    }
}
