//! Notification kinds and link targets.
//!
//! Kinds are stable string identifiers persisted in the `notifications`
//! table; clients switch on them to pick icons and wording.

use crate::types::DbId;

pub const KIND_APPLICATION_RECEIVED: &str = "application_received";
pub const KIND_APPLICATION_ACCEPTED: &str = "application_accepted";
pub const KIND_APPLICATION_REJECTED: &str = "application_rejected";
pub const KIND_POST_CLOSED: &str = "post_closed";

/// Link target for a post detail page.
pub fn post_link(post_id: DbId) -> String {
    format!("/posts/{post_id}")
}
