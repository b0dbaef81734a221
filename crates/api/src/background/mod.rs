//! In-process background jobs.

pub mod post_expiry;
