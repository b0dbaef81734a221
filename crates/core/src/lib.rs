//! Domain logic for the SkillSwap platform.
//!
//! This crate has zero internal dependencies so the db/api layers and any
//! future CLI tooling can all build on it. It holds the typed error
//! taxonomy, the request-gate decision function, the application and post
//! state machines, notification kinds, and the pure feed-composition
//! helpers.

pub mod application;
pub mod error;
pub mod feed;
pub mod gate;
pub mod notification;
pub mod post;
pub mod types;
