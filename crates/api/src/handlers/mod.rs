//! HTTP handlers, one module per resource.

pub mod application;
pub mod auth;
pub mod cron;
pub mod feed;
pub mod notification;
pub mod pages;
pub mod post;
pub mod profile;
