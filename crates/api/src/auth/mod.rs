//! Authentication building blocks: JWT access tokens, Argon2id password
//! hashing, and the session cookies the page gate reads.

pub mod cookies;
pub mod jwt;
pub mod password;
