//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod block_repo;
pub mod category_repo;
pub mod like_repo;
pub mod notification_repo;
pub mod post_repo;
pub mod profile_repo;
pub mod session_repo;

pub use application_repo::ApplicationRepo;
pub use block_repo::BlockRepo;
pub use category_repo::CategoryRepo;
pub use like_repo::LikeRepo;
pub use notification_repo::NotificationRepo;
pub use post_repo::PostRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
