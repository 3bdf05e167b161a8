//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every method is a single
//! statement; nothing runs inside a transaction.

pub mod case_repo;
pub mod category_repo;
pub mod contact_repo;
pub mod developer_repo;
pub mod discussion_repo;

pub use case_repo::CaseRepo;
pub use category_repo::CategoryRepo;
pub use contact_repo::ContactRepo;
pub use developer_repo::DeveloperRepo;
pub use discussion_repo::DiscussionRepo;
