//! # Aula Core
//!
//! Foundational types shared by the Aula server, client and CLI:
//!
//! - [`pagination`]: the list-query parameters and the paginated wire envelope
//!   every collection endpoint speaks
//! - [`storage`]: file storage abstraction used for institution crests

pub mod pagination;
pub mod storage;

// Re-export commonly used types at crate root
pub use pagination::{ListQuery, Paginated, SortDir};
pub use storage::{FileStore, LocalFileStore, StorageError};
