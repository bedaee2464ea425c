//! # Aula Config
//!
//! Configuration types for the Aula server and CLI, loaded from environment
//! variables with development-friendly defaults:
//!
//! - [`http`]: server bind address
//! - [`cors`]: allowed browser origins
//! - [`storage`]: upload directory and public file base URL
//! - [`client`]: API base URL used by the admin console

pub mod client;
pub mod cors;
pub mod http;
pub mod storage;

pub use client::ClientConfig;
pub use cors::CorsConfig;
pub use http::HttpConfig;
pub use storage::StorageConfig;
