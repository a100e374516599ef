//! Typed endpoint wrappers
//!
//! One method per backend endpoint. Wrappers borrow an [`HttpClient`] so the
//! same client (and its bearer token) serves every screen.
//!
//! [`HttpClient`]: crate::HttpClient

pub mod admin;
pub mod app;
mod files;

pub use admin::{AdminApi, KioskQuery, ListFilter, NetworkStats, WashSessionQuery};
pub use app::AppApi;
pub use files::UploadResponse;
