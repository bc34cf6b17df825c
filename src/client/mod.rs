//! Typed client for front ends: API calls, cached listings with mutation
//! notices, and the admin session flag.

pub mod api;
pub mod cache;
pub mod error;
pub mod hooks;
pub mod notice;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{FilesApi, HttpFilesApi, UploadRequest};
pub use error::ClientError;
pub use hooks::FilesStore;
pub use notice::{Notice, NoticeKind};
pub use session::AdminSession;
