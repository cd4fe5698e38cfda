#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for safely
//!
//! Credentials, server-side package descriptors and the share-link
//! metadata that ties a package to its key code.

pub mod credentials;
pub mod output;
pub mod package;
pub mod share;
pub mod summary;
pub mod user;

pub use credentials::Credentials;
pub use output::ExistingOutput;
pub use package::{FileDescriptor, Package, Recipient};
pub use share::PackageMetadata;
pub use summary::{FileSummary, PackageSummary};
pub use user::UserInformation;

/// Prefix prepended to every API path, and included in the signed path.
pub const API_PREFIX: &str = "/api/v2.0";

/// Client identifier the server uses to select the part response format.
pub const DOWNLOAD_API: &str = "JAVA_API";
