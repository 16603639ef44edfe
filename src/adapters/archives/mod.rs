//! ArchivesSpace API adapter
//!
//! The export engine consumes the backend through the [`ArchivesApi`] trait:
//! repository/resource enumeration, per-resource metadata, raw EAD/MARC
//! retrieval, and schema validation of exported records. [`ArchivesClient`]
//! is the production implementation over the ArchivesSpace REST API.

pub mod api;
pub mod client;
pub mod models;
pub mod schema;

pub use api::{ApiResult, ArchivesApi};
pub use client::ArchivesClient;
