//! The archival-API boundary
//!
//! Everything the export engine needs from an ArchivesSpace backend, as one
//! async trait. Workers and the worklist builder only depend on this trait;
//! the HTTP client implements it for real runs and tests supply stubs.

use crate::domain::{ArchivesApiError, Repository, Resource};
use async_trait::async_trait;

/// Result type for archival-API operations
pub type ApiResult<T> = std::result::Result<T, ArchivesApiError>;

/// Operations consumed from the archival-management backend
#[async_trait]
pub trait ArchivesApi: Send + Sync {
    /// Enumerate every repository id visible to the session
    async fn list_repositories(&self) -> ApiResult<Vec<u32>>;

    /// Resolve a repository id to its slug
    async fn get_repository(&self, repository_id: u32) -> ApiResult<Repository>;

    /// Enumerate every resource id in a repository
    async fn list_resource_ids(&self, repository_id: u32) -> ApiResult<Vec<u32>>;

    /// Fetch resource metadata (publish flag, URI, identifier segments)
    async fn get_resource(&self, repository_id: u32, resource_id: u32) -> ApiResult<Resource>;

    /// Fetch the EAD finding aid for a resource as raw bytes
    async fn get_ead(
        &self,
        repository_id: u32,
        resource_id: u32,
        include_unpublished_notes: bool,
    ) -> ApiResult<Vec<u8>>;

    /// Fetch the MARC21 record for a resource as raw bytes
    async fn get_marc(
        &self,
        repository_id: u32,
        resource_id: u32,
        include_unpublished_notes: bool,
    ) -> ApiResult<Vec<u8>>;

    /// Validate a record against the EAD2002 schema, returning failure detail
    fn validate_ead(&self, record: &[u8]) -> std::result::Result<(), String>;

    /// Validate a record against the MARC21 schema, returning failure detail
    fn validate_marc(&self, record: &[u8]) -> std::result::Result<(), String>;
}
