//! Wire models for the ArchivesSpace REST API

use crate::domain::ArchivesApiError;
use serde::Deserialize;

/// Response body of `POST /users/{username}/login`
#[derive(Debug, Deserialize)]
pub(crate) struct SessionResponse {
    pub session: String,
}

/// Repository object as returned by `GET /repositories`
///
/// ArchivesSpace does not return a numeric id field; it is the last segment
/// of the record URI.
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryRecord {
    pub uri: String,

    #[serde(default)]
    pub slug: String,
}

impl RepositoryRecord {
    /// Parse the numeric repository id out of the record URI
    pub(crate) fn id(&self) -> Result<u32, ArchivesApiError> {
        self.uri
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
            .ok_or_else(|| {
                ArchivesApiError::InvalidResponse(format!(
                    "repository uri `{}` has no numeric id",
                    self.uri
                ))
            })
    }
}
