//! Repository and resource metadata
//!
//! These models carry the subset of the ArchivesSpace JSON that the export
//! engine needs: the publish flag, the canonical URI, and the hierarchical
//! identifier segments used to compute output filenames.

use serde::Deserialize;

/// A repository resolved to its slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Numeric repository identifier
    pub id: u32,

    /// URL-safe repository slug
    pub slug: String,
}

impl Repository {
    /// Create a new repository
    pub fn new(id: u32, slug: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
        }
    }
}

/// Resource metadata fetched per work item.
///
/// ArchivesSpace identifies a resource by up to four identifier segments
/// (`id_0` through `id_3`); only `id_0` is mandatory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resource {
    /// Canonical URI, e.g. `/repositories/2/resources/150`
    #[serde(default)]
    pub uri: String,

    /// Whether the resource is marked for publication
    #[serde(default)]
    pub publish: bool,

    /// First identifier segment
    #[serde(default)]
    pub id_0: String,

    /// Second identifier segment
    #[serde(default)]
    pub id_1: Option<String>,

    /// Third identifier segment
    #[serde(default)]
    pub id_2: Option<String>,

    /// Fourth identifier segment
    #[serde(default)]
    pub id_3: Option<String>,

    /// EAD identifier, used in log lines
    #[serde(default)]
    pub ead_id: Option<String>,

    /// Display title
    #[serde(default)]
    pub title: Option<String>,
}

impl Resource {
    /// Merge the non-empty identifier segments with `_`.
    ///
    /// This is the basis for export filenames: `mc_100_2` for a resource
    /// identified as (MC, 100, 2).
    pub fn merged_identifiers(&self) -> String {
        let mut merged = self.id_0.clone();
        for segment in [&self.id_1, &self.id_2, &self.id_3].into_iter().flatten() {
            if !segment.is_empty() {
                merged.push('_');
                merged.push_str(segment);
            }
        }
        merged
    }

    /// EAD id or a placeholder for logging
    pub fn ead_id_or_default(&self) -> &str {
        self.ead_id.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_identifiers_all_segments() {
        let resource = Resource {
            id_0: "MC".to_string(),
            id_1: Some("100".to_string()),
            id_2: Some("2".to_string()),
            id_3: Some("b".to_string()),
            ..Default::default()
        };
        assert_eq!(resource.merged_identifiers(), "MC_100_2_b");
    }

    #[test]
    fn test_merged_identifiers_skips_empty_segments() {
        let resource = Resource {
            id_0: "TAM".to_string(),
            id_1: Some(String::new()),
            id_2: Some("5".to_string()),
            id_3: None,
            ..Default::default()
        };
        assert_eq!(resource.merged_identifiers(), "TAM_5");
    }

    #[test]
    fn test_merged_identifiers_single_segment() {
        let resource = Resource {
            id_0: "RG-1-1".to_string(),
            ..Default::default()
        };
        assert_eq!(resource.merged_identifiers(), "RG-1-1");
    }

    #[test]
    fn test_resource_deserialization_defaults() {
        let resource: Resource =
            serde_json::from_str(r#"{"uri": "/repositories/2/resources/1", "id_0": "MC"}"#)
                .unwrap();
        assert_eq!(resource.uri, "/repositories/2/resources/1");
        assert!(!resource.publish);
        assert_eq!(resource.id_0, "MC");
        assert!(resource.id_1.is_none());
    }
}
