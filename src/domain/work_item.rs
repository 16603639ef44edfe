//! Work items - the unit of export work

/// One exportable unit: a resource within a repository.
///
/// Work items are built once by the worklist builder and are read-only from
/// then on. The repository slug is carried along so workers can resolve
/// output paths without another lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Numeric repository identifier
    pub repository_id: u32,

    /// Repository slug, used for output pathing
    pub repository_slug: String,

    /// Numeric resource identifier within the repository
    pub resource_id: u32,
}

impl WorkItem {
    /// Create a new work item
    pub fn new(repository_id: u32, repository_slug: impl Into<String>, resource_id: u32) -> Self {
        Self {
            repository_id,
            repository_slug: repository_slug.into(),
            resource_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_item_creation() {
        let item = WorkItem::new(2, "tamwag", 150);
        assert_eq!(item.repository_id, 2);
        assert_eq!(item.repository_slug, "tamwag");
        assert_eq!(item.resource_id, 150);
    }
}
