//! Worklist building and partitioning
//!
//! The worklist is resolved completely before any export work begins: a
//! partial worklist would silently under-export, so any enumeration failure
//! aborts the run. Repositories are walked in ascending id order so the same
//! scope always yields the same worklist.

use crate::adapters::archives::ArchivesApi;
use crate::domain::{AspexError, Repository, Result, WorkItem};

/// Build the full ordered worklist for a run.
///
/// `repository_id` 0 means every repository; `resource_id` 0 means every
/// resource in scope. The caller has already rejected the invalid
/// combination of a specific resource without a specific repository.
pub async fn build_worklist(
    api: &dyn ArchivesApi,
    repository_id: u32,
    resource_id: u32,
) -> Result<Vec<WorkItem>> {
    let repositories = resolve_repositories(api, repository_id).await?;

    let mut items = Vec::new();
    for repository in &repositories {
        if resource_id != 0 {
            items.push(WorkItem::new(repository.id, &repository.slug, resource_id));
            continue;
        }

        let resource_ids = api.list_resource_ids(repository.id).await.map_err(|e| {
            AspexError::Worklist(format!(
                "could not enumerate resources for repository {}: {e}",
                repository.id
            ))
        })?;

        tracing::info!(
            repository = repository.id,
            slug = %repository.slug,
            resources = resource_ids.len(),
            "enumerated repository"
        );

        for id in resource_ids {
            items.push(WorkItem::new(repository.id, &repository.slug, id));
        }
    }

    Ok(items)
}

async fn resolve_repositories(
    api: &dyn ArchivesApi,
    repository_id: u32,
) -> Result<Vec<Repository>> {
    if repository_id != 0 {
        let repository = api.get_repository(repository_id).await.map_err(|e| {
            AspexError::Worklist(format!(
                "repository {repository_id} could not be resolved: {e}"
            ))
        })?;
        return Ok(vec![repository]);
    }

    let mut ids = api
        .list_repositories()
        .await
        .map_err(|e| AspexError::Worklist(format!("could not enumerate repositories: {e}")))?;
    ids.sort_unstable();

    let mut repositories = Vec::with_capacity(ids.len());
    for id in ids {
        let repository = api.get_repository(id).await.map_err(|e| {
            AspexError::Worklist(format!("repository {id} could not be resolved: {e}"))
        })?;
        repositories.push(repository);
    }

    Ok(repositories)
}

/// Split the worklist into contiguous near-equal shards, one per worker.
///
/// Shard size is the ceiling of `items.len() / worker_count`; the list is
/// walked in fixed-size windows, so every shard except possibly the last has
/// exactly that size, and concatenating the shards in order reproduces the
/// input exactly. Callers pass a worker count already clamped to the list
/// length, so no shard is ever empty.
pub fn partition(items: &[WorkItem], worker_count: usize) -> Vec<Vec<WorkItem>> {
    if items.is_empty() || worker_count == 0 {
        return Vec::new();
    }

    let shard_size = items.len().div_ceil(worker_count);
    items.chunks(shard_size).map(<[WorkItem]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::archives::ApiResult;
    use crate::domain::{ArchivesApiError, Resource};
    use async_trait::async_trait;

    fn items(n: u32) -> Vec<WorkItem> {
        (1..=n).map(|i| WorkItem::new(2, "tamwag", i)).collect()
    }

    #[test]
    fn test_partition_ten_items_three_workers() {
        let shards = partition(&items(10), 3);
        let sizes: Vec<usize> = shards.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn test_partition_concatenation_reproduces_worklist() {
        let original = items(23);
        for worker_count in 1..=25 {
            let rejoined: Vec<WorkItem> = partition(&original, worker_count)
                .into_iter()
                .flatten()
                .collect();
            assert_eq!(rejoined, original, "worker_count = {worker_count}");
        }
    }

    #[test]
    fn test_partition_full_shards_share_one_size() {
        // every shard except the last is exactly shard_size long
        let original = items(17);
        for worker_count in 1..=17 {
            let shards = partition(&original, worker_count);
            let shard_size = shards[0].len();
            for shard in &shards[..shards.len() - 1] {
                assert_eq!(shard.len(), shard_size);
            }
            assert!(shards.last().unwrap().len() <= shard_size);
        }
    }

    #[test]
    fn test_partition_is_deterministic() {
        let original = items(11);
        assert_eq!(partition(&original, 4), partition(&original, 4));
    }

    #[test]
    fn test_partition_single_worker() {
        let original = items(5);
        let shards = partition(&original, 1);
        assert_eq!(shards.len(), 1);
        assert_eq!(shards[0], original);
    }

    #[test]
    fn test_partition_more_workers_than_items() {
        let shards = partition(&items(3), 3);
        assert_eq!(shards.len(), 3);
        assert!(shards.iter().all(|shard| shard.len() == 1));
    }

    #[test]
    fn test_partition_empty_inputs() {
        assert!(partition(&[], 4).is_empty());
        assert!(partition(&items(3), 0).is_empty());
    }

    /// Enumeration-only stub backend
    struct StubEnumeration {
        repositories: Vec<(u32, &'static str, Vec<u32>)>,
        fail_resources_for: Option<u32>,
    }

    #[async_trait]
    impl ArchivesApi for StubEnumeration {
        async fn list_repositories(&self) -> ApiResult<Vec<u32>> {
            Ok(self.repositories.iter().map(|(id, _, _)| *id).collect())
        }

        async fn get_repository(
            &self,
            repository_id: u32,
        ) -> ApiResult<Repository> {
            self.repositories
                .iter()
                .find(|(id, _, _)| *id == repository_id)
                .map(|(id, slug, _)| Repository::new(*id, *slug))
                .ok_or_else(|| {
                    ArchivesApiError::NotFound(format!("/repositories/{repository_id}"))
                })
        }

        async fn list_resource_ids(
            &self,
            repository_id: u32,
        ) -> ApiResult<Vec<u32>> {
            if self.fail_resources_for == Some(repository_id) {
                return Err(ArchivesApiError::ServerError {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(self
                .repositories
                .iter()
                .find(|(id, _, _)| *id == repository_id)
                .map(|(_, _, resources)| resources.clone())
                .unwrap_or_default())
        }

        async fn get_resource(&self, _: u32, _: u32) -> ApiResult<Resource> {
            unimplemented!("not used by worklist tests")
        }

        async fn get_ead(&self, _: u32, _: u32, _: bool) -> ApiResult<Vec<u8>> {
            unimplemented!("not used by worklist tests")
        }

        async fn get_marc(&self, _: u32, _: u32, _: bool) -> ApiResult<Vec<u8>> {
            unimplemented!("not used by worklist tests")
        }

        fn validate_ead(&self, _: &[u8]) -> std::result::Result<(), String> {
            Ok(())
        }

        fn validate_marc(&self, _: &[u8]) -> std::result::Result<(), String> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_build_worklist_all_repositories_in_id_order() {
        // repositories reported out of order come back sorted
        let api = StubEnumeration {
            repositories: vec![(3, "fales", vec![7]), (2, "tamwag", vec![1, 5])],
            fail_resources_for: None,
        };

        let worklist = build_worklist(&api, 0, 0).await.unwrap();
        assert_eq!(
            worklist,
            vec![
                WorkItem::new(2, "tamwag", 1),
                WorkItem::new(2, "tamwag", 5),
                WorkItem::new(3, "fales", 7),
            ]
        );
    }

    #[tokio::test]
    async fn test_build_worklist_single_repository_single_resource() {
        let api = StubEnumeration {
            repositories: vec![(2, "tamwag", vec![1, 5])],
            fail_resources_for: None,
        };

        let worklist = build_worklist(&api, 2, 99).await.unwrap();
        assert_eq!(worklist, vec![WorkItem::new(2, "tamwag", 99)]);
    }

    #[tokio::test]
    async fn test_build_worklist_unknown_repository_is_fatal() {
        let api = StubEnumeration {
            repositories: vec![(2, "tamwag", vec![1])],
            fail_resources_for: None,
        };

        let err = build_worklist(&api, 9, 0).await.unwrap_err();
        assert!(matches!(err, AspexError::Worklist(_)));
    }

    #[tokio::test]
    async fn test_build_worklist_enumeration_failure_is_fatal() {
        let api = StubEnumeration {
            repositories: vec![(2, "tamwag", vec![1]), (3, "fales", vec![2])],
            fail_resources_for: Some(3),
        };

        let err = build_worklist(&api, 0, 0).await.unwrap_err();
        assert!(matches!(err, AspexError::Worklist(_)));
    }
}
