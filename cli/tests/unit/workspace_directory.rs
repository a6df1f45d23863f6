//! Tests for the `WorkspaceDirectory` read-through cache.
//!
//! **Property 5: fallback to the owned listing is filtered on namespace**

#![allow(clippy::expect_used)]

use cradle_cli::application::services::workspace_directory::WorkspaceDirectory;
use cradle_cli::domain::DirectoryError;
use cradle_common::Workspace;

use crate::helpers::{FakeCloud, workspace};

fn ids(list: &[Workspace]) -> Vec<&str> {
    list.iter().map(|w| w.id.as_str()).collect()
}

#[tokio::test]
async fn test_list_by_namespace_falls_back_to_owned_and_filters() {
    let api = FakeCloud::new()
        .failing("list_by_namespace")
        .with_owned_listing(vec![workspace("1", "ns-a", "x"), workspace("2", "ns-b", "y")]);
    let mut dir = WorkspaceDirectory::new();

    let list = dir.list_by_namespace(&api, "ns-a").await.expect("fallback");

    assert_eq!(ids(&list), ["1"]);
    assert_eq!(ids(dir.cached("ns-a").expect("cached")), ["1"]);
    assert_eq!(api.events(), ["list_by_namespace:ns-a", "list_owned"]);
}

#[tokio::test]
async fn test_list_by_namespace_uses_scoped_listing_when_allowed() {
    let api = FakeCloud::new()
        .with_namespace_listing(vec![workspace("1", "ns-a", "x")])
        .with_owned_listing(vec![workspace("9", "ns-a", "z")]);
    let mut dir = WorkspaceDirectory::new();

    let list = dir.list_by_namespace(&api, "ns-a").await.expect("scoped");

    assert_eq!(ids(&list), ["1"]);
    assert!(api.events_with("list_owned").is_empty());
}

#[tokio::test]
async fn test_list_by_namespace_filters_scoped_listing_too() {
    let api = FakeCloud::new()
        .with_namespace_listing(vec![workspace("1", "ns-a", "x"), workspace("2", "ns-b", "y")]);
    let mut dir = WorkspaceDirectory::new();

    let list = dir.list_by_namespace(&api, "ns-a").await.expect("scoped");

    assert_eq!(ids(&list), ["1"]);
}

#[tokio::test]
async fn test_list_by_namespace_total_failure_leaves_cache_untouched() {
    let api = FakeCloud::new()
        .failing("list_by_namespace")
        .failing("list_owned");
    let mut dir = WorkspaceDirectory::new();

    let err = dir
        .list_by_namespace(&api, "ns-a")
        .await
        .expect_err("both listings fail");

    let err = err.downcast::<DirectoryError>().expect("typed error");
    let DirectoryError::Unavailable {
        namespace,
        scoped,
        owned,
    } = err;
    assert_eq!(namespace, "ns-a");
    assert!(scoped.contains("list_by_namespace failed"));
    assert!(owned.contains("list_owned failed"));
    assert!(dir.cached("ns-a").is_none());
}

#[tokio::test]
async fn test_list_by_namespace_stores_empty_result() {
    let api = FakeCloud::new()
        .failing("list_by_namespace")
        .with_owned_listing(vec![workspace("2", "ns-b", "y")]);
    let mut dir = WorkspaceDirectory::new();

    let list = dir.list_by_namespace(&api, "ns-a").await.expect("fallback");

    assert!(list.is_empty());
    assert_eq!(dir.cached("ns-a").map(<[Workspace]>::len), Some(0));
}

#[tokio::test]
async fn test_get_or_fetch_by_namespace_returns_non_empty_cache_without_fetch() {
    let api = FakeCloud::new().with_namespace_listing(vec![workspace("1", "ns-a", "x")]);
    let mut dir = WorkspaceDirectory::new();

    dir.get_or_fetch_by_namespace(&api, "ns-a").await.expect("first");
    dir.get_or_fetch_by_namespace(&api, "ns-a").await.expect("second");

    assert_eq!(api.events_with("list_by_namespace").len(), 1);
}

#[tokio::test]
async fn test_get_or_fetch_by_namespace_caches_only_own_namespace() {
    let api = FakeCloud::new()
        .with_namespace_listing(vec![workspace("1", "ns-a", "x"), workspace("2", "ns-b", "y")]);
    let mut dir = WorkspaceDirectory::new();

    let list = dir.get_or_fetch_by_namespace(&api, "ns-a").await.expect("scoped");

    assert_eq!(ids(&list), ["1"]);
    let cached = dir.cached("ns-a").expect("cached");
    assert!(
        cached.iter().all(|w| w.namespace == "ns-a"),
        "cache entry for ns-a holds foreign workspaces: {cached:?}"
    );
    assert_eq!(ids(cached), ["1"]);
}

#[tokio::test]
async fn test_get_or_fetch_by_namespace_refetches_empty_entry() {
    let api = FakeCloud::new();
    let mut dir = WorkspaceDirectory::new();

    let first = dir.get_or_fetch_by_namespace(&api, "ns-a").await.expect("first");
    dir.get_or_fetch_by_namespace(&api, "ns-a").await.expect("second");

    assert!(first.is_empty());
    assert_eq!(dir.cached("ns-a").map(<[Workspace]>::len), Some(0));
    assert_eq!(api.events_with("list_by_namespace").len(), 2);
}

#[tokio::test]
async fn test_get_or_fetch_owned_caches_non_empty_listing() {
    let api = FakeCloud::new().with_owned_listing(vec![workspace("1", "ns-a", "x")]);
    let mut dir = WorkspaceDirectory::new();

    dir.get_or_fetch_owned(&api).await.expect("first");
    let second = dir.get_or_fetch_owned(&api).await.expect("second");

    assert_eq!(ids(&second), ["1"]);
    assert_eq!(api.events_with("list_owned").len(), 1);
}

#[tokio::test]
async fn test_fallback_succeeds_after_owned_recovers() {
    let api = FakeCloud::new()
        .failing("list_by_namespace")
        .failing("list_owned")
        .with_owned_listing(vec![workspace("1", "ns-a", "x")]);
    let mut dir = WorkspaceDirectory::new();

    assert!(dir.list_by_namespace(&api, "ns-a").await.is_err());
    api.recover("list_owned");
    let list = dir.list_by_namespace(&api, "ns-a").await.expect("recovered");

    assert_eq!(ids(&list), ["1"]);
}

#[test]
fn test_remember_replaces_by_id() {
    let mut dir = WorkspaceDirectory::new();
    dir.remember(workspace("ws-1", "ns", "old"));
    dir.remember(workspace("ws-1", "ns", "new"));
    assert_eq!(dir.by_id("ws-1").expect("known").config.name, "new");
    assert!(dir.cached("ns").is_none(), "remember does not touch listings");
}
