use std::sync::Arc;

use cardionet::{
    directory::{CollectionMode, PageWindow, PaginatedCollectionResolver, PaginationControls},
    remote::{DirectoryPage, error::rejected},
    testing::{ScriptedRemotePort, roster},
};

fn ids(resolver: &PaginatedCollectionResolver) -> Vec<i64> {
    resolver
        .page_entities()
        .iter()
        .map(|entity| entity.id)
        .collect()
}

#[tokio::test]
async fn given_external_collection_when_requesting_past_the_end_then_page_is_clamped() {
    let mut resolver = PaginatedCollectionResolver::external(roster(25), 10);

    let window = resolver.resolve_page(9).await.expect("external never fails");
    assert_eq!(window.page, 3);
    assert_eq!(ids(&resolver), vec![21, 22, 23, 24, 25]);

    let window = resolver.resolve_page(0).await.expect("external never fails");
    assert_eq!(window.page, 1);
    assert_eq!(resolver.page_entities().len(), 10);
    assert_eq!(resolver.locate(17), Some(2));
}

#[tokio::test]
async fn empty_external_collection_has_a_single_page() {
    let mut resolver = PaginatedCollectionResolver::external(Vec::new(), 10);

    let window = resolver.resolve_page(4).await.expect("external never fails");

    assert_eq!(window, PageWindow::empty(10));
    assert!(resolver.page_entities().is_empty());
    assert!(!PaginationControls::from(window).visible);
}

#[tokio::test]
async fn given_remote_directory_when_going_to_page_three_then_window_is_taken_from_server() {
    let port = Arc::new(ScriptedRemotePort::new().with_directory(roster(45)));
    let mut resolver = PaginatedCollectionResolver::remote(port.clone(), 10)
        .await
        .expect("first page should load");
    assert_eq!(resolver.mode(), CollectionMode::Remote);

    let window = resolver.resolve_page(3).await.expect("page 3 should load");

    let controls = PaginationControls::from(window);
    assert_eq!(controls.label, "Página 3 de 5");
    assert!(controls.previous_enabled);
    assert!(controls.next_enabled);
    assert_eq!(ids(&resolver), (21..=30).collect::<Vec<_>>());
    assert_eq!(port.directory_requests(), vec![(1, 10), (3, 10)]);
}

#[tokio::test]
async fn server_reported_page_count_is_adopted_verbatim() {
    let port = Arc::new(ScriptedRemotePort::new().with_directory(roster(45)));
    let mut resolver = PaginatedCollectionResolver::remote(port.clone(), 10)
        .await
        .expect("first page should load");
    port.push_directory_page(Ok(DirectoryPage {
        specialists: roster(10),
        total: 45,
        page: 2,
        per_page: Some(10),
        total_pages: Some(6),
    }));

    let window = resolver.resolve_page(2).await.expect("page 2 should load");

    assert_eq!(window.total_pages, 6);
    assert_eq!(window.label(), "Página 2 de 6");
}

#[tokio::test]
async fn given_remote_directory_when_requesting_past_the_end_then_last_page_is_fetched() {
    let port = Arc::new(ScriptedRemotePort::new().with_directory(roster(45)));
    let mut resolver = PaginatedCollectionResolver::remote(port.clone(), 10)
        .await
        .expect("first page should load");

    let window = resolver.resolve_page(99).await.expect("clamped page should load");

    assert_eq!(window.page, 5);
    assert_eq!(port.directory_requests().last(), Some(&(5, 10)));
    assert_eq!(ids(&resolver), (41..=45).collect::<Vec<_>>());
}

#[tokio::test]
async fn given_remote_failure_when_paging_then_previous_page_stays() {
    let port = Arc::new(ScriptedRemotePort::new().with_directory(roster(45)));
    let mut resolver = PaginatedCollectionResolver::remote(port.clone(), 10)
        .await
        .expect("first page should load");
    resolver.resolve_page(3).await.expect("page 3 should load");
    port.push_directory_page(Err(rejected("Servicio no disponible")));

    let err = resolver
        .resolve_page(4)
        .await
        .expect_err("page 4 should fail");

    assert_eq!(err.requested_page, 4);
    assert_eq!(err.user_message(), "Servicio no disponible");
    assert_eq!(resolver.window().page, 3);
    assert_eq!(ids(&resolver), (21..=30).collect::<Vec<_>>());
}

#[tokio::test]
async fn given_external_collection_when_switching_to_remote_then_page_one_is_loaded() {
    let port = Arc::new(ScriptedRemotePort::new().with_directory(roster(45)));
    let mut resolver = PaginatedCollectionResolver::external(roster(4), 10);

    let window = resolver
        .switch_to_remote(port.clone(), 10)
        .await
        .expect("switch should succeed");

    assert_eq!(window.page, 1);
    assert_eq!(window.total, 45);
    assert_eq!(resolver.mode(), CollectionMode::Remote);
    assert_eq!(resolver.find(4).map(|entity| entity.id), Some(4));
    assert_eq!(resolver.find(11), None);
}

#[tokio::test]
async fn failed_switch_to_remote_leaves_external_collection_in_place() {
    let port = Arc::new(ScriptedRemotePort::new());
    port.push_directory_page(Err(rejected("Servicio no disponible")));
    let mut resolver = PaginatedCollectionResolver::external(roster(12), 5);
    resolver.resolve_page(2).await.expect("external never fails");

    resolver
        .switch_to_remote(port.clone(), 10)
        .await
        .expect_err("switch should fail");

    assert_eq!(resolver.mode(), CollectionMode::External);
    assert_eq!(resolver.window().page, 2);
    assert_eq!(resolver.per_page(), 5);
}
