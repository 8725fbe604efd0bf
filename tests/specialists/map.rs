use std::{sync::Arc, time::Duration};

use cardionet::{
    map::{
        DEFAULT_CENTER, DEFAULT_ZOOM, MAP_UNAVAILABLE, MapCommand, MapStatus, reactor::FOCUS_ZOOM,
    },
    selection::SelectionOrigin,
    specialists::SpecialistPanel,
    testing::{ScriptedRemotePort, recommendations, roster},
};

use super::{RecordingSurface, SurfaceCall};

fn panel_with_surface(count: i64) -> (SpecialistPanel, RecordingSurface) {
    let mut panel =
        SpecialistPanel::recommended(recommendations(count, "Cardiología Isquémica"), 10);
    let surface = RecordingSurface::default();
    panel.attach_map(Box::new(surface.clone()));
    (panel, surface)
}

#[tokio::test]
async fn attaching_a_surface_replays_markers_and_fit() {
    let (panel, surface) = panel_with_surface(5);

    let calls = surface.calls();
    // id 3 has no coordinates
    assert_eq!(calls[0], SurfaceCall::Markers(vec![1, 2, 4, 5]));
    assert!(matches!(
        calls[1],
        SurfaceCall::Command(MapCommand::FitBounds {
            padding_px: 40,
            max_zoom: 14,
            ..
        })
    ));
    assert_eq!(panel.map().status(), &MapStatus::Ready);
}

#[tokio::test]
async fn given_selection_change_when_selected_is_mappable_then_map_flies_to_it() {
    let (mut panel, surface) = panel_with_surface(5);

    let outcome = panel.select(2, SelectionOrigin::List).await;

    match outcome.map_command {
        Some(MapCommand::FlyTo { zoom, duration, .. }) => {
            assert_eq!(zoom, FOCUS_ZOOM);
            assert_eq!(duration, Duration::from_secs(2));
        }
        other => panic!("expected fly-to, got {other:?}"),
    }
    assert_eq!(surface.commands().len(), 2);

    let repeat = panel.select(2, SelectionOrigin::List).await;
    assert!(!repeat.changed);
    assert!(repeat.map_command.is_none());
    assert_eq!(surface.commands().len(), 2);
}

#[tokio::test]
async fn given_unmappable_selection_then_list_highlights_without_moving_the_map() {
    let (mut panel, surface) = panel_with_surface(5);

    let outcome = panel.select(3, SelectionOrigin::List).await;

    assert!(outcome.changed);
    assert!(outcome.map_command.is_none());
    assert_eq!(surface.commands().len(), 1);
    assert_eq!(panel.view().selected_item().map(|item| item.id), Some(3));
}

#[tokio::test]
async fn marker_click_selects_the_specialist() {
    let (mut panel, _surface) = panel_with_surface(5);

    let outcome = panel.marker_clicked(4).await;
    assert!(outcome.changed);
    assert_eq!(panel.selected(), Some(4));

    // no marker exists for an unmappable specialist
    let ignored = panel.marker_clicked(3).await;
    assert!(!ignored.changed);
    assert_eq!(panel.selected(), Some(4));
}

#[tokio::test]
async fn single_located_specialist_centres_the_map_instead_of_fitting() {
    let (panel, _surface) = panel_with_surface(1);

    assert!(matches!(
        panel.map().last_command(),
        Some(MapCommand::SetView { zoom: 12, .. })
    ));
}

#[tokio::test]
async fn empty_collection_keeps_the_default_city_view() {
    let (panel, surface) = panel_with_surface(0);

    let default_view = MapCommand::SetView {
        center: DEFAULT_CENTER,
        zoom: DEFAULT_ZOOM,
    };
    assert_eq!(
        surface.calls(),
        vec![
            SurfaceCall::Markers(Vec::new()),
            SurfaceCall::Command(default_view.clone()),
        ]
    );
    assert_eq!(panel.map().last_command(), Some(&default_view));
}

#[tokio::test]
async fn given_remote_directory_when_paging_then_map_follows_the_listed_page() {
    let port = Arc::new(ScriptedRemotePort::new().with_directory(roster(45)));
    let (mut panel, surface) = panel_with_surface(3);
    panel.view_all(port, 10).await.expect("switch should succeed");

    panel.go_to_page(2).await.expect("page 2 should load");

    let listed = panel
        .page_entities()
        .iter()
        .map(|entity| entity.id)
        .collect::<Vec<_>>();
    assert_eq!(listed, (11..=20).collect::<Vec<_>>());
    let mapped = panel
        .map()
        .markers()
        .iter()
        .map(|marker| marker.id)
        .collect::<Vec<_>>();
    assert_eq!(mapped, vec![11, 13, 14, 16, 17, 19, 20]);
    assert_eq!(
        surface.calls().iter().rev().find(|call| matches!(call, SurfaceCall::Markers(_))),
        Some(&SurfaceCall::Markers(mapped.clone()))
    );
    match surface.commands().last() {
        Some(MapCommand::FitBounds { bounds, .. }) => {
            assert!(panel.map().markers().iter().all(|marker| bounds.contains(marker.position)));
        }
        other => panic!("expected fit to page 2, got {other:?}"),
    }

    // page 1 markers are gone, so their clicks resolve to nothing
    let stale = panel.marker_clicked(1).await;
    assert!(!stale.changed);
    let outcome = panel.marker_clicked(14).await;
    assert!(outcome.changed);
    assert_eq!(panel.selected(), Some(14));
}

#[tokio::test]
async fn remote_previous_page_refits_back_to_first_page() {
    let port = Arc::new(ScriptedRemotePort::new().with_directory(roster(25)));
    let (mut panel, _surface) = panel_with_surface(3);
    panel.view_all(port, 10).await.expect("switch should succeed");
    panel.next_page().await.expect("page 2 should load");

    panel.previous_page().await.expect("page 1 should load");

    let mapped = panel
        .map()
        .markers()
        .iter()
        .map(|marker| marker.id)
        .collect::<Vec<_>>();
    assert_eq!(mapped, vec![1, 2, 4, 5, 7, 8, 10]);
    assert!(matches!(
        panel.map().last_command(),
        Some(MapCommand::FitBounds { .. })
    ));
}

#[tokio::test]
async fn given_failing_surface_then_map_degrades_and_list_keeps_working() {
    let mut panel = SpecialistPanel::directory(roster(25), 10);
    panel.attach_map(Box::new(RecordingSurface::failing()));

    assert!(!panel.map().is_available());
    let view = panel.view();
    assert_eq!(view.map_placeholder, Some(MAP_UNAVAILABLE));
    assert_eq!(view.items.len(), 10);

    let outcome = panel.select(14, SelectionOrigin::List).await;
    assert!(outcome.changed);
    assert_eq!(outcome.navigated_to, Some(2));
    assert_eq!(panel.view().selected_item().map(|item| item.id), Some(14));
}
