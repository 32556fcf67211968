//! End-to-end state-machine tests: fetch events applied to the app, the
//! debounced search lifecycle, and the modal submit/refresh contract.

use std::time::{Duration, Instant};

use assetdeck_client::{ApiClient, ApiError};
use assetdeck_core::models::{Building, ChartPoint, Location, UserRow};
use assetdeck_core::prefs::UiPrefs;
use assetdeck_tui::app::{App, FetchEvent, Mode, Page};
use assetdeck_tui::views::ChartState;

fn test_app() -> App {
    App::new(ApiClient::new("http://localhost:8000"), UiPrefs::default())
}

fn user(id: i64, first: &str) -> UserRow {
    UserRow {
        user_id: id,
        first_name: first.into(),
        last_name: "Example".into(),
        email: format!("{}@example.edu", first.to_lowercase()),
        department: "IT".into(),
        device_count: 1,
    }
}

#[tokio::test]
async fn equipment_creation_closes_modal_and_refreshes_list() {
    let mut app = test_app();
    app.switch_page(Page::Inventory);
    app.open_equipment_modal();
    assert_eq!(app.mode, Mode::Form);

    let before = app.inventory.seq.latest();
    app.apply_event(FetchEvent::EquipmentCreated(Ok(())));

    assert!(app.inventory.modal.is_none());
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.status_message.as_deref(), Some("Equipment created"));
    // The caller-side refresh: a new equipment fetch was issued.
    assert!(app.inventory.seq.latest() > before);
}

#[tokio::test]
async fn failed_creation_keeps_modal_open() {
    let mut app = test_app();
    app.switch_page(Page::Inventory);
    app.open_equipment_modal();

    app.apply_event(FetchEvent::EquipmentCreated(Err(ApiError::status(
        "/equipment",
        500,
        "boom",
    ))));

    assert!(app.inventory.modal.is_some());
    assert_eq!(app.mode, Mode::Form);
    assert!(app
        .status_message
        .as_deref()
        .unwrap_or_default()
        .starts_with("Create failed"));
}

#[tokio::test]
async fn reference_fetch_feeds_the_open_modal_lookup() {
    let mut app = test_app();
    app.switch_page(Page::Inventory);
    app.open_equipment_modal();

    app.apply_event(FetchEvent::Locations(Ok(vec![Location {
        location_id: 3,
        room_number: "204".into(),
        floor_number: 2,
        building: Building {
            building_name: "Main Library".into(),
            building_short_name: "LIB".into(),
        },
    }])));

    let form = app.inventory.modal.as_ref().unwrap();
    let entries = form.location_lookup.filtered();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label, "LIB - Floor 2, Room 204");
}

#[tokio::test]
async fn empty_settled_query_restores_snapshot_without_a_request() {
    let mut app = test_app();

    // Mount fetch delivered the full collection.
    let mount = app.users.seq.issue();
    app.apply_event(FetchEvent::Users {
        seq: mount,
        query: String::new(),
        result: Ok(vec![user(1, "Ada"), user(2, "Alan")]),
    });

    // A narrower result is currently displayed.
    let search = app.users.seq.issue();
    app.apply_event(FetchEvent::Users {
        seq: search,
        query: "ada".into(),
        result: Ok(vec![user(1, "Ada")]),
    });
    assert_eq!(app.users.rows.len(), 1);

    // The user clears the query; after the quiet period the snapshot is
    // restored and no request goes out.
    let t0 = Instant::now();
    app.users.query.clear();
    app.users.record_keystroke(t0);
    let issued_before = app.users.seq.latest();

    app.tick(t0 + Duration::from_millis(400));

    assert_eq!(app.users.rows.len(), 2);
    assert_eq!(app.users.seq.latest(), issued_before);
}

#[tokio::test]
async fn non_empty_settled_query_issues_exactly_one_request() {
    let mut app = test_app();
    let t0 = Instant::now();

    app.users.query = "d".into();
    app.users.record_keystroke(t0);
    app.users.query = "de".into();
    app.users.record_keystroke(t0 + Duration::from_millis(100));

    let issued_before = app.users.seq.latest();

    // Still inside the quiet period: nothing issued.
    app.tick(t0 + Duration::from_millis(300));
    assert_eq!(app.users.seq.latest(), issued_before);

    // Settled: one request, then quiet again.
    app.tick(t0 + Duration::from_millis(450));
    assert_eq!(app.users.seq.latest(), issued_before + 1);
    app.tick(t0 + Duration::from_millis(600));
    assert_eq!(app.users.seq.latest(), issued_before + 1);
}

#[tokio::test]
async fn stale_user_search_response_is_ignored_by_the_app() {
    let mut app = test_app();
    let stale = app.users.seq.issue();
    let fresh = app.users.seq.issue();

    app.apply_event(FetchEvent::Users {
        seq: fresh,
        query: "ada".into(),
        result: Ok(vec![user(1, "Ada")]),
    });
    app.apply_event(FetchEvent::Users {
        seq: stale,
        query: "a".into(),
        result: Ok(vec![user(1, "Ada"), user(2, "Alan"), user(3, "Alice")]),
    });

    assert_eq!(app.users.rows.len(), 1);
}

#[tokio::test]
async fn dashboard_surfaces_errors_as_error_state() {
    let mut app = test_app();
    let seq = app.dashboard.seq.issue();

    app.apply_event(FetchEvent::Chart {
        seq,
        result: Err(ApiError::missing_data("/dashboard/devices-by-building")),
    });

    assert!(matches!(app.dashboard.state, ChartState::Error(_)));
}

#[tokio::test]
async fn dashboard_empty_payload_is_not_an_error() {
    let mut app = test_app();
    let seq = app.dashboard.seq.issue();

    app.apply_event(FetchEvent::Chart {
        seq,
        result: Ok(Vec::<ChartPoint>::new()),
    });

    assert!(matches!(app.dashboard.state, ChartState::Ready(ref p) if p.is_empty()));
}

#[tokio::test]
async fn failed_user_add_keeps_the_modal() {
    let mut app = test_app();
    app.switch_page(Page::Users);
    app.open_user_modal();

    app.apply_event(FetchEvent::UserAdded(Err(ApiError::status(
        "/api/users/add",
        400,
        "Invalid department",
    ))));

    assert!(app.users.modal.is_some());
    assert!(app
        .status_message
        .as_deref()
        .unwrap_or_default()
        .starts_with("Add failed"));
}
