//! Core application state and fetch coordination.
//!
//! The render loop owns one `App`. Network calls run on spawned tasks and
//! report back through an unbounded channel; each result carries the
//! sequence number of the request that produced it, and the view applies
//! it only if no newer request has been issued since.

use std::time::Instant;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use assetdeck_client::{ApiClient, ApiError, ExportFormat};
use assetdeck_core::models::{
    ChartPoint, DeviceUser, Equipment, EquipmentDraft, Location, ReportRow, UserDraft, UserRow,
};
use assetdeck_core::prefs::UiPrefs;

use crate::forms::{EquipmentForm, UserForm};
use crate::lookup::LookupEntry;
use crate::views::{ChartKind, ChartState, DashboardView, InventoryView, ReportsView, UsersView};

/// Sidebar pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Inventory,
    Users,
    Reports,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Inventory, Page::Users, Page::Reports];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Inventory => "Inventory",
            Page::Users => "Users",
            Page::Reports => "Reports",
        }
    }
}

/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation mode - navigate lists, switch pages, invoke actions
    #[default]
    Normal,
    /// Search input active (inventory and users pages)
    Search,
    /// Editing a report date field
    Edit,
    /// A modal form is open
    Form,
}

/// A completed fetch, reported back to the render loop.
#[derive(Debug)]
pub enum FetchEvent {
    Equipment {
        seq: u64,
        result: Result<Vec<Equipment>, ApiError>,
    },
    Users {
        seq: u64,
        query: String,
        result: Result<Vec<UserRow>, ApiError>,
    },
    Locations(Result<Vec<Location>, ApiError>),
    DeviceUsers(Result<Vec<DeviceUser>, ApiError>),
    Report {
        seq: u64,
        result: Result<Vec<ReportRow>, ApiError>,
    },
    Chart {
        seq: u64,
        result: Result<Vec<ChartPoint>, ApiError>,
    },
    EquipmentCreated(Result<(), ApiError>),
    UserAdded(Result<(), ApiError>),
    Exported(Result<String, String>),
}

/// Main application state
pub struct App {
    pub page: Page,
    pub mode: Mode,
    /// Cross-cutting UI flags, constructed in `main` and injected here.
    pub prefs: UiPrefs,
    pub client: ApiClient,
    pub should_quit: bool,
    /// Status message (shown in the status bar)
    pub status_message: Option<String>,
    pub inventory: InventoryView,
    pub users: UsersView,
    pub reports: ReportsView,
    pub dashboard: DashboardView,
    events_tx: UnboundedSender<FetchEvent>,
    events_rx: UnboundedReceiver<FetchEvent>,
}

impl App {
    pub fn new(client: ApiClient, prefs: UiPrefs) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            page: Page::Dashboard,
            mode: Mode::Normal,
            prefs,
            client,
            should_quit: false,
            status_message: None,
            inventory: InventoryView::new(),
            users: UsersView::new(),
            reports: ReportsView::new(),
            dashboard: DashboardView::new(),
            events_tx,
            events_rx,
        }
    }

    /// Mount fetches: inventory collection, user collection, first chart.
    pub fn load_initial(&mut self) {
        self.spawn_equipment_fetch();
        self.spawn_users_search(String::new());
        self.spawn_chart_fetch();
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn switch_page(&mut self, page: Page) {
        self.page = page;
        self.mode = Mode::Normal;
    }

    /// Refetch whatever backs the current page.
    pub fn refresh_current(&mut self) {
        match self.page {
            Page::Dashboard => self.spawn_chart_fetch(),
            Page::Inventory => self.spawn_equipment_fetch(),
            Page::Users => {
                self.users.query.clear();
                self.spawn_users_search(String::new());
            }
            Page::Reports => {}
        }
        self.set_status("Refreshing...");
    }

    /// Periodic work between input events: emit settled search queries.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.users.settled_query(now) {
            if query.is_empty() {
                // Empty settled query: no request, restore the mount
                // snapshot.
                self.users.restore_snapshot();
            } else {
                self.spawn_users_search(query);
            }
        }
    }

    /// Apply everything the fetch tasks have reported since the last tick.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    pub fn apply_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Equipment { seq, result } => self.inventory.apply_fetch(seq, result),
            FetchEvent::Users { seq, query, result } => {
                self.users.apply_fetch(seq, &query, result)
            }
            FetchEvent::Locations(result) => {
                let entries = match result {
                    Ok(locations) => locations
                        .iter()
                        .map(|loc| LookupEntry {
                            id: loc.location_id,
                            label: loc.label(),
                        })
                        .collect(),
                    Err(err) => {
                        warn!(error = %err, "locations fetch failed");
                        Vec::new()
                    }
                };
                if let Some(form) = &mut self.inventory.modal {
                    form.location_lookup.set_items(entries);
                }
            }
            FetchEvent::DeviceUsers(result) => {
                let entries = match result {
                    Ok(users) => users
                        .iter()
                        .map(|user| LookupEntry {
                            id: user.device_user_id,
                            label: user.label(),
                        })
                        .collect(),
                    Err(err) => {
                        warn!(error = %err, "device users fetch failed");
                        Vec::new()
                    }
                };
                if let Some(form) = &mut self.inventory.modal {
                    form.user_lookup.set_items(entries);
                }
            }
            FetchEvent::Report { seq, result } => self.reports.apply_fetch(seq, result),
            FetchEvent::Chart { seq, result } => self.dashboard.apply_fetch(seq, result),
            FetchEvent::EquipmentCreated(result) => match result {
                Ok(()) => {
                    self.inventory.modal = None;
                    self.mode = Mode::Normal;
                    self.set_status("Equipment created");
                    self.spawn_equipment_fetch();
                }
                Err(err) => {
                    warn!(error = %err, "equipment creation failed");
                    self.set_status(format!("Create failed: {}", err));
                }
            },
            FetchEvent::UserAdded(result) => match result {
                Ok(()) => {
                    self.users.modal = None;
                    self.mode = Mode::Normal;
                    self.set_status("User added");
                    self.users.query.clear();
                    self.spawn_users_search(String::new());
                }
                Err(err) => {
                    warn!(error = %err, "user creation failed");
                    self.set_status(format!("Add failed: {}", err));
                }
            },
            FetchEvent::Exported(result) => match result {
                Ok(file_name) => self.set_status(format!("Exported {}", file_name)),
                Err(message) => {
                    warn!(error = %message, "report export failed");
                    self.set_status(format!("Export failed: {}", message));
                }
            },
        }
    }

    // --- fetch spawning ---

    pub fn spawn_equipment_fetch(&mut self) {
        let seq = self.inventory.seq.issue();
        self.inventory.loading = self.inventory.all.is_empty();
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.list_equipment().await;
            let _ = tx.send(FetchEvent::Equipment { seq, result });
        });
    }

    pub fn spawn_users_search(&mut self, query: String) {
        let seq = self.users.seq.issue();
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.search_users(&query).await;
            let _ = tx.send(FetchEvent::Users { seq, query, result });
        });
    }

    /// Reference collections for the create-equipment lookups, refetched
    /// every time the modal opens.
    pub fn spawn_reference_fetches(&mut self) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.list_locations().await;
            let _ = tx.send(FetchEvent::Locations(result));
        });
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.list_device_users().await;
            let _ = tx.send(FetchEvent::DeviceUsers(result));
        });
    }

    pub fn spawn_report_generate(&mut self) {
        let filters = match self.reports.filters() {
            Ok(filters) => filters,
            Err(message) => {
                self.set_status(message);
                return;
            }
        };
        let seq = self.reports.seq.issue();
        self.reports.loading = true;
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.generate_report(&filters).await;
            let _ = tx.send(FetchEvent::Report { seq, result });
        });
    }

    pub fn spawn_report_export(&mut self, format: ExportFormat) {
        let filters = match self.reports.filters() {
            Ok(filters) => filters,
            Err(message) => {
                self.set_status(message);
                return;
            }
        };
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        self.set_status(format!("Exporting {}...", format.file_name()));
        tokio::spawn(async move {
            let result = match client.export_report(&filters, format).await {
                Ok(bytes) => tokio::fs::write(format.file_name(), bytes)
                    .await
                    .map(|_| format.file_name().to_string())
                    .map_err(|err| err.to_string()),
                Err(err) => Err(err.to_string()),
            };
            let _ = tx.send(FetchEvent::Exported(result));
        });
    }

    pub fn spawn_chart_fetch(&mut self) {
        let seq = self.dashboard.seq.issue();
        self.dashboard.state = ChartState::Loading;
        let kind = self.dashboard.kind;
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = match kind {
                ChartKind::Building => client.devices_by_building().await,
                ChartKind::Manufacturer => client.devices_by_manufacturer().await,
                ChartKind::FormFactor => client.devices_by_form_factor().await,
            };
            let _ = tx.send(FetchEvent::Chart { seq, result });
        });
    }

    pub fn spawn_create_equipment(&mut self, draft: EquipmentDraft) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.create_equipment(&draft).await;
            let _ = tx.send(FetchEvent::EquipmentCreated(result));
        });
    }

    pub fn spawn_add_user(&mut self, draft: UserDraft) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.add_user(&draft).await;
            let _ = tx.send(FetchEvent::UserAdded(result));
        });
    }

    // --- modals ---

    pub fn open_equipment_modal(&mut self) {
        self.inventory.modal = Some(EquipmentForm::new());
        self.mode = Mode::Form;
        self.spawn_reference_fetches();
    }

    pub fn open_user_modal(&mut self) {
        self.users.modal = Some(UserForm::new());
        self.mode = Mode::Form;
    }

    pub fn close_modal(&mut self) {
        self.inventory.modal = None;
        self.users.modal = None;
        self.mode = Mode::Normal;
    }
}
