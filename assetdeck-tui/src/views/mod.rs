//! Page views: one module per sidebar entry.
//!
//! Each view owns its rows, replaces them wholesale on fetch, and renders
//! into the content area the shell hands it. Fetch application goes
//! through the view so the sequence-number discipline lives next to the
//! state it protects.

pub mod dashboard;
pub mod inventory;
pub mod reports;
pub mod users;

pub use dashboard::{ChartKind, ChartState, DashboardView};
pub use inventory::InventoryView;
pub use reports::{ReportField, ReportsView};
pub use users::UsersView;
