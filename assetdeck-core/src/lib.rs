//! Core library for the assetdeck equipment dashboard.
//!
//! Holds everything that is independent of the terminal frontend: the
//! records mirrored from the backend, the substring filtering used by the
//! list views and lookup widgets, the debounce/sequencing machinery for
//! server-side search, UI preferences, and configuration.

pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod models;
pub mod prefs;

pub use config::AppConfig;
pub use debounce::{Debouncer, RequestSeq};
pub use error::{CoreError, Result};
pub use models::{
    Building, ChartPoint, DeviceUser, Equipment, EquipmentDraft, EquipmentStatus, Location,
    ReportFilters, ReportRow, UserDraft, UserRow,
};
pub use prefs::UiPrefs;
