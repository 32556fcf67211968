pub mod app;
pub mod event;
pub mod forms;
pub mod lookup;
pub mod terminal;
pub mod ui;
pub mod views;

// Re-export commonly used types
pub use app::{App, FetchEvent, Mode, Page};
pub use event::HandleResult;
pub use forms::{EquipmentForm, UserForm};
pub use lookup::{Lookup, LookupEntry};
