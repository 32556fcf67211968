//! Typed REST client for the assetdeck backend.
//!
//! One method per endpoint, no retry, no caching: the views own their
//! state and replace it wholesale with whatever a fetch returns.

pub mod api;
pub mod error;

pub use api::{ApiClient, ExportFormat};
pub use error::{ApiError, Result};
