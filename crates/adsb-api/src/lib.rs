//! ADS-B Relay API Library
//!
//! HTTP handlers, services, and application setup for the snapshot relay.

mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
mod telemetry;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use services::{Preparer, SnapshotPreparer};
pub use state::AppState;
