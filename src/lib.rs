//! Client side of the personnel backend: typed records, a fire-and-forget
//! REST client and the state the desktop UI observes.

pub mod api;
pub mod app;
pub mod config;
pub mod model;

pub use api::{ApiClient, ApiError, ApiEvent, Operation};
pub use app::{PersonnelApp, StateChange};
pub use config::Config;
