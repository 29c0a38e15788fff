//! HTTP client for the laser machine's controller.
//!
//! Only the two read-only endpoints the control panel proxies are wrapped
//! here; the controller's own protocol is not modelled.

pub mod api;

pub use api::{ControllerApi, ControllerError};
