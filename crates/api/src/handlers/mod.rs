//! Request handlers.
//!
//! Preset handlers delegate to `PresetRepo` in `laserpanel_db`; controller
//! handlers proxy through `ControllerApi`. Errors are mapped via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod controller;
pub mod presets;
