//! Domain types shared by the laser control-panel backend.
//!
//! Holds the error taxonomy, the primitive id/timestamp aliases, and the
//! preset document validation used before anything reaches the database.

pub mod error;
pub mod preset;
pub mod types;
