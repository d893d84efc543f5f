//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod assignment;
pub mod calendar_event;
pub mod permissions;
pub mod playlist;
pub mod profile;

pub use assignment::*;
pub use calendar_event::*;
pub use permissions::*;
pub use playlist::*;
pub use profile::*;
