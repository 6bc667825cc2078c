//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns like
//! settings and session files, CSV export and log output.

pub mod persistence;
pub mod export;
pub mod logging;

pub use persistence::*;
pub use export::*;
pub use logging::*;
