//! pwfield - masked password entry for terminal password managers
//!
//! This library exposes modules for use in integration tests.

pub mod app;
pub mod cli;
pub mod error;
pub mod field;
pub mod startup;
pub mod terminal;
pub mod ui;
