//! Shared helpers for pricesim integration tests.
//!
//! - `fixtures`: CSV and config fixtures plus an isolated command builder
//! - `log_capture`: per-thread tracing capture for library-level tests

#![allow(dead_code)]

pub mod fixtures;
pub mod log_capture;
