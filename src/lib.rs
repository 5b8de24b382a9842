//! Serial relay firmware library.
//!
//! Exposes the pure-logic modules for integration testing and for the
//! host-side commander. ESP-IDF-specific code is guarded by the `espidf`
//! feature; the commander by the `host` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod pins;

#[cfg(feature = "host")]
pub mod host;
