//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the rules of the serial relay: command decoding
//! and the poll → read → decode → actuate cycle. All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod command;
pub mod events;
pub mod ports;
pub mod service;
