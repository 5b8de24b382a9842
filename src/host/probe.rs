//! Serial port discovery.
//!
//! The device shows up under a platform-dependent name (`/dev/ttyUSB0`,
//! `COM21`, ...). Candidates are tried in order and the first one that
//! opens wins.

use std::fmt::Display;

use log::{debug, info, warn};

use super::LinkError;

/// Ports to try: the explicit list if non-empty, otherwise every port the
/// OS reports.
pub fn candidate_ports(explicit: &[String]) -> Result<Vec<String>, LinkError> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }
    let ports = serialport::available_ports()?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

/// Try `open` on each candidate and return the first success together
/// with the name it was opened under.
pub fn probe<T, E: Display>(
    candidates: &[String],
    mut open: impl FnMut(&str) -> Result<T, E>,
) -> Result<(String, T), LinkError> {
    for name in candidates {
        info!("Trying port: {}", name);
        match open(name) {
            Ok(io) => {
                info!("Connected to: {}", name);
                return Ok((name.clone(), io));
            }
            Err(e) => debug!("{}: {}", name, e),
        }
    }
    warn!("Could not connect to serial device");
    Err(LinkError::NoPort {
        tried: candidates.len(),
    })
}
