//! Host-facing error type for the simulator binary.
//!
//! The pipeline core itself is total — undefined opcodes are NOPs,
//! register writes to r0/r1 are dropped silently — so `SimError` only
//! covers failures at the boundary between the host OS and the
//! simulator (loading images, creating trace files).

use std::fmt;

#[derive(Debug)]
pub enum SimError {
    Io { path: String, source: std::io::Error },
    Config(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io { path, source } => write!(f, "{}: {}", path, source),
            SimError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SimError {}
