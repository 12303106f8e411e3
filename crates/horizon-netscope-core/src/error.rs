//! Error types for network diagnostics.

use thiserror::Error;

/// Errors that can occur while gathering network diagnostics.
///
/// Each variant maps to one section of the report, and none of them is
/// fatal to a run as a whole: callers degrade the affected section to a
/// placeholder and keep going.
#[derive(Error, Debug)]
pub enum NetscopeError {
    /// The default route or its IPv4 subnet mask could not be determined.
    ///
    /// An OS lookup failure is indistinguishable from a genuinely absent
    /// default route, so both surface as this variant.
    #[error("default route resolution failed: {0}")]
    Resolution(String),

    /// A connectivity probe failed. Only that probe's field degrades.
    #[error("connectivity probe failed: {0}")]
    Probe(String),

    /// The OS interface list could not be retrieved. Without it there is
    /// no interface report to build.
    #[error("interface enumeration failed: {0}")]
    Enumeration(String),
}

/// A specialized Result type for diagnostic operations.
pub type Result<T> = std::result::Result<T, NetscopeError>;
