//! Error taxonomy for the resolution service.
//!
//! Upstream failures (the draw service) and local failures (the meaning
//! table) are separate variants so they stay distinguishable in logs. Every
//! variant maps to a stable error code and an HTTP status; the response body
//! only ever carries the code and a generic message.

use thiserror::Error;

/// Stable, machine-readable error codes.
pub mod error_code {
    pub const UPSTREAM_UNREACHABLE: &str = "UPSTREAM_UNREACHABLE";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const UPSTREAM_MALFORMED: &str = "UPSTREAM_MALFORMED";
    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    pub const INVALID_SEED_DATA: &str = "INVALID_SEED_DATA";
    pub const CONFIG: &str = "CONFIG";
}

#[derive(Debug, Error)]
pub enum SmorfiaError {
    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("upstream responded with status {status}")]
    UpstreamError { status: u16 },

    #[error("upstream payload malformed: {0}")]
    UpstreamMalformed(String),

    #[error("meaning store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("invalid seed data: {0}")]
    InvalidSeedData(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SmorfiaError>;

impl SmorfiaError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UpstreamUnreachable(_) => error_code::UPSTREAM_UNREACHABLE,
            Self::UpstreamError { .. } => error_code::UPSTREAM_ERROR,
            Self::UpstreamMalformed(_) => error_code::UPSTREAM_MALFORMED,
            Self::StoreUnavailable(_) => error_code::STORE_UNAVAILABLE,
            Self::InvalidSeedData(_) => error_code::INVALID_SEED_DATA,
            Self::Config(_) => error_code::CONFIG,
        }
    }

    /// Seed validation failures are 400; everything else is a 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidSeedData(_) => 400,
            _ => 500,
        }
    }

    /// Message safe to hand to a client. Never includes the underlying cause.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::UpstreamUnreachable(_)
            | Self::UpstreamError { .. }
            | Self::UpstreamMalformed(_) => "Failed to fetch random numbers",
            Self::StoreUnavailable(_) => "Failed to load meanings",
            Self::InvalidSeedData(_) => "Invalid seed data",
            Self::Config(_) => "Internal Server Error",
        }
    }

    /// Upstream status code, if the upstream answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamError { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for SmorfiaError {
    fn from(e: sqlx::Error) -> Self {
        Self::StoreUnavailable(e.to_string())
    }
}
