// src/core/error.rs

use thiserror::Error;

/// Failures surfaced by the fetch collaborator. The classification core never
/// sees these: the scan pipeline converts them into the degraded report shape
/// before any classifier runs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered with HTTP status {0}")]
    Status(u16),
}

/// Invalid input handed to a pure function of the core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("entropy is undefined for empty input")]
    EmptyInput,
}
