//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (incomplete configuration,
//! lifecycle misuse).
use thiserror_no_std::Error;

#[derive(Error, Debug, PartialEq, Eq)]
/// A required configuration field is absent when the ticker starts.
///
/// Validation is deferred until [`start`](crate::ticker::Ticker::start) so a
/// configuration can be assembled incrementally; the caller supplies the
/// missing field and retries.
pub enum ConfigError {
    /// No target period was configured.
    #[error("Missing config property: delay")]
    MissingDelay,
    /// No task was configured.
    #[error("Missing config property: task")]
    MissingTask,
}

#[derive(Error, Debug, PartialEq, Eq)]
/// A lifecycle operation was called in the wrong state.
/// The ticker's internal state is left unchanged.
pub enum StateError {
    /// `start()` was called while the ticker is running.
    #[error("Ticker already started")]
    AlreadyStarted,
    /// `stop()` was called while the ticker is not running.
    #[error("Ticker not started")]
    NotStarted,
}

#[derive(Error, Debug, PartialEq, Eq)]
/// Failures surfaced by [`start`](crate::ticker::Ticker::start).
pub enum StartError {
    /// The effective configuration is incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The ticker is already running.
    #[error(transparent)]
    State(#[from] StateError),
}
