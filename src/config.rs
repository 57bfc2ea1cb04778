//! Ticker configuration. Every user-facing field is optional so a
//! configuration can be assembled incrementally; required fields are only
//! enforced when the ticker starts.
use crate::error::ConfigError;

/// Effective default when no iteration limit is configured (unbounded).
const DEFAULT_LIMIT: u32 = 0;

/// Configuration value for a [`Ticker`](crate::ticker::Ticker).
///
/// `K` is the task type driving each iteration. Fields left unset fall back
/// to their defaults when the ticker starts, except `delay` and `task`,
/// which must be present by then.
#[derive(Debug)]
pub struct TickerConfig<K> {
    delay: Option<u64>,
    limit: Option<u32>,
    task: Option<K>,
}

impl<K> Default for TickerConfig<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TickerConfig<K> {
    /// Empty configuration; fields are supplied through the `with_*` setters
    /// or merged in later with [`merge`](Self::merge).
    pub const fn new() -> Self {
        Self {
            delay: None,
            limit: None,
            task: None,
        }
    }

    /// Target period between iteration starts, in milliseconds.
    /// A zero delay is legal and means "as fast as the timer allows".
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay = Some(delay_ms);
        self
    }

    /// Cap on the number of iterations; 0 means unbounded.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The unit of work dispatched each iteration.
    pub fn with_task(mut self, task: K) -> Self {
        self.task = Some(task);
        self
    }

    /// Overlay the fields present in `update` onto this configuration,
    /// leaving absent fields untouched.
    ///
    /// This is the extension operation for supplying fields after
    /// construction; it is only meaningful while the ticker is not being
    /// driven (the borrow rules prevent anything else).
    pub fn merge(&mut self, update: TickerConfig<K>) {
        if let Some(delay) = update.delay {
            self.delay = Some(delay);
        }
        if let Some(limit) = update.limit {
            self.limit = Some(limit);
        }
        if let Some(task) = update.task {
            self.task = Some(task);
        }
    }

    /// Configured target period, if any.
    pub fn delay(&self) -> Option<u64> {
        self.delay
    }

    /// Effective iteration cap (0 = unbounded).
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Configured task, if any.
    pub fn task(&self) -> Option<&K> {
        self.task.as_ref()
    }

    pub(crate) fn task_mut(&mut self) -> Option<&mut K> {
        self.task.as_mut()
    }

    /// Check the required fields and return the effective delay.
    /// Called once per `start()`; the hot loop never re-validates.
    pub(crate) fn validate(&self) -> Result<u64, ConfigError> {
        let delay = self.delay.ok_or(ConfigError::MissingDelay)?;
        if self.task.is_none() {
            return Err(ConfigError::MissingTask);
        }
        Ok(delay)
    }
}
