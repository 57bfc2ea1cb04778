//! The unit of work a ticker dispatches each iteration.
//!
//! There is a single calling convention: `run` returns a future and the
//! iteration is complete when that future resolves. A synchronous task is
//! simply one whose future is already complete when returned; the
//! [`SyncTask`] adapter lifts plain closures that way.

/// Why a run ended; delivered to [`TickTask::on_stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured iteration cap was reached; the ticker stopped itself.
    LimitReached,
    /// An external stop request ended the run.
    Cancelled,
}

/// Contract for the work dispatched on every tick.
pub trait TickTask {
    /// Execute one iteration.
    ///
    /// `delta_ms` is the elapsed time since the previous iteration was
    /// scheduled to begin (the corrected nominal interval, not the raw
    /// wall-clock gap), and 0 on the first iteration of a run. Tasks doing
    /// per-frame work proportional to real elapsed time scale by it.
    ///
    /// The ticker awaits the returned future before measuring elapsed time;
    /// a future that never resolves stalls the ticker in this iteration.
    fn run<'a>(
        &'a mut self,
        delta_ms: u64,
    ) -> impl core::future::Future<Output = ()> + 'a;

    /// Hook invoked exactly once when the ticker stops, for any reason.
    ///
    /// Runs after the state transition, with `ticks` already at its
    /// terminal value. The default does nothing.
    fn on_stop(&mut self, _reason: StopReason, _ticks: u32) {}
}

/// Adapter lifting a plain `FnMut(u64)` closure into a [`TickTask`].
///
/// The closure runs to completion at dispatch time, so the iteration is
/// considered complete the instant it returns.
pub struct SyncTask<F>(pub F);

impl<F: FnMut(u64)> TickTask for SyncTask<F> {
    fn run<'a>(
        &'a mut self,
        delta_ms: u64,
    ) -> impl core::future::Future<Output = ()> + 'a {
        (self.0)(delta_ms);
        core::future::ready(())
    }
}
