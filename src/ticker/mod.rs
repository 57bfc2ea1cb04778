//! Self-correcting ticker: dispatches a task at a target period and re-arms
//! itself so the average interval between iteration starts converges on the
//! configured delay, compensating for the time the task itself consumes.
use crate::config::TickerConfig;
use crate::error::{StartError, StateError};
use crate::traits::tick_clock::TickClock;
use crate::traits::tick_task::{StopReason, TickTask};
use crate::traits::tick_timer::TickTimer;


/// Lifecycle states. `Stopped` and `Idle` are behaviorally equivalent
/// except that `Idle` has never run; both reject `stop()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerState {
    Idle,
    Running,
    Stopped,
}

/// Periodic task scheduler with drift correction.
///
/// One instance per schedule. The ticker owns its configuration and the two
/// injected collaborators; iterations are driven by [`run`](Self::run) (or
/// by a [`TickerRunner`](crate::supervisor::TickerRunner) when stop requests
/// must arrive from other tasks). Iterations are strictly sequential: the
/// task for iteration *i + 1* never starts before iteration *i* completed.
pub struct Ticker<K: TickTask, T: TickTimer, C: TickClock> {
    /// Effective configuration; validated when the ticker starts.
    config: TickerConfig<K>,
    /// Asynchronous timer arming the wait between iterations.
    timer: T,
    /// Monotonic clock backing the drift-correction math.
    clock: C,
    /// Current lifecycle state.
    state: TickerState,
    /// Completed iterations since the last `start()`.
    ticks: u32,
    /// Target period captured from the configuration at `start()`.
    delay: u64,
    /// Nominal start timestamp of the current iteration.
    scheduled_at: u64,
    /// Nominal start timestamp of the previous iteration.
    prev_scheduled_at: u64,
}

impl<K, T, C> Ticker<K, T, C>
where
    K: TickTask,
    T: TickTimer,
    C: TickClock,
{
    /// Build a ticker from a configuration and the injected collaborators.
    ///
    /// The configuration may still be incomplete at this point; required
    /// fields are only enforced by [`start`](Self::start).
    pub fn new(config: TickerConfig<K>, timer: T, clock: C) -> Self {
        Self {
            config,
            timer,
            clock,
            state: TickerState::Idle,
            ticks: 0,
            delay: 0,
            scheduled_at: 0,
            prev_scheduled_at: 0,
        }
    }

    /// Merge additional configuration fields into the current ones.
    /// Only reachable while the ticker is not being driven.
    pub fn configure(&mut self, update: TickerConfig<K>) -> &mut Self {
        self.config.merge(update);
        self
    }

    /// Current effective configuration.
    pub fn config(&self) -> &TickerConfig<K> {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TickerState {
        self.state
    }

    /// Completed iterations since the last `start()`.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.state == TickerState::Running
    }

    /// Start the ticker, arming the first iteration.
    ///
    /// Validates the configuration (deferred validation: fields may have
    /// been merged in after construction), resets the iteration counter,
    /// and initializes the drift baseline to "now". The first dispatch
    /// happens once the drive loop is polled, so a `stop()` issued before
    /// then prevents any task invocation.
    pub fn start(&mut self) -> Result<&mut Self, StartError> {
        if self.is_running() {
            return Err(StateError::AlreadyStarted.into());
        }

        let delay = self.config.validate()?;

        self.delay = delay;
        self.ticks = 0;
        let now = self.clock.now_ms();
        self.scheduled_at = now;
        self.prev_scheduled_at = now;
        self.state = TickerState::Running;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Ticker started (delay={}ms, limit={})",
            delay,
            self.config.limit()
        );

        Ok(self)
    }

    /// Stop the ticker.
    ///
    /// Takes effect at an iteration boundary: a task currently executing is
    /// never interrupted, and the pending inter-iteration delay (if any) is
    /// disarmed by the drive loop dropping it. The `on_stop` hook runs
    /// after the state transition, with the counter already final.
    pub fn stop(&mut self) -> Result<&mut Self, StateError> {
        if !self.is_running() {
            return Err(StateError::NotStarted);
        }

        self.halt(StopReason::Cancelled);
        Ok(self)
    }

    /// Drive iterations until the ticker stops (limit reached, or `stop()`
    /// was called before this loop was polled). Returns immediately unless
    /// the ticker is running.
    ///
    /// For stop requests arriving from other tasks while this loop owns the
    /// ticker, wrap it in a [`TickerService`](crate::supervisor::TickerService)
    /// and drive the runner instead.
    pub async fn run(&mut self) {
        while self.is_running() {
            match self.step().await {
                Some(next_delay) => self.wait(next_delay).await,
                None => break,
            }
        }
    }

    /// One full iteration: dispatch the task, then compute the corrected
    /// next delay. Returns the delay to wait before the next iteration, or
    /// `None` once the ticker stopped at its limit.
    pub(crate) async fn step(&mut self) -> Option<u64> {
        self.tick().await;
        self.tock()
    }

    /// Dispatch half of an iteration: hand the task its corrected delta and
    /// await completion (immediate for synchronous tasks).
    async fn tick(&mut self) {
        // Corrected nominal interval, not the raw wall-clock gap.
        let delta = self.scheduled_at - self.prev_scheduled_at;

        #[cfg(feature = "defmt")]
        defmt::trace!("Tick {} (delta={}ms)", self.ticks, delta);

        // Present by the `start()` validation for as long as we are running.
        if let Some(task) = self.config.task_mut() {
            task.run(delta).await;
        }
    }

    /// Re-arm half of an iteration, run after task completion.
    ///
    /// Drift correction: with `scheduled_at` the nominal start of this
    /// iteration and `now` the observed completion time,
    ///
    /// ```text
    /// next_delay = max(0, delay - (now - scheduled_at))
    /// scheduled_at' = now + next_delay
    /// ```
    ///
    /// Anchoring the next nominal start to actual completion plus the
    /// corrected wait is what keeps the long-run average period at `delay`
    /// even when the task consumes a large share of it.
    fn tock(&mut self) -> Option<u64> {
        let now = self.clock.now_ms();
        let elapsed = now.saturating_sub(self.scheduled_at);
        let next_delay = self.delay.saturating_sub(elapsed);

        #[cfg(feature = "defmt")]
        {
            if elapsed > self.delay {
                defmt::warn!(
                    "Tick {} overran its {}ms budget ({}ms elapsed)",
                    self.ticks,
                    self.delay,
                    elapsed
                );
            }
        }

        self.ticks += 1;

        // Limit check happens before arming the next delay, so reaching it
        // never leaves a timer armed that would immediately be cancelled.
        let limit = self.config.limit();
        if limit > 0 && self.ticks >= limit {
            self.halt(StopReason::LimitReached);
            return None;
        }

        self.prev_scheduled_at = self.scheduled_at;
        self.scheduled_at = now + next_delay;

        Some(next_delay)
    }

    /// Suspend until the corrected delay elapses. Even a zero delay goes
    /// through one suspend/resume cycle (see the [`TickTimer`] contract),
    /// which keeps a zero-delay ticker cooperative and stop requests
    /// observable between iterations.
    pub(crate) async fn wait(&mut self, delay_ms: u64) {
        self.timer.delay_ms(delay_ms).await;
    }

    /// Terminal transition shared by `stop()` and the limit check.
    pub(crate) fn halt(&mut self, reason: StopReason) {
        self.state = TickerState::Stopped;

        #[cfg(feature = "defmt")]
        defmt::info!("Ticker stopped after {} ticks", self.ticks);

        let ticks = self.ticks;
        if let Some(task) = self.config.task_mut() {
            task.on_stop(reason, ticks);
        }
    }
}
