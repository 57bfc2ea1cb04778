/// Test doubles to drive the ticker against real time during integration
/// tests.
use delta_ticker::traits::tick_clock::TickClock;
use delta_ticker::traits::tick_task::{StopReason, TickTask};
use delta_ticker::traits::tick_timer::TickTimer;
use std::time::Instant;
use tokio::time::{sleep, Duration};

#[allow(dead_code)]
/// Timer based on `tokio::time::sleep` to drive delays in tests.
pub struct MockTimer;

impl TickTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u64) {
        if millis == 0 {
            // A zero delay must still yield once, per the trait contract.
            tokio::task::yield_now().await;
        } else {
            sleep(Duration::from_millis(millis)).await;
        }
    }
}

#[allow(dead_code)]
/// Monotonic clock reading `std::time::Instant` against a fixed origin.
pub struct StdClock(Instant);

#[allow(dead_code)]
impl StdClock {
    pub fn new() -> Self {
        Self(Instant::now())
    }
}

impl TickClock for StdClock {
    fn now_ms(&mut self) -> u64 {
        self.0.elapsed().as_millis() as u64
    }
}

#[allow(dead_code)]
/// Task counting its dispatches; completion is immediate.
#[derive(Default)]
pub struct CountingTask {
    pub runs: u32,
    pub stops: u32,
    pub last_reason: Option<StopReason>,
    pub final_ticks: u32,
}

impl TickTask for CountingTask {
    async fn run(&mut self, _delta_ms: u64) {
        self.runs += 1;
    }

    fn on_stop(&mut self, reason: StopReason, ticks: u32) {
        self.stops += 1;
        self.last_reason = Some(reason);
        self.final_ticks = ticks;
    }
}

#[allow(dead_code)]
/// Task stamping each dispatch on a wall clock, recording the delta it was
/// handed, and then sleeping a scripted amount (asynchronous work whose
/// duration rotates through `busy_ms`).
pub struct StampingTask {
    origin: Instant,
    pub stamps: Vec<u64>,
    pub deltas: Vec<u64>,
    pub busy_ms: Vec<u64>,
    pub stops: u32,
    pub last_reason: Option<StopReason>,
}

#[allow(dead_code)]
impl StampingTask {
    /// `busy_ms` cycles per iteration; an empty list means instant tasks.
    pub fn new(busy_ms: Vec<u64>) -> Self {
        Self {
            origin: Instant::now(),
            stamps: Vec::new(),
            deltas: Vec::new(),
            busy_ms,
            stops: 0,
            last_reason: None,
        }
    }

    /// Gaps between consecutive dispatch stamps, in ms.
    pub fn measured_periods(&self) -> Vec<u64> {
        self.stamps.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Average of the measured periods, in ms.
    pub fn average_period(&self) -> u64 {
        let periods = self.measured_periods();
        periods.iter().sum::<u64>() / periods.len() as u64
    }
}

impl TickTask for StampingTask {
    async fn run(&mut self, delta_ms: u64) {
        self.stamps.push(self.origin.elapsed().as_millis() as u64);
        self.deltas.push(delta_ms);
        if !self.busy_ms.is_empty() {
            let busy = self.busy_ms[(self.stamps.len() - 1) % self.busy_ms.len()];
            if busy > 0 {
                sleep(Duration::from_millis(busy)).await;
            }
        }
    }

    fn on_stop(&mut self, reason: StopReason, _ticks: u32) {
        self.stops += 1;
        self.last_reason = Some(reason);
    }
}
