//! Reference collaborator implementations on `embassy-time`, usable on any
//! platform with an embassy time driver. Tests and hosts without one supply
//! their own implementations of the traits instead.
use embassy_time::{Instant, Timer};

use crate::traits::tick_clock::TickClock;
use crate::traits::tick_timer::TickTimer;

/// [`TickTimer`] backed by [`embassy_time::Timer`].
///
/// Delays go through the driver's timer queue, so a zero delay still yields
/// to the executor as the trait contract requires.
pub struct EmbassyTimer;

impl TickTimer for EmbassyTimer {
    async fn delay_ms(&mut self, millis: u64) {
        Timer::after_millis(millis).await;
    }
}

/// [`TickClock`] backed by [`embassy_time::Instant`], which is monotonic
/// since boot. Wall-clock adjustments are never observable through it.
pub struct EmbassyClock;

impl TickClock for EmbassyClock {
    fn now_ms(&mut self) -> u64 {
        Instant::now().as_millis()
    }
}
