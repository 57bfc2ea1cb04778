//! # Quickstart Example
//!
//! Minimal example demonstrating the basics of delta-ticker:
//! - Configure and start a ticker
//! - Watch drift correction hold the cadence while the task eats into it
//! - Stop the ticker from another task through the supervisor handle
//! - Restart the returned ticker
//!
//! This example uses `std` (tokio) for a quick trial run. On embedded
//! targets, implement the timer/clock traits over your HAL, or use the
//! bundled `embassy-time` implementations.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use delta_ticker::config::TickerConfig;
use delta_ticker::supervisor::{TickerCommand, TickerService};
use delta_ticker::ticker::Ticker;
use delta_ticker::traits::tick_clock::TickClock;
use delta_ticker::traits::tick_task::{StopReason, TickTask};
use delta_ticker::traits::tick_timer::TickTimer;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use static_cell::StaticCell;
use std::time::Instant;
use tokio::time::{sleep, Duration};

/// Timer driving delays through tokio sleeps.
struct TokioTimer;

impl TickTimer for TokioTimer {
    async fn delay_ms(&mut self, millis: u64) {
        if millis == 0 {
            // A zero delay must still yield once, per the trait contract.
            tokio::task::yield_now().await;
        } else {
            sleep(Duration::from_millis(millis)).await;
        }
    }
}

/// Monotonic clock against process start.
struct TokioClock(Instant);

impl TickClock for TokioClock {
    fn now_ms(&mut self) -> u64 {
        self.0.elapsed().as_millis() as u64
    }
}

/// Heartbeat doing ~12ms of asynchronous "work" per frame.
struct Heartbeat {
    frame: u32,
}

impl TickTask for Heartbeat {
    async fn run(&mut self, delta_ms: u64) {
        self.frame += 1;
        println!(
            "   frame {:>2}: {delta_ms}ms since the previous scheduled start",
            self.frame
        );
        sleep(Duration::from_millis(12)).await;
    }

    fn on_stop(&mut self, reason: StopReason, ticks: u32) {
        println!("   stopped after {ticks} frames ({reason:?})");
    }
}

type CommandChannel = Channel<CriticalSectionRawMutex, TickerCommand, 1>;

// The stop handle crosses into a spawned task, so the channel needs a
// 'static home.
static COMMANDS: StaticCell<CommandChannel> = StaticCell::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== delta-ticker Quickstart ===\n");

    // ======================================================================
    // 1. Configure a 40ms ticker around a 12ms task
    // ======================================================================
    println!("1. Configuring a 40ms ticker around a 12ms task");

    let config = TickerConfig::new()
        .with_delay_ms(40)
        .with_task(Heartbeat { frame: 0 });
    let mut ticker = Ticker::new(config, TokioTimer, TokioClock(Instant::now()));

    // ======================================================================
    // 2. Start, then split into stop handle + runner
    // ======================================================================
    println!("2. Starting and splitting into handle + runner");

    ticker.start().expect("configuration is complete");
    let channel: &'static CommandChannel = COMMANDS.init(Channel::new());
    let parts = TickerService::new(ticker, Some(channel)).into_parts();
    let handle = parts.handle.expect("channel provided");

    // ======================================================================
    // 3. Tick; a second task requests a stop after ~5 frames
    // ======================================================================
    println!("3. Ticking (watch the deltas settle on 40ms)\n");

    let stopper = tokio::spawn(async move {
        sleep(Duration::from_millis(200)).await;
        handle.stop().await;
    });

    let mut ticker = parts.runner.drive().await;
    stopper.await.expect("stopper task must join");

    // ======================================================================
    // 4. The returned ticker restarts with fresh counters
    // ======================================================================
    println!("\n4. Restarting the returned ticker for 3 more frames\n");

    ticker.configure(TickerConfig::new().with_limit(3));
    ticker.start().expect("still configured");
    ticker.run().await;

    println!("\nQuickstart complete.");
}
