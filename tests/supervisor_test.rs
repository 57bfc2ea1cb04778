//! Supervisor tests: stop requests landing at iteration boundaries,
//! pre-queued stops, channel-less driving, and restart after `drive()`.
mod helpers;

use helpers::{CountingTask, MockTimer, StdClock};

use delta_ticker::config::TickerConfig;
use delta_ticker::supervisor::{TickerCommand, TickerService};
use delta_ticker::ticker::Ticker;
use delta_ticker::traits::tick_task::StopReason;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use tokio::time::{sleep, Duration};

type CommandChannel = Channel<CriticalSectionRawMutex, TickerCommand, 1>;

#[tokio::test]
async fn test_handle_stop_lands_at_iteration_boundary() {
    let channel = CommandChannel::new();

    // Unbounded schedule; only the handle can end it.
    let config = TickerConfig::new()
        .with_delay_ms(10)
        .with_task(CountingTask::default());
    let mut ticker = Ticker::new(config, MockTimer, StdClock::new());
    ticker.start().unwrap();

    let parts = TickerService::new(ticker, Some(&channel)).into_parts();
    let handle = parts.handle.expect("channel provided, handle expected");

    tokio::select! {
        ticker = parts.runner.drive() => {
            assert!(!ticker.is_running());
            let task = ticker.config().task().unwrap();
            assert!(task.runs >= 2, "a few ticks must have fired first");
            assert_eq!(task.stops, 1);
            assert_eq!(task.last_reason, Some(StopReason::Cancelled));
            assert_eq!(task.final_ticks, ticker.ticks());
        }

        _ = async {
            sleep(Duration::from_millis(45)).await;
            handle.stop().await;
            std::future::pending::<()>().await;
        } => {
            panic!("stopper finished before `drive`; the test setup is likely incorrect");
        }
    }
}

#[tokio::test]
async fn test_prequeued_stop_prevents_any_dispatch() {
    let channel = CommandChannel::new();

    let config = TickerConfig::new()
        .with_delay_ms(5)
        .with_task(CountingTask::default());
    let mut ticker = Ticker::new(config, MockTimer, StdClock::new());
    ticker.start().unwrap();

    let parts = TickerService::new(ticker, Some(&channel)).into_parts();
    let handle = parts.handle.unwrap();

    // Queued before the runner is first polled.
    handle.stop().await;

    let ticker = parts.runner.drive().await;
    let task = ticker.config().task().unwrap();
    assert_eq!(task.runs, 0, "no iteration may fire after a queued stop");
    assert_eq!(task.stops, 1);
    assert_eq!(task.last_reason, Some(StopReason::Cancelled));
}

#[tokio::test]
async fn test_try_stop_reports_a_full_channel() {
    let channel = CommandChannel::new();

    let config = TickerConfig::new()
        .with_delay_ms(5)
        .with_task(CountingTask::default());
    let mut ticker = Ticker::new(config, MockTimer, StdClock::new());
    ticker.start().unwrap();

    let parts = TickerService::new(ticker, Some(&channel)).into_parts();
    let handle = parts.handle.unwrap();

    assert!(handle.try_stop());
    // A stop is already queued and nobody drained it yet.
    assert!(!handle.try_stop());

    let ticker = parts.runner.drive().await;
    assert_eq!(ticker.config().task().unwrap().runs, 0);
}

#[tokio::test]
async fn test_drive_without_channel_runs_to_limit() {
    let config = TickerConfig::new()
        .with_delay_ms(2)
        .with_limit(4)
        .with_task(CountingTask::default());
    let mut ticker = Ticker::new(config, MockTimer, StdClock::new());
    ticker.start().unwrap();

    let parts =
        TickerService::<_, _, _, 1>::new(ticker, None).into_parts();
    assert!(parts.handle.is_none());

    let ticker = parts.runner.drive().await;
    assert_eq!(ticker.ticks(), 4);
    assert_eq!(
        ticker.config().task().unwrap().last_reason,
        Some(StopReason::LimitReached)
    );
}

#[tokio::test]
async fn test_ticker_returned_by_drive_can_restart() {
    let channel = CommandChannel::new();

    let config = TickerConfig::new()
        .with_delay_ms(2)
        .with_limit(2)
        .with_task(CountingTask::default());
    let mut ticker = Ticker::new(config, MockTimer, StdClock::new());
    ticker.start().unwrap();

    let parts = TickerService::new(ticker, Some(&channel)).into_parts();
    let mut ticker = parts.runner.drive().await;
    assert_eq!(ticker.ticks(), 2);

    ticker.configure(TickerConfig::new().with_limit(3));
    ticker.start().unwrap();
    ticker.run().await;

    assert_eq!(ticker.ticks(), 3);
    assert_eq!(ticker.config().task().unwrap().runs, 5);
}
