//! Supervisor layer built on top of [`Ticker`].
//!
//! It keeps the drive loop alive and optionally offers a stop handle
//! (`TickerHandle`) other tasks can queue requests through. Requests land at
//! iteration boundaries only: a task currently executing is never
//! interrupted, and a pending inter-iteration delay is disarmed by dropping
//! its future.
//!
//! The embedding code decides whether it needs the handle by providing a
//! pre-allocated [`embassy_sync::channel::Channel`] instance. No allocation
//! is performed by the library and there is no dependency on a particular
//! executor.

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Sender},
};
use futures_util::{future::select, future::Either, pin_mut};

use crate::ticker::Ticker;
use crate::traits::tick_clock::TickClock;
use crate::traits::tick_task::{StopReason, TickTask};
use crate::traits::tick_timer::TickTimer;

/// Requests queued by producer tasks.
pub enum TickerCommand {
    /// End the run at the next iteration boundary.
    Stop,
}

/// Service assembling the supervisor components.
pub struct TickerService<'a, K, T, C, const CMD_CAP: usize>
where
    K: TickTask,
    T: TickTimer,
    C: TickClock,
{
    ticker: Ticker<K, T, C>,
    command_channel: Option<&'a Channel<CriticalSectionRawMutex, TickerCommand, CMD_CAP>>,
}

impl<'a, K, T, C, const CMD_CAP: usize> TickerService<'a, K, T, C, CMD_CAP>
where
    K: TickTask,
    T: TickTimer,
    C: TickClock,
{
    /// Wrap an already-configured [`Ticker`]. Start the ticker before
    /// driving the runner; a runner over a non-running ticker returns it
    /// untouched.
    pub fn new(
        ticker: Ticker<K, T, C>,
        command_channel: Option<&'a Channel<CriticalSectionRawMutex, TickerCommand, CMD_CAP>>,
    ) -> Self {
        Self {
            ticker,
            command_channel,
        }
    }

    /// Split into handle/runner components.
    pub fn into_parts(self) -> TickerServiceParts<'a, K, T, C, CMD_CAP> {
        let handle = self.command_channel.map(|channel| TickerHandle {
            sender: channel.sender(),
        });
        TickerServiceParts {
            handle,
            runner: TickerRunner {
                ticker: self.ticker,
                command_channel: self.command_channel,
            },
        }
    }
}

/// Bundle returned by [`TickerService::into_parts`].
pub struct TickerServiceParts<'a, K, T, C, const CMD_CAP: usize>
where
    K: TickTask,
    T: TickTimer,
    C: TickClock,
{
    pub handle: Option<TickerHandle<'a, CMD_CAP>>,
    pub runner: TickerRunner<'a, K, T, C, CMD_CAP>,
}

/// Stop handle (optional).
pub struct TickerHandle<'a, const CMD_CAP: usize> {
    sender: Sender<'a, CriticalSectionRawMutex, TickerCommand, CMD_CAP>,
}

impl<'a, const CMD_CAP: usize> TickerHandle<'a, CMD_CAP> {
    /// Queue a stop request. Waits for channel capacity; the request takes
    /// effect at the next iteration boundary the drive loop reaches.
    pub async fn stop(&self) {
        self.sender.send(TickerCommand::Stop).await;
    }

    /// Non-blocking variant of [`stop`](Self::stop). Returns `false` when
    /// the channel is full (a stop is already queued).
    pub fn try_stop(&self) -> bool {
        self.sender.try_send(TickerCommand::Stop).is_ok()
    }
}

/// Runner that drives the ticker loop.
pub struct TickerRunner<'a, K, T, C, const CMD_CAP: usize>
where
    K: TickTask,
    T: TickTimer,
    C: TickClock,
{
    ticker: Ticker<K, T, C>,
    command_channel: Option<&'a Channel<CriticalSectionRawMutex, TickerCommand, CMD_CAP>>,
}

impl<'a, K, T, C, const CMD_CAP: usize> TickerRunner<'a, K, T, C, CMD_CAP>
where
    K: TickTask,
    T: TickTimer,
    C: TickClock,
{
    /// Drive iterations until the ticker stops, then return it so the
    /// embedding code can inspect counters, reconfigure, and restart.
    pub async fn drive(mut self) -> Ticker<K, T, C> {
        let Some(cmd_ch) = self.command_channel else {
            self.ticker.run().await;
            return self.ticker;
        };

        while self.ticker.is_running() {
            // A request queued before this point takes effect first, so a
            // stop issued before the first poll prevents any dispatch.
            if cmd_ch.try_receive().is_ok() {
                self.ticker.halt(StopReason::Cancelled);
                break;
            }

            let Some(next_delay) = self.ticker.step().await else {
                break;
            };

            // Race the corrected wait against an incoming stop request.
            let command_received = {
                let wait = self.ticker.wait(next_delay);
                let command = cmd_ch.receive();
                pin_mut!(wait);
                pin_mut!(command);

                match select(command, wait).await {
                    Either::Left((TickerCommand::Stop, pending_wait)) => {
                        drop(pending_wait);
                        true
                    }
                    Either::Right(((), pending_command)) => {
                        drop(pending_command);
                        false
                    }
                }
            }; // the armed delay is dropped here, disarming it

            if command_received {
                self.ticker.halt(StopReason::Cancelled);
                break;
            }
        }

        self.ticker
    }
}
