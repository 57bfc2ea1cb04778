//! `delta-ticker` library: a self-correcting periodic task scheduler for
//! async executors in a `no_std` environment. The crate exposes the ticker
//! state machine, the collaborator traits it is driven through (task, timer,
//! clock), a supervisor layer for cross-task stop requests, and reference
//! timer/clock implementations backed by `embassy-time`.
#![no_std]
//==================================================================================
/// Ticker configuration: incremental assembly, merging, and validation.
pub mod config;
/// Lifecycle and configuration errors (missing fields, invalid transitions).
pub mod error;
/// Service/handle/runner split delivering stop requests into the drive loop.
pub mod supervisor;
/// The ticker state machine and its drift-correction algorithm.
pub mod ticker;
/// Reference `TickTimer`/`TickClock` implementations on `embassy-time`.
pub mod time;
/// Abstraction traits the ticker is driven through (task, timer, clock).
pub mod traits;
//==================================================================================
