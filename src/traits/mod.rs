//! Abstraction traits used by the ticker (task, timer, and clock).
pub mod tick_clock;
pub mod tick_task;
pub mod tick_timer;
