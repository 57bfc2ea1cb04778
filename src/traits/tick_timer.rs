//! Asynchronous timer abstraction providing the single-shot delay the
//! ticker arms between iterations.

/// Timer trait abstraction; must remain thread-safe when applicable.
///
/// Cancellation is dropping the returned future before completion; the
/// drive loop relies on this to disarm a pending delay on stop.
///
/// Contract: a delay of 0 must still yield to the executor (reach a
/// suspension point), never complete synchronously inside the caller's
/// stack. A zero-delay ticker stays cooperative because of this.
pub trait TickTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(
        &'a mut self,
        millis: u64,
    ) -> impl core::future::Future<Output = ()> + 'a;
}
