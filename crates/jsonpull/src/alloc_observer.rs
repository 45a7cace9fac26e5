//! Allocation instrumentation: an injected observer rather than a
//! process-wide allocator hook.

/// Notified whenever the parser reallocates its pending string/number
/// accumulator (`token_buffer`) to make room for more bytes.
///
/// Chunk buffers and the nesting stack are not covered: a chunk is either
/// taken over from the caller's own allocation or copied once in full
/// (`Chunk::from(&[u8])`), never resized afterwards, and the nesting stack
/// grows too rarely (once per open container) to be worth instrumenting.
/// `token_buffer` is the only buffer whose growth this trait reports.
///
/// This is instrumentation only, not a way to intercept or deny allocation;
/// the parser always uses the global allocator. A benchmark harness is the
/// typical consumer, recording growth events to characterize amortized
/// allocation behavior across chunk sizes.
pub trait AllocObserver {
    /// Called after a buffer grows by `additional_bytes`.
    fn on_grow(&self, additional_bytes: usize);
}

/// The default, zero-cost [`AllocObserver`]: observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAllocObserver;

impl AllocObserver for NullAllocObserver {
    fn on_grow(&self, _additional_bytes: usize) {}
}

#[cfg(test)]
mod tests {
    use super::{AllocObserver, NullAllocObserver};

    #[test]
    fn null_observer_accepts_any_size() {
        let observer = NullAllocObserver;
        observer.on_grow(0);
        observer.on_grow(usize::MAX);
    }
}
