//! Shared UI primitives for dialogs.

mod spinner;

pub use spinner::Spinner;

/// Result of handling an input event.
///
/// - `Ignored` - the handler didn't recognize or handle this input
/// - `Consumed` - the input was handled but produced no event
/// - `Event(E)` - the input was handled and produced an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    /// Input was not handled, the caller should process it.
    Ignored,
    /// Input was consumed but produced no event.
    Consumed,
    /// Input was consumed and produced an event.
    Event(E),
}

impl<E> EventResult<E> {
    /// True if the input was consumed, with or without an event.
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_consumed() {
        assert!(!EventResult::<()>::Ignored.is_consumed());
        assert!(EventResult::<()>::Consumed.is_consumed());
        assert!(EventResult::Event(5).is_consumed());
    }
}
