//! Connection handle the hooks push events through.
//!
//! The socket is owned by the composing application and passed into each hook
//! at mount, so nothing in this crate reaches for ambient global state.

use crate::events::ClientEvent;

/// Outbound half of the bidirectional event channel.
///
/// Implementations are expected to be cheap to call from timer callbacks;
/// delivery failures are the transport's concern, not the hooks'.
pub trait EventChannel {
    fn push(&self, event: ClientEvent);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every pushed event for assertions.
    #[derive(Default, Clone)]
    pub struct RecordingChannel {
        pub sent: Rc<RefCell<Vec<ClientEvent>>>,
    }

    impl EventChannel for RecordingChannel {
        fn push(&self, event: ClientEvent) {
            self.sent.borrow_mut().push(event);
        }
    }
}
