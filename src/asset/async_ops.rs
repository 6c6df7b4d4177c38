//! Async Operations
//!
//! Fire-and-poll handles for work that finishes on a later frame. The
//! producer side holds a [`Completer`], the frame loop polls the
//! [`AsyncOp`]. Works the same natively (completed from a worker thread)
//! and on WASM (completed from the main loop after an async fetch).

use super::LoadError;
use std::sync::mpsc::{channel as mpsc_channel, Receiver, Sender, TryRecvError};

/// Result type for async operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Producer half of an [`AsyncOp`]
pub struct Completer<T> {
    sender: Sender<LoadResult<T>>,
}

impl<T> Completer<T> {
    /// Deliver the outcome. Consumes the completer so it fires at most once.
    pub fn complete(self, result: LoadResult<T>) {
        // Receiver may already be gone (viewport unmounted)
        let _ = self.sender.send(result);
    }
}

/// A handle to a pending async operation that can be polled
pub struct AsyncOp<T> {
    receiver: Receiver<LoadResult<T>>,
    result: Option<LoadResult<T>>,
}

/// Create a linked completer/handle pair
pub fn channel<T>() -> (Completer<T>, AsyncOp<T>) {
    let (sender, receiver) = mpsc_channel();
    (Completer { sender }, AsyncOp { receiver, result: None })
}

impl<T> AsyncOp<T> {
    /// Already-resolved handle
    #[cfg(test)]
    pub fn ready(result: LoadResult<T>) -> Self {
        let (completer, op) = channel();
        completer.complete(result);
        op
    }

    /// Check if the operation has completed (polls the channel)
    pub fn is_complete(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }

        match self.receiver.try_recv() {
            Ok(result) => {
                self.result = Some(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                // Worker panicked or the completer was dropped
                self.result = Some(Err(LoadError::Dropped));
                true
            }
        }
    }

    /// Take the result if complete
    pub fn take(mut self) -> Option<LoadResult<T>> {
        if self.is_complete() {
            self.result
        } else {
            None
        }
    }

    /// Get a reference to the result if complete
    #[cfg(test)]
    pub fn result(&self) -> Option<&LoadResult<T>> {
        self.result.as_ref()
    }
}
