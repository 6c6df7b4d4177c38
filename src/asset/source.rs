//! Model sources
//!
//! Native builds read and decode on a worker thread. The browser build
//! queues requests and resolves them from the main loop with macroquad's
//! async file loader, since there are no threads there.

use super::async_ops::channel;
use super::{decode_model, LoadError, ModelSource, PendingModel};

/// Loads models from the filesystem on background threads
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct ThreadedSource;

#[cfg(not(target_arch = "wasm32"))]
impl ThreadedSource {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ModelSource for ThreadedSource {
    fn begin(&mut self, locator: &str) -> PendingModel {
        let (completer, op) = channel();
        let path = locator.to_string();

        let spawned = std::thread::Builder::new()
            .name(format!("load {}", path))
            .spawn(move || {
                let result = std::fs::read(&path)
                    .map_err(|e| LoadError::Io(format!("{}: {}", path, e)))
                    .and_then(|bytes| decode_model(&bytes));
                completer.complete(result);
            });

        if let Err(e) = spawned {
            // Completer moved into the failed closure and is dropped with it,
            // so the handle resolves to Dropped on its first poll
            log::warn!("could not spawn loader thread for {}: {}", locator, e);
        }

        PendingModel {
            op,
            locator: locator.to_string(),
        }
    }
}

#[cfg(any(target_arch = "wasm32", test))]
mod queued {
    use super::*;
    use crate::asset::async_ops::Completer;
    use crate::asset::ModelData;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    type Queue = Rc<RefCell<VecDeque<(String, Completer<ModelData>)>>>;

    /// Queues load requests for a [`FetchPump`] to resolve
    #[derive(Default)]
    pub struct QueuedSource {
        queue: Queue,
    }

    impl QueuedSource {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pump sharing this source's queue, driven from the main loop
        pub fn pump(&self) -> FetchPump {
            FetchPump { queue: Rc::clone(&self.queue) }
        }
    }

    impl ModelSource for QueuedSource {
        fn begin(&mut self, locator: &str) -> PendingModel {
            let (completer, op) = channel();
            self.queue.borrow_mut().push_back((locator.to_string(), completer));
            PendingModel {
                op,
                locator: locator.to_string(),
            }
        }
    }

    /// Resolves queued loads with async file fetches
    pub struct FetchPump {
        queue: Queue,
    }

    impl FetchPump {
        #[cfg(test)]
        pub fn pending(&self) -> usize {
            self.queue.borrow().len()
        }

        /// Resolve every request queued so far
        pub async fn pump(&self) {
            loop {
                // Borrow released before the await
                let next = self.queue.borrow_mut().pop_front();
                let Some((path, completer)) = next else {
                    break;
                };
                let result = macroquad::file::load_file(&path)
                    .await
                    .map_err(|e| LoadError::Io(format!("{}: {}", path, e)))
                    .and_then(|bytes| decode_model(&bytes));
                completer.complete(result);
            }
        }
    }
}

#[cfg(any(target_arch = "wasm32", test))]
pub use queued::{FetchPump, QueuedSource};
