//! Model loading
//!
//! Models are loaded off the frame: a [`ModelSource`] hands back a
//! [`PendingModel`] right away and the caller polls it each frame until it
//! resolves to a [`ModelData`] or a [`LoadError`].

pub mod async_ops;
pub mod model;
pub mod source;

pub use async_ops::AsyncOp;
pub use model::decode_model;
#[cfg(any(target_arch = "wasm32", test))]
pub use source::{FetchPump, QueuedSource};
#[cfg(not(target_arch = "wasm32"))]
pub use source::ThreadedSource;

use crate::scene::{Node, Primitive};
use thiserror::Error;

/// Errors from loading a model file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read model: {0}")]
    Io(String),
    #[error("invalid model data: {0}")]
    Decode(String),
    #[error("decompression failed: {0}")]
    Decompress(#[from] std::io::Error),
    #[error("model contains no triangle geometry")]
    Empty,
    #[error("loader went away before finishing")]
    Dropped,
}

/// Decoded model: primitives with node transforms baked into the vertices
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub primitives: Vec<Primitive>,
}

impl ModelData {
    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(|p| p.mesh.triangle_count()).sum()
    }

    /// Wrap as a scene node at the origin with unit scale
    pub fn into_node(self, name: impl Into<String>) -> Node {
        Node::new(name, self.primitives)
    }
}

/// A model load in flight
pub struct PendingModel {
    pub op: AsyncOp<ModelData>,
    pub locator: String,
}

/// Something that can start model loads
pub trait ModelSource {
    /// Start loading `locator`. Never blocks.
    fn begin(&mut self, locator: &str) -> PendingModel;
}
