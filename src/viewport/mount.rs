//! Mount handles and loading flags
//!
//! Both are shared between a page (which lays out and draws) and the
//! viewport mounted into it (which renders and loads).

use crate::ui::Rect;
use std::cell::Cell;
use std::rc::Rc;

/// Shared region a viewport renders into
#[derive(Debug, Clone, Default)]
pub struct MountHandle(Rc<Cell<Rect>>);

impl MountHandle {
    pub fn new(rect: Rect) -> Self {
        Self(Rc::new(Cell::new(rect)))
    }

    pub fn get(&self) -> Rect {
        self.0.get()
    }

    /// Returns true if the region's size changed
    pub fn set(&self, rect: Rect) -> bool {
        let old = self.0.replace(rect);
        old.w != rect.w || old.h != rect.h
    }
}

#[derive(Debug)]
struct LoadingState {
    loading: Cell<bool>,
    transitions: Cell<u32>,
}

/// Card-local "still loading" flag
///
/// Starts `true` and may move to `false` once; it never goes back.
#[derive(Debug, Clone)]
pub struct LoadingFlag(Rc<LoadingState>);

impl LoadingFlag {
    pub fn new() -> Self {
        Self(Rc::new(LoadingState {
            loading: Cell::new(true),
            transitions: Cell::new(0),
        }))
    }

    pub fn is_loading(&self) -> bool {
        self.0.loading.get()
    }

    /// Apply a reported loading state. Only `true -> false` has an effect.
    pub fn update(&self, loading: bool) {
        if !loading && self.0.loading.get() {
            self.0.loading.set(false);
            self.0.transitions.set(self.0.transitions.get() + 1);
        }
    }

    /// Number of times the flag has been cleared (0 or 1)
    #[cfg(test)]
    pub fn transitions(&self) -> u32 {
        self.0.transitions.get()
    }

    /// Completion callback for [`super::Viewport::mount`] that clears this flag
    pub fn callback(&self) -> super::OnSettled {
        let flag = self.clone();
        Box::new(move |loading| flag.update(loading))
    }
}

impl Default for LoadingFlag {
    fn default() -> Self {
        Self::new()
    }
}
