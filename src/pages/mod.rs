//! Routed pages
//!
//! Each page is mounted when its route becomes active and unmounted when
//! the route changes. Pages draw themselves every frame and report
//! navigation requests back to the shell.

pub mod auth;
pub mod landing;
pub mod options;

pub use auth::{AuthKind, AuthPage};
pub use landing::LandingPage;
pub use options::OptionsPage;

use crate::asset::ModelSource;
use crate::config::AppConfig;
use crate::render::RenderDevice;
use crate::router::Route;
use crate::ui::UiContext;
use crate::viewport::ResizeEvents;

/// What a page wants the shell to do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    None,
    Navigate(Route),
}

/// Services available while mounting a page
pub struct MountServices<'a> {
    pub source: &'a mut dyn ModelSource,
    pub device: &'a dyn RenderDevice,
    pub resize: &'a mut ResizeEvents,
    pub config: &'a AppConfig,
    /// Window size in logical pixels
    pub window: (f32, f32),
    /// Clock reading at mount, seconds
    pub now: f64,
}

/// Per-frame state passed to a page's draw
pub struct FrameContext<'a> {
    pub ui: &'a mut UiContext,
    pub resize: &'a mut ResizeEvents,
    pub window: (f32, f32),
    pub now: f64,
}
