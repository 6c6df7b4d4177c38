//! Application state and page management
//!
//! One page is mounted at a time, picked by the router. Changing route
//! unmounts the current page (tearing down its viewports and releasing its
//! resize listeners) before the next one is mounted.

use crate::asset::ModelSource;
use crate::backend::BackendClient;
use crate::config::AppConfig;
use crate::pages::{AuthKind, AuthPage, FrameContext, LandingPage, MountServices, OptionsPage, PageAction};
use crate::render::RenderDevice;
use crate::router::{Route, Router};
use crate::ui::UiContext;
use crate::viewport::ResizeEvents;

/// The page currently on screen
pub enum MountedPage {
    /// Unknown path: nothing is drawn
    Empty,
    Landing(LandingPage),
    Options(OptionsPage),
    Auth(AuthPage),
}

pub struct AppState {
    router: Router,
    page: MountedPage,
    resize: ResizeEvents,
    config: AppConfig,
    /// Initialized at startup, not used by any page yet
    #[allow(dead_code)]
    backend: Option<Box<dyn BackendClient>>,
    source: Box<dyn ModelSource>,
    device: Box<dyn RenderDevice>,
    window: (f32, f32),
}

impl AppState {
    /// Create the shell and mount the landing page
    pub fn new(
        config: AppConfig,
        backend: Option<Box<dyn BackendClient>>,
        source: Box<dyn ModelSource>,
        device: Box<dyn RenderDevice>,
        window: (f32, f32),
        now: f64,
    ) -> Self {
        let mut app = Self {
            router: Router::new(),
            page: MountedPage::Empty,
            resize: ResizeEvents::new(),
            config,
            backend,
            source,
            device,
            window,
        };
        app.mount_current(now);
        app
    }

    #[cfg(test)]
    pub fn current_path(&self) -> &str {
        self.router.current_path()
    }

    #[cfg(test)]
    pub fn page(&self) -> &MountedPage {
        &self.page
    }

    #[cfg(test)]
    pub fn backend(&self) -> Option<&dyn BackendClient> {
        self.backend.as_deref()
    }

    #[cfg(test)]
    pub fn resize_listeners(&self) -> usize {
        self.resize.listener_count()
    }

    /// Go to `path`, remounting only if it differs from the current one
    pub fn navigate(&mut self, path: &str, now: f64) -> bool {
        if !self.router.navigate(path) {
            return false;
        }
        log::info!("navigate to {}", path);
        self.remount(now);
        true
    }

    /// Return to the previous path, if any
    pub fn back(&mut self, now: f64) -> bool {
        if !self.router.back() {
            return false;
        }
        log::info!("back to {}", self.router.current_path());
        self.remount(now);
        true
    }

    fn remount(&mut self, now: f64) {
        self.unmount();
        self.mount_current(now);
    }

    fn unmount(&mut self) {
        match &mut self.page {
            MountedPage::Landing(page) => page.unmount(&mut self.resize),
            MountedPage::Options(page) => page.unmount(&mut self.resize),
            MountedPage::Auth(_) | MountedPage::Empty => {}
        }
        self.page = MountedPage::Empty;
    }

    fn mount_current(&mut self, now: f64) {
        let route = self.router.current_route();
        let mut services = MountServices {
            source: self.source.as_mut(),
            device: self.device.as_ref(),
            resize: &mut self.resize,
            config: &self.config,
            window: self.window,
            now,
        };
        self.page = match route {
            Some(Route::Landing) => MountedPage::Landing(LandingPage::mount(&mut services)),
            Some(Route::Options) => MountedPage::Options(OptionsPage::mount(&mut services)),
            Some(Route::SignUp) => MountedPage::Auth(AuthPage::new(AuthKind::SignUp)),
            Some(Route::Login) => MountedPage::Auth(AuthPage::new(AuthKind::Login)),
            None => {
                log::warn!("no page at {}", self.router.current_path());
                MountedPage::Empty
            }
        };
    }

    /// Record a new window size and notify resize listeners. Returns true if
    /// the size changed.
    pub fn window_resized(&mut self, width: f32, height: f32) -> bool {
        if (width, height) == self.window {
            return false;
        }
        self.window = (width, height);
        self.resize.fire();
        true
    }

    /// Draw the mounted page and follow any navigation it asks for
    pub fn draw(&mut self, ui: &mut UiContext, now: f64) {
        let mut frame = FrameContext {
            ui,
            resize: &mut self.resize,
            window: self.window,
            now,
        };
        let action = match &mut self.page {
            MountedPage::Landing(page) => page.draw(&mut frame),
            MountedPage::Options(page) => page.draw(&mut frame),
            MountedPage::Auth(page) => page.draw(&mut frame),
            MountedPage::Empty => PageAction::None,
        };

        if let PageAction::Navigate(route) = action {
            self.navigate(route.path(), now);
        }
    }

    /// Live model viewports on the current page
    #[cfg(test)]
    pub fn viewport_count(&self) -> usize {
        match &self.page {
            MountedPage::Options(page) => page.viewport_count(),
            _ => 0,
        }
    }

    /// Live hero scenes on the current page
    #[cfg(test)]
    pub fn hero_count(&self) -> usize {
        match &self.page {
            MountedPage::Landing(page) if !page.hero().is_disposed() => 1,
            _ => 0,
        }
    }

    /// Advance the current page's viewports without drawing
    #[cfg(test)]
    fn tick(&mut self) {
        if let MountedPage::Options(page) = &mut self.page {
            page.tick(&mut self.resize);
        }
    }
}
