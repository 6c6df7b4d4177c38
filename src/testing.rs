//! Test doubles for model loading and rendering

use crate::asset::async_ops::{channel, Completer, LoadResult};
use crate::asset::{ModelData, ModelSource, PendingModel};
use crate::render::{RenderDevice, Renderer, RendererOptions};
use crate::scene::{PerspectiveCamera, Scene};
use macroquad::math::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

type Requests = Rc<RefCell<Vec<(String, Option<Completer<ModelData>>)>>>;

/// Model source whose loads finish only when a test says so
///
/// Clones share requests, so a test can keep one while the app owns another.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    requests: Requests,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locators requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|(l, _)| l.clone()).collect()
    }

    /// Complete the first unresolved request for `locator`
    pub fn resolve(&self, locator: &str, result: LoadResult<ModelData>) {
        if let Some(completer) = self.take(locator) {
            completer.complete(result);
        }
    }

    /// Drop the completer without sending anything
    pub fn abandon(&self, locator: &str) {
        drop(self.take(locator));
    }

    fn take(&self, locator: &str) -> Option<Completer<ModelData>> {
        self.requests
            .borrow_mut()
            .iter_mut()
            .find(|(l, c)| l == locator && c.is_some())
            .and_then(|(_, c)| c.take())
    }
}

impl ModelSource for ScriptedSource {
    fn begin(&mut self, locator: &str) -> PendingModel {
        let (completer, op) = channel();
        self.requests.borrow_mut().push((locator.to_string(), Some(completer)));
        PendingModel {
            op,
            locator: locator.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    SetSize(f32, f32),
    Render { origin: Vec2, nodes: usize },
    Dispose,
}

type EventLog = Rc<RefCell<Vec<Vec<RenderEvent>>>>;

/// Render device that records what each of its renderers was asked to do
#[derive(Clone, Default)]
pub struct RecordingDevice {
    log: EventLog,
    options: Rc<RefCell<Vec<RendererOptions>>>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renderer_count(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn options(&self, index: usize) -> Option<RendererOptions> {
        self.options.borrow().get(index).copied()
    }

    /// Events of the `index`th renderer created
    pub fn events(&self, index: usize) -> Vec<RenderEvent> {
        self.log.borrow().get(index).cloned().unwrap_or_default()
    }

    pub fn render_count(&self, index: usize) -> usize {
        self.events(index)
            .iter()
            .filter(|e| matches!(e, RenderEvent::Render { .. }))
            .count()
    }

    pub fn dispose_count(&self, index: usize) -> usize {
        self.events(index)
            .iter()
            .filter(|e| matches!(e, RenderEvent::Dispose))
            .count()
    }
}

impl RenderDevice for RecordingDevice {
    fn create_renderer(&self, options: RendererOptions) -> Box<dyn Renderer> {
        let mut log = self.log.borrow_mut();
        log.push(Vec::new());
        self.options.borrow_mut().push(options);
        Box::new(RecordingRenderer {
            index: log.len() - 1,
            log: Rc::clone(&self.log),
            size: (0.0, 0.0),
            disposed: false,
        })
    }
}

pub struct RecordingRenderer {
    index: usize,
    log: EventLog,
    size: (f32, f32),
    disposed: bool,
}

impl RecordingRenderer {
    fn record(&self, event: RenderEvent) {
        if let Some(events) = self.log.borrow_mut().get_mut(self.index) {
            events.push(event);
        }
    }
}

impl Renderer for RecordingRenderer {
    fn set_size(&mut self, width: f32, height: f32) {
        self.size = (width, height);
        self.record(RenderEvent::SetSize(width, height));
    }

    fn size(&self) -> (f32, f32) {
        self.size
    }

    fn render(&mut self, origin: Vec2, scene: &Scene, _camera: &PerspectiveCamera) {
        if self.disposed {
            return;
        }
        self.record(RenderEvent::Render { origin, nodes: scene.len() });
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.record(RenderEvent::Dispose);
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
