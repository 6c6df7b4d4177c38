//! 3D model viewport
//!
//! Wires a scene, camera, lights, orbit controls and a renderer into a
//! region of a page, loads a model into it and renders it every frame.
//!
//! Lifecycle: `Initializing -> Loading -> {Rendered, RenderedFallback}`,
//! with `teardown` moving any phase to `TornDown`. Nothing is rendered while
//! the model is loading. The completion callback fires once, with `false`,
//! when the load settles either way. If the viewport is torn down first the
//! callback is dropped without firing.

pub mod events;
pub mod mount;

pub use events::{ListenerId, ResizeEvents};
pub use mount::{LoadingFlag, MountHandle};

use crate::asset::{LoadError, ModelSource, PendingModel};
use crate::config::ViewerSettings;
use crate::render::{RenderDevice, Renderer, RendererOptions};
use crate::scene::{
    box_mesh, ControlInput, Light, Material, Node, NodeId, OrbitControls, PerspectiveCamera, Scene,
};
use macroquad::color::Color;
use macroquad::math::{vec2, Vec3};

/// Called with the "still loading" state once the load settles
pub type OnSettled = Box<dyn FnOnce(bool)>;

/// Scene node holding a loaded model
const MODEL_NODE: &str = "model";

/// Flat green shown when a model can't be loaded
pub const FALLBACK_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// Fallback cube spin per frame on X and Y (radians)
pub const FALLBACK_SPIN: f32 = 0.01;

pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;

const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Loading,
    Rendered,
    RenderedFallback,
    TornDown,
}

/// Shared services a viewport needs while mounting
pub struct MountContext<'a> {
    pub source: &'a mut dyn ModelSource,
    pub device: &'a dyn RenderDevice,
    pub resize: &'a mut ResizeEvents,
    pub settings: &'a ViewerSettings,
}

pub struct Viewport {
    mount: MountHandle,
    locator: String,
    phase: Phase,
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    renderer: Box<dyn Renderer>,
    pending: Option<PendingModel>,
    on_settled: Option<OnSettled>,
    listener: Option<ListenerId>,
    fallback: Option<NodeId>,
}

impl Viewport {
    /// Set up the scene in `mount` and start loading `locator`
    pub fn mount(mount: MountHandle, locator: &str, on_settled: OnSettled, ctx: MountContext<'_>) -> Self {
        let settings = ctx.settings;
        let rect = mount.get();

        let mut camera = PerspectiveCamera::new(settings.fov, rect.w / rect.h, NEAR, FAR);
        camera.position = Vec3::new(0.0, 0.0, settings.camera_distance);
        camera.look_at(Vec3::ZERO);

        let mut renderer = ctx.device.create_renderer(RendererOptions {
            transparent: true,
            antialias: true,
        });
        renderer.set_size(rect.w, rect.h);

        let controls = OrbitControls::new(&camera, settings.orbit_settings());

        let mut scene = Scene::new();
        scene.add_light(Light::ambient(WHITE, settings.ambient_intensity));
        scene.add_light(Light::directional(
            WHITE,
            settings.directional_intensity,
            settings.directional_position(),
        ));

        let mut viewport = Self {
            mount,
            locator: locator.to_string(),
            phase: Phase::Initializing,
            scene,
            camera,
            controls,
            renderer,
            pending: None,
            on_settled: Some(on_settled),
            listener: None,
            fallback: None,
        };

        viewport.pending = Some(ctx.source.begin(locator));
        viewport.phase = Phase::Loading;
        viewport.listener = Some(ctx.resize.add_listener());
        log::debug!("viewport mounted for {} at {:?}", locator, rect);
        viewport
    }

    /// Run one frame: deliver a finished load, apply a pending resize, then
    /// update and draw if the render loop is running
    pub fn frame(&mut self, resize: &mut ResizeEvents, input: Option<&ControlInput>) {
        if self.phase == Phase::TornDown {
            return;
        }

        self.poll_load();

        if let Some(id) = self.listener {
            if resize.take(id) {
                self.handle_resize();
            }
        }

        if !self.is_running() {
            return;
        }

        if let Some(input) = input {
            self.controls.handle_input(input, &self.camera);
        }
        if let Some(node) = self.fallback.and_then(|id| self.scene.node_mut(id)) {
            node.transform.rotation.x += FALLBACK_SPIN;
            node.transform.rotation.y += FALLBACK_SPIN;
        }
        self.controls.update(&mut self.camera);
        self.draw();
    }

    fn poll_load(&mut self) {
        let complete = match self.pending.as_mut() {
            Some(pending) => pending.op.is_complete(),
            None => return,
        };
        if !complete {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };

        match pending.op.take().unwrap_or(Err(LoadError::Dropped)) {
            Ok(model) => {
                log::info!("loaded {} ({} triangles)", self.locator, model.triangle_count());
                self.scene.add(model.into_node(MODEL_NODE));
                self.phase = Phase::Rendered;
            }
            Err(e) => {
                log::warn!("could not load {}: {}; showing fallback", self.locator, e);
                let cube = Node::mesh("fallback", box_mesh(1.0, 1.0, 1.0), Material::Unlit(FALLBACK_COLOR));
                self.fallback = Some(self.scene.add(cube));
                self.phase = Phase::RenderedFallback;
            }
        }

        if let Some(on_settled) = self.on_settled.take() {
            on_settled(false);
        }
    }

    fn handle_resize(&mut self) {
        let rect = self.mount.get();
        self.camera.set_aspect(rect.w, rect.h);
        self.renderer.set_size(rect.w, rect.h);
        self.draw();
    }

    fn draw(&mut self) {
        let rect = self.mount.get();
        self.renderer.render(vec2(rect.x, rect.y), &self.scene, &self.camera);
    }

    /// Release everything. Safe to call repeatedly.
    pub fn teardown(&mut self, resize: &mut ResizeEvents) {
        if self.phase == Phase::TornDown {
            return;
        }
        if let Some(id) = self.listener.take() {
            resize.remove_listener(id);
        }
        self.controls.dispose();
        self.renderer.dispose();
        self.scene.dispose();
        // An unfinished load is abandoned; its result is discarded on arrival
        self.pending = None;
        self.on_settled = None;
        self.fallback = None;
        self.phase = Phase::TornDown;
        log::debug!("viewport for {} torn down", self.locator);
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Render loop active (load settled, not torn down)
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Rendered | Phase::RenderedFallback)
    }

    #[cfg(test)]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    #[cfg(test)]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[cfg(test)]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    #[cfg(test)]
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    #[cfg(test)]
    pub fn model_node(&self) -> Option<&Node> {
        self.scene.nodes().find(|(_, n)| n.name == MODEL_NODE).map(|(_, n)| n)
    }

    #[cfg(test)]
    pub fn fallback_node(&self) -> Option<&Node> {
        self.fallback.and_then(|id| self.scene.node(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::ModelData;
    use crate::scene::{MeshData, Primitive};
    use crate::testing::{RecordingDevice, RenderEvent, ScriptedSource};
    use crate::ui::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        source: ScriptedSource,
        device: RecordingDevice,
        resize: ResizeEvents,
        settings: ViewerSettings,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                source: ScriptedSource::new(),
                device: RecordingDevice::new(),
                resize: ResizeEvents::new(),
                settings: ViewerSettings::default(),
            }
        }

        fn mount(&mut self, mount: MountHandle, locator: &str, on_settled: OnSettled) -> Viewport {
            Viewport::mount(
                mount,
                locator,
                on_settled,
                MountContext {
                    source: &mut self.source,
                    device: &self.device,
                    resize: &mut self.resize,
                    settings: &self.settings,
                },
            )
        }
    }

    fn triangle_model() -> ModelData {
        ModelData {
            primitives: vec![Primitive {
                mesh: MeshData {
                    positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
                    normals: vec![Vec3::Z; 3],
                    colors: None,
                    indices: vec![0, 1, 2],
                },
                material: Material::Lit(WHITE),
            }],
        }
    }

    fn card_mount() -> MountHandle {
        MountHandle::new(Rect::new(10.0, 20.0, 300.0, 200.0))
    }

    fn settled_log() -> (Rc<RefCell<Vec<bool>>>, OnSettled) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, Box::new(move |loading| sink.borrow_mut().push(loading)))
    }

    #[test]
    fn test_mount_setup() {
        let mut h = Harness::new();
        let (_, cb) = settled_log();
        let vp = h.mount(card_mount(), "assets/models/student.glb", cb);

        assert_eq!(vp.phase(), Phase::Loading);
        assert_eq!(h.source.requested(), vec!["assets/models/student.glb".to_string()]);
        assert_eq!(vp.camera().fov, 75.0);
        assert!((vp.camera().aspect - 1.5).abs() < 0.0001);
        assert_eq!(vp.camera().position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(vp.renderer().size(), (300.0, 200.0));
        assert_eq!(vp.scene().lights().len(), 2);
        assert!(vp.scene().is_empty());
        assert_eq!(h.resize.listener_count(), 1);

        let orbit = vp.controls().settings();
        assert!(orbit.enable_damping && !orbit.enable_pan);
        assert_eq!((orbit.min_distance, orbit.max_distance), (3.0, 7.0));
    }

    #[test]
    fn test_no_render_while_loading() {
        let mut h = Harness::new();
        let (log, cb) = settled_log();
        let mut vp = h.mount(card_mount(), "a.glb", cb);
        for _ in 0..3 {
            vp.frame(&mut h.resize, None);
        }
        assert_eq!(h.device.render_count(0), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_success_attaches_model() {
        let mut h = Harness::new();
        let (log, cb) = settled_log();
        let mut vp = h.mount(card_mount(), "a.glb", cb);

        h.source.resolve("a.glb", Ok(triangle_model()));
        vp.frame(&mut h.resize, None);
        vp.frame(&mut h.resize, None);

        assert_eq!(vp.phase(), Phase::Rendered);
        assert_eq!(*log.borrow(), vec![false]);
        let model = vp.model_node().unwrap();
        assert_eq!(model.transform.position, Vec3::ZERO);
        assert_eq!(model.transform.scale, Vec3::ONE);
        // Never rotated
        assert_eq!(model.transform.rotation, Vec3::ZERO);
        assert!(vp.fallback_node().is_none());
        assert_eq!(h.device.render_count(0), 2);
    }

    #[test]
    fn test_failure_shows_spinning_fallback() {
        let mut h = Harness::new();
        let (log, cb) = settled_log();
        let mut vp = h.mount(card_mount(), "missing.glb", cb);

        h.source.resolve("missing.glb", Err(LoadError::Io("not found".into())));
        vp.frame(&mut h.resize, None);

        assert_eq!(vp.phase(), Phase::RenderedFallback);
        assert_eq!(*log.borrow(), vec![false]);
        let cube = vp.fallback_node().unwrap();
        assert_eq!(cube.primitives[0].material, Material::Unlit(FALLBACK_COLOR));
        let first = cube.transform.rotation;
        assert!((first.x - FALLBACK_SPIN).abs() < 0.00001);

        vp.frame(&mut h.resize, None);
        let second = vp.fallback_node().unwrap().transform.rotation;
        assert!((second.x - 2.0 * FALLBACK_SPIN).abs() < 0.00001);
        assert!((second.y - 2.0 * FALLBACK_SPIN).abs() < 0.00001);
        assert_eq!(second.z, 0.0);
        assert!(vp.model_node().is_none());
    }

    #[test]
    fn test_dropped_loader_falls_back() {
        let mut h = Harness::new();
        let (log, cb) = settled_log();
        let mut vp = h.mount(card_mount(), "a.glb", cb);
        h.source.abandon("a.glb");
        vp.frame(&mut h.resize, None);
        assert_eq!(vp.phase(), Phase::RenderedFallback);
        assert_eq!(*log.borrow(), vec![false]);
    }

    #[test]
    fn test_resize_updates_aspect_and_renders_once() {
        let mut h = Harness::new();
        let (_, cb) = settled_log();
        let mount = card_mount();
        let mut vp = h.mount(mount.clone(), "a.glb", cb);

        mount.set(Rect::new(10.0, 20.0, 400.0, 100.0));
        h.resize.fire();
        vp.frame(&mut h.resize, None);

        assert!((vp.camera().aspect - 4.0).abs() < 0.0001);
        assert_eq!(vp.renderer().size(), (400.0, 100.0));
        // Immediate render even though the model is still loading
        assert_eq!(h.device.render_count(0), 1);
    }

    #[test]
    fn test_teardown_removes_resize_listener() {
        let mut h = Harness::new();
        let (_, cb) = settled_log();
        let mount = card_mount();
        let mut vp = h.mount(mount.clone(), "a.glb", cb);
        h.source.resolve("a.glb", Ok(triangle_model()));
        vp.frame(&mut h.resize, None);

        vp.teardown(&mut h.resize);
        assert_eq!(h.resize.listener_count(), 0);
        assert!(vp.controls().is_disposed());
        assert!(vp.renderer().is_disposed());
        assert!(vp.scene().is_empty() && vp.scene().lights().is_empty());

        let renders = h.device.render_count(0);
        mount.set(Rect::new(0.0, 0.0, 50.0, 500.0));
        h.resize.fire();
        vp.frame(&mut h.resize, None);
        assert!((vp.camera().aspect - 1.5).abs() < 0.0001);
        assert_eq!(vp.renderer().size(), (300.0, 200.0));
        assert_eq!(h.device.render_count(0), renders);
    }

    #[test]
    fn test_teardown_twice_is_harmless() {
        let mut h = Harness::new();
        let (_, cb) = settled_log();
        let mut vp = h.mount(card_mount(), "a.glb", cb);
        vp.teardown(&mut h.resize);
        vp.teardown(&mut h.resize);
        assert_eq!(vp.phase(), Phase::TornDown);
        assert_eq!(h.device.dispose_count(0), 1);
    }

    #[test]
    fn test_load_after_teardown_is_ignored() {
        let mut h = Harness::new();
        let (log, cb) = settled_log();
        let mut vp = h.mount(card_mount(), "a.glb", cb);
        vp.teardown(&mut h.resize);

        // Late completion must not panic or reach the torn-down viewport
        h.source.resolve("a.glb", Ok(triangle_model()));
        vp.frame(&mut h.resize, None);
        assert!(log.borrow().is_empty());
        assert!(vp.scene().is_empty());
        assert_eq!(h.device.render_count(0), 0);
    }

    #[test]
    fn test_zoom_input_stays_clamped() {
        let mut h = Harness::new();
        let (_, cb) = settled_log();
        let mut vp = h.mount(card_mount(), "a.glb", cb);
        h.source.resolve("a.glb", Ok(triangle_model()));

        let zoom_in = ControlInput { zoom: 1_000.0, viewport_height: 200.0, ..Default::default() };
        vp.frame(&mut h.resize, Some(&zoom_in));
        assert!((vp.camera().distance_to_target() - 3.0).abs() < 0.001);

        let zoom_out = ControlInput { zoom: -1_000.0, viewport_height: 200.0, ..Default::default() };
        vp.frame(&mut h.resize, Some(&zoom_out));
        assert!((vp.camera().distance_to_target() - 7.0).abs() < 0.001);
    }

    #[test]
    fn test_render_origin_follows_mount() {
        let mut h = Harness::new();
        let (_, cb) = settled_log();
        let mut vp = h.mount(card_mount(), "a.glb", cb);
        h.source.resolve("a.glb", Ok(triangle_model()));
        vp.frame(&mut h.resize, None);
        let events = h.device.events(0);
        assert!(events.iter().any(|e| matches!(e, RenderEvent::Render { origin, nodes: 1 } if *origin == vec2(10.0, 20.0))));
    }
}
