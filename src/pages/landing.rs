//! Landing page
//!
//! Hero text with a staged entrance next to a slowly turning school
//! building. The building scene is owned directly by the page rather than
//! by a model viewport: it has no asset to load and sizes itself from the
//! window, not from its container.

use super::{FrameContext, MountServices, PageAction};
use crate::render::{RenderDevice, Renderer, RendererOptions};
use crate::router::Route;
use crate::scene::{
    box_mesh, cone_mesh, ControlInput, Light, Material, Node, NodeId, OrbitControls, OrbitSettings,
    PerspectiveCamera, Scene, Transform,
};
use crate::tween::{Ease, Timeline};
use crate::ui::{self, theme, ButtonStyle, Rect};
use crate::viewport::{ListenerId, ResizeEvents};
use macroquad::color::Color;
use macroquad::math::{vec2, Vec2, Vec3};

pub const TITLE: &str = "Welcome to EduTech Academy";
pub const SUBTITLE: &str = "Empowering Education Through Innovation";

const BUILDING_COLOR: Color = Color::new(0.29, 0.565, 0.886, 1.0); // #4a90e2
const ROOF_COLOR: Color = Color::new(0.545, 0.271, 0.0745, 1.0); // #8b4513
const AMBIENT_COLOR: Color = Color::new(0.251, 0.251, 0.251, 1.0); // #404040
const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Building and roof turn per frame (radians)
pub const HERO_SPIN: f32 = 0.005;

const HERO_BOX_HEIGHT: f32 = 400.0;
const GRID_SPACING: f32 = 32.0;
const BUTTON_HEIGHT: f32 = 42.0;
const BUTTON_FONT: f32 = 15.0;
const BUTTON_GAP: f32 = 16.0;

/// Rotating building rendered next to the hero text
pub struct HeroScene {
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    renderer: Box<dyn Renderer>,
    building: NodeId,
    roof: NodeId,
    listener: Option<ListenerId>,
    disposed: bool,
}

impl HeroScene {
    pub fn new(device: &dyn RenderDevice, resize: &mut ResizeEvents, window: (f32, f32)) -> Self {
        let mut scene = Scene::new();
        let building = scene.add(Node::mesh("building", box_mesh(2.0, 1.5, 1.0), Material::Lit(BUILDING_COLOR)));
        let roof = scene.add(
            Node::mesh("roof", cone_mesh(1.5, 1.0, 4), Material::Lit(ROOF_COLOR))
                .with_transform(Transform::from_position(Vec3::new(0.0, 1.25, 0.0))),
        );
        scene.add_light(Light::directional(WHITE, 1.0, Vec3::new(5.0, 5.0, 5.0)));
        scene.add_light(Light::ambient(AMBIENT_COLOR, 1.0));

        let mut camera = PerspectiveCamera::new(75.0, window.0 / window.1, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.look_at(Vec3::ZERO);

        let mut renderer = device.create_renderer(RendererOptions {
            transparent: true,
            antialias: false,
        });
        renderer.set_size(window.0 * 0.5, window.1 * 0.5);

        let controls = OrbitControls::new(&camera, OrbitSettings::damped(0.05));

        Self {
            scene,
            camera,
            controls,
            renderer,
            building,
            roof,
            listener: Some(resize.add_listener()),
            disposed: false,
        }
    }

    /// Follow the window: aspect from the window, canvas half its size
    pub fn handle_resize(&mut self, resize: &mut ResizeEvents, window: (f32, f32)) {
        if self.disposed {
            return;
        }
        if let Some(id) = self.listener {
            if resize.take(id) {
                self.camera.set_aspect(window.0, window.1);
                self.renderer.set_size(window.0 * 0.5, window.1 * 0.5);
            }
        }
    }

    /// Spin, apply controls and draw with the canvas top-left at `origin`
    pub fn frame(&mut self, origin: Vec2, input: Option<&ControlInput>) {
        if self.disposed {
            return;
        }
        for id in [self.building, self.roof] {
            if let Some(node) = self.scene.node_mut(id) {
                node.transform.rotation.y += HERO_SPIN;
            }
        }
        if let Some(input) = input {
            self.controls.handle_input(input, &self.camera);
        }
        self.controls.update(&mut self.camera);
        self.renderer.render(origin, &self.scene, &self.camera);
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        self.renderer.size()
    }

    pub fn dispose(&mut self, resize: &mut ResizeEvents) {
        if self.disposed {
            return;
        }
        if let Some(id) = self.listener.take() {
            resize.remove_listener(id);
        }
        self.controls.dispose();
        self.renderer.dispose();
        self.scene.dispose();
        self.disposed = true;
    }

    #[cfg(test)]
    pub fn is_disposed(&self) -> bool {
        self.disposed
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
    pub fn building(&self) -> Option<&Node> {
        self.scene.node(self.building)
    }

    #[cfg(test)]
    pub fn roof(&self) -> Option<&Node> {
        self.scene.node(self.roof)
    }
}

/// Where the landing page puts things
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingLayout {
    pub text: Rect,
    pub hero_box: Rect,
    /// Single column with smaller type
    pub compact: bool,
}

impl LandingLayout {
    pub fn for_window(window: (f32, f32)) -> Self {
        let screen = Rect::screen(window.0, window.1);
        let compact = window.0 < theme::BREAKPOINT_MD;
        if compact {
            let text_h = (screen.h - HERO_BOX_HEIGHT - GRID_SPACING).max(screen.h * 0.5);
            let (text, rest) = screen.split_v_px(text_h);
            let hero_box = Rect::new(rest.x, rest.y + GRID_SPACING, rest.w, HERO_BOX_HEIGHT);
            Self { text: text.pad(GRID_SPACING * 0.5), hero_box, compact }
        } else {
            let (left, right) = screen.split_h(0.5);
            let text = left.pad(GRID_SPACING * 0.5);
            let column = right.pad(GRID_SPACING * 0.5);
            let hero_box = column.centered(column.w, HERO_BOX_HEIGHT);
            Self { text, hero_box, compact }
        }
    }
}

struct Steps {
    container: usize,
    title: usize,
    subtitle: usize,
}

pub struct LandingPage {
    mounted_at: f64,
    timeline: Timeline,
    steps: Steps,
    hero: HeroScene,
}

impl LandingPage {
    pub fn mount(services: &mut MountServices<'_>) -> Self {
        let mut timeline = Timeline::new();
        let steps = Steps {
            container: timeline.then(1.0, Ease::Power3Out),
            title: timeline.then(1.0, Ease::BackOut(1.7)),
            subtitle: timeline.then_overlapping(0.8, Ease::Power3Out, 0.5),
        };
        let hero = HeroScene::new(services.device, services.resize, services.window);
        log::debug!("landing mounted");
        Self {
            mounted_at: services.now,
            timeline,
            steps,
            hero,
        }
    }

    #[cfg(test)]
    pub fn hero(&self) -> &HeroScene {
        &self.hero
    }

    #[cfg(test)]
    pub fn hero_mut(&mut self) -> &mut HeroScene {
        &mut self.hero
    }

    #[cfg(test)]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn draw(&mut self, frame: &mut FrameContext<'_>) -> PageAction {
        let t = (frame.now - self.mounted_at) as f32;
        let layout = LandingLayout::for_window(frame.window);
        let screen = Rect::screen(frame.window.0, frame.window.1);

        let fade = self.timeline.progress(self.steps.container, t);
        let title_p = self.timeline.progress(self.steps.title, t);
        let subtitle_p = self.timeline.progress(self.steps.subtitle, t);

        ui::draw_page_background(&screen, fade);

        // Building
        self.hero.handle_resize(frame.resize, frame.window);
        let (cw, ch) = self.hero.canvas_size();
        let canvas = layout.hero_box.centered(cw, ch);
        let input = ui::orbit_input(frame.ui, &canvas);
        self.hero.frame(vec2(canvas.x, canvas.y), Some(&input));

        // Text block, vertically centered in its column
        let (title_size, subtitle_size) = if layout.compact {
            (theme::FONT_SIZE_HERO_SMALL, theme::FONT_SIZE_SUBTITLE_SMALL)
        } else {
            (theme::FONT_SIZE_HERO, theme::FONT_SIZE_SUBTITLE)
        };
        let title_lines = ui::wrap_text(TITLE, title_size, layout.text.w);
        let subtitle_lines = ui::wrap_text(SUBTITLE, subtitle_size, layout.text.w);
        let title_line_h = title_size * 1.167;
        let subtitle_line_h = subtitle_size * 1.235;
        let block_h = title_lines.len() as f32 * title_line_h
            + 16.0
            + subtitle_lines.len() as f32 * subtitle_line_h
            + 32.0
            + BUTTON_HEIGHT;
        let mut y = layout.text.center_y() - block_h * 0.5;
        let cx = layout.text.center_x();

        let title_alpha = fade * title_p.clamp(0.0, 1.0);
        let title_offset = 100.0 * (1.0 - title_p);
        for line in &title_lines {
            y += title_line_h;
            ui::draw_text_centered(line, cx, y + title_offset, title_size, ui::faded(theme::TEXT_LIGHT, title_alpha));
        }
        y += 16.0;

        let subtitle_alpha = fade * subtitle_p.clamp(0.0, 1.0) * theme::SUBTITLE_ALPHA;
        let subtitle_offset = 50.0 * (1.0 - subtitle_p);
        for line in &subtitle_lines {
            y += subtitle_line_h;
            ui::draw_text_centered(
                line,
                cx,
                y + subtitle_offset,
                subtitle_size,
                ui::faded(theme::TEXT_LIGHT, subtitle_alpha),
            );
        }
        y += 32.0;

        // Buttons
        let start_w = button_width("Get Started");
        let learn_w = button_width("Learn More");
        let row_x = cx - (start_w + BUTTON_GAP + learn_w) * 0.5;
        let start_rect = Rect::new(row_x, y, start_w, BUTTON_HEIGHT);
        let learn_rect = Rect::new(row_x + start_w + BUTTON_GAP, y, learn_w, BUTTON_HEIGHT);

        let get_started = ui::button(
            frame.ui,
            start_rect,
            "Get Started",
            ButtonStyle::Contained {
                fill: ui::faded(theme::PRIMARY, fade),
                hover: ui::faded(theme::PRIMARY_DARK, fade),
            },
            BUTTON_FONT,
        );
        // Placeholder, does nothing yet
        ui::button(
            frame.ui,
            learn_rect,
            "Learn More",
            ButtonStyle::Outlined { color: ui::faded(theme::TEXT_LIGHT, fade) },
            BUTTON_FONT,
        );

        if get_started {
            PageAction::Navigate(Route::Options)
        } else {
            PageAction::None
        }
    }

    pub fn unmount(&mut self, resize: &mut ResizeEvents) {
        self.hero.dispose(resize);
    }
}

fn button_width(label: &str) -> f32 {
    label.chars().count() as f32 * BUTTON_FONT * 0.6 + 44.0
}
