//! Role selection page
//!
//! Three cards (student, teacher, administrator), each with its own model
//! viewport, a spinner while the model loads, a short description and a
//! section button. Cards slide in one after another and grow on hover.

use super::{FrameContext, MountServices, PageAction};
use crate::tween::{Animated, Ease, Tween};
use crate::ui::{self, theme, ButtonStyle, Rect};
use crate::viewport::{LoadingFlag, MountContext, MountHandle, ResizeEvents, Viewport};
use macroquad::color::Color;
use macroquad::math::vec2;
use macroquad::shapes::draw_rectangle;

pub const TITLE: &str = "School Management Options";

const PAGE_PAD_Y: f32 = 48.0;
const CONTAINER_PAD: f32 = 16.0;
const TITLE_LINE: f32 = 40.0;
const TITLE_GAP: f32 = 32.0;
const GRID_GAP: f32 = 24.0;

const CANVAS_HEIGHT: f32 = 256.0;
const CANVAS_HEIGHT_COMPACT: f32 = 192.0;
const BODY_PAD: f32 = 24.0;
const HEADING_LINE: f32 = 32.0;
const HEADING_GAP: f32 = 12.0;
const BODY_LINE: f32 = 26.0;
const BUTTON_GAP: f32 = 16.0;
const BUTTON_HEIGHT: f32 = 48.0;

const SPINNER_RADIUS: f32 = 32.0;
const SPINNER_THICKNESS: f32 = 2.0;

const ENTRANCE_DURATION: f32 = 0.8;
const ENTRANCE_SLIDE: f32 = 20.0;
const HOVER_DURATION: f32 = 0.2;
const HOVER_SCALE: f32 = 1.05;
const SCROLL_STEP: f32 = 48.0;

/// Tailwind-style container breakpoints, widest first
const CONTAINER_WIDTHS: [f32; 5] = [1536.0, 1280.0, 1024.0, 768.0, 640.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Teacher,
    Administrator,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Administrator];

    pub fn title(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Administrator => "Administrator",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Role::Student => "Manage student records, attendance, and grades with ease.",
            Role::Teacher => "Manage courses, assignments, and student evaluations efficiently.",
            Role::Administrator => "Manage school settings, users, and system configurations effectively.",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Role::Student => "Go to Student Section",
            Role::Teacher => "Go to Teacher Section",
            Role::Administrator => "Go to Admin Section",
        }
    }

    /// File name inside the configured models directory
    pub fn model_file(self) -> &'static str {
        match self {
            Role::Student => "student.glb",
            Role::Teacher => "teacher.glb",
            Role::Administrator => "administrator.glb",
        }
    }

    /// Spinner color
    pub fn accent(self) -> Color {
        match self {
            Role::Student => theme::BLUE_500,
            Role::Teacher => theme::GREEN_500,
            Role::Administrator => theme::RED_500,
        }
    }

    /// Section button (fill, hover)
    pub fn button_colors(self) -> (Color, Color) {
        match self {
            Role::Student => (theme::BLUE_600, theme::BLUE_800),
            Role::Teacher => (theme::GREEN_600, theme::GREEN_800),
            Role::Administrator => (theme::RED_600, theme::RED_800),
        }
    }

    pub fn entrance_delay(self) -> f32 {
        match self {
            Role::Student => 0.2,
            Role::Teacher => 0.4,
            Role::Administrator => 0.6,
        }
    }
}

pub struct RoleCard {
    role: Role,
    mount: MountHandle,
    viewport: Viewport,
    loading: LoadingFlag,
    entrance: Tween,
    scale: Animated,
    /// 0 = resting shadow, 1 = hover shadow
    shadow: Animated,
    hovered: bool,
}

impl RoleCard {
    fn mount(role: Role, canvas: Rect, services: &mut MountServices<'_>) -> Self {
        let mount = MountHandle::new(canvas);
        let loading = LoadingFlag::new();
        let locator = services.config.model_path(role.model_file());
        let viewport = Viewport::mount(
            mount.clone(),
            &locator,
            loading.callback(),
            MountContext {
                source: &mut *services.source,
                device: services.device,
                resize: &mut *services.resize,
                settings: &services.config.viewer,
            },
        );

        Self {
            role,
            mount,
            viewport,
            loading,
            entrance: Tween::new(ENTRANCE_DURATION, Ease::Power1Out).delayed(role.entrance_delay()),
            scale: Animated::new(1.0, HOVER_DURATION, Ease::Power1Out),
            shadow: Animated::new(0.0, HOVER_DURATION, Ease::Power1Out),
            hovered: false,
        }
    }

    #[cfg(test)]
    pub fn role(&self) -> Role {
        self.role
    }

    #[cfg(test)]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[cfg(test)]
    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    #[cfg(test)]
    pub fn mount_rect(&self) -> Rect {
        self.mount.get()
    }

    /// Start the hover grow/shrink at page time `time`
    pub fn set_hovered(&mut self, hovered: bool, time: f32) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        let (scale, shadow) = if hovered { (HOVER_SCALE, 1.0) } else { (1.0, 0.0) };
        self.scale.retarget(time, scale);
        self.shadow.retarget(time, shadow);
    }

    pub fn scale(&self, time: f32) -> f32 {
        self.scale.value(time)
    }

    /// Entrance progress at page time `time`, 0 hidden and 1 in place
    pub fn entrance(&self, time: f32) -> f32 {
        self.entrance.progress(time)
    }

    fn shadow(&self, time: f32, alpha: f32) -> (f32, f32, f32) {
        let k = self.shadow.value(time);
        let (ro, rb, ra) = theme::SHADOW_REST;
        let (ho, hb, ha) = theme::SHADOW_HOVER;
        (ro + (ho - ro) * k, rb + (hb - rb) * k, (ra + (ha - ra) * k) * alpha)
    }
}

/// One card's regions before entrance and hover transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSlot {
    pub card: Rect,
    pub canvas: Rect,
    pub body: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionsLayout {
    pub title_top: f32,
    pub center_x: f32,
    pub cards: Vec<CardSlot>,
    /// Unscrolled height of the whole page
    pub content_height: f32,
    pub compact: bool,
}

impl OptionsLayout {
    pub fn for_window(window: (f32, f32), scroll: f32) -> Self {
        let compact = window.0 < theme::BREAKPOINT_MD;
        let container_w = container_width(window.0);
        let inner_x = (window.0 - container_w) * 0.5 + CONTAINER_PAD;
        let inner_w = (container_w - CONTAINER_PAD * 2.0).max(0.0);
        let title_top = PAGE_PAD_Y - scroll;
        let cards_top = title_top + TITLE_LINE + TITLE_GAP;
        let canvas_h = if compact { CANVAS_HEIGHT_COMPACT } else { CANVAS_HEIGHT };

        let columns = if compact { 1 } else { Role::ALL.len() };
        let col_w = Rect::new(inner_x, 0.0, inner_w, 0.0)
            .columns(columns, GRID_GAP)
            .first()
            .map_or(0.0, |c| c.w);
        let heights: Vec<f32> = Role::ALL.iter().map(|r| card_height(*r, col_w, canvas_h)).collect();
        // Grid rows stretch to their tallest card
        let row_h = heights.iter().cloned().fold(0.0, f32::max);

        let mut cards = Vec::with_capacity(Role::ALL.len());
        let mut y = cards_top;
        for (i, h) in heights.iter().enumerate() {
            let (x, top, height) = if compact {
                let top = y;
                y += h + GRID_GAP;
                (inner_x, top, *h)
            } else {
                (inner_x + i as f32 * (col_w + GRID_GAP), cards_top, row_h)
            };
            let card = Rect::new(x, top, col_w, height);
            let canvas = Rect::new(x, top, col_w, canvas_h);
            let body = Rect::new(x, top + canvas_h, col_w, height - canvas_h).pad(BODY_PAD);
            cards.push(CardSlot { card, canvas, body });
        }

        let last_bottom = cards.last().map_or(cards_top, |c| c.card.bottom());
        Self {
            title_top,
            center_x: window.0 * 0.5,
            cards,
            content_height: last_bottom + scroll + PAGE_PAD_Y,
            compact,
        }
    }
}

fn container_width(window_w: f32) -> f32 {
    CONTAINER_WIDTHS
        .iter()
        .copied()
        .find(|bp| window_w >= *bp)
        .unwrap_or(window_w)
}

fn card_height(role: Role, width: f32, canvas_h: f32) -> f32 {
    let text_w = (width - BODY_PAD * 2.0).max(0.0);
    let lines = ui::wrap_text(role.description(), theme::FONT_SIZE_BODY, text_w).len();
    canvas_h
        + BODY_PAD * 2.0
        + HEADING_LINE
        + HEADING_GAP
        + lines as f32 * BODY_LINE
        + BUTTON_GAP
        + BUTTON_HEIGHT
}

pub struct OptionsPage {
    mounted_at: f64,
    cards: Vec<RoleCard>,
    scroll: f32,
}

impl OptionsPage {
    pub fn mount(services: &mut MountServices<'_>) -> Self {
        let layout = OptionsLayout::for_window(services.window, 0.0);
        let mut cards = Vec::with_capacity(Role::ALL.len());
        for (role, slot) in Role::ALL.iter().zip(&layout.cards) {
            cards.push(RoleCard::mount(*role, slot.canvas, services));
        }
        log::info!("options page mounted with {} viewports", cards.len());
        Self {
            mounted_at: services.now,
            cards,
            scroll: 0.0,
        }
    }

    #[cfg(test)]
    pub fn cards(&self) -> &[RoleCard] {
        &self.cards
    }

    #[cfg(test)]
    pub fn cards_mut(&mut self) -> &mut [RoleCard] {
        &mut self.cards
    }

    /// Viewports not yet torn down
    #[cfg(test)]
    pub fn viewport_count(&self) -> usize {
        self.cards.iter().filter(|c| c.viewport.phase() != crate::viewport::Phase::TornDown).count()
    }

    /// Advance every viewport one frame without drawing the page
    #[cfg(test)]
    pub fn tick(&mut self, resize: &mut ResizeEvents) {
        for card in &mut self.cards {
            card.viewport.frame(resize, None);
        }
    }

    fn update_scroll(&mut self, frame: &FrameContext<'_>, layout: &OptionsLayout) {
        let max_scroll = (layout.content_height - frame.window.1).max(0.0);
        let wheel = frame.ui.mouse.scroll;
        // The wheel zooms when it's over a model
        let over_canvas = layout.cards.iter().any(|s| frame.ui.mouse.inside(&s.canvas));
        if wheel != 0.0 && !over_canvas {
            self.scroll -= wheel.signum() * SCROLL_STEP;
        }
        self.scroll = self.scroll.clamp(0.0, max_scroll);
    }

    pub fn draw(&mut self, frame: &mut FrameContext<'_>) -> PageAction {
        let t = (frame.now - self.mounted_at) as f32;
        let probe = OptionsLayout::for_window(frame.window, self.scroll);
        self.update_scroll(frame, &probe);
        let layout = OptionsLayout::for_window(frame.window, self.scroll);

        ui::draw_page_background(&Rect::screen(frame.window.0, frame.window.1), 1.0);
        ui::draw_text_centered(
            TITLE,
            layout.center_x,
            layout.title_top + theme::FONT_SIZE_PAGE_TITLE * 0.85,
            theme::FONT_SIZE_PAGE_TITLE,
            theme::TEXT_LIGHT,
        );

        for (card, slot) in self.cards.iter_mut().zip(&layout.cards) {
            let hovered = frame.ui.mouse.inside(&slot.card) && frame.ui.dragging.is_none();
            card.set_hovered(hovered, t);
            draw_card(card, slot, frame, t);
        }

        PageAction::None
    }

    pub fn unmount(&mut self, resize: &mut ResizeEvents) {
        for card in &mut self.cards {
            card.viewport.teardown(resize);
        }
    }
}

fn draw_card(card: &mut RoleCard, slot: &CardSlot, frame: &mut FrameContext<'_>, t: f32) {
    let role = card.role;
    let p = card.entrance(t);
    let alpha = p.clamp(0.0, 1.0);
    let slide = ENTRANCE_SLIDE * (1.0 - p);
    let scale = card.scale(t);

    let base = slot.card.offset_y(slide);
    let (px, py) = (base.center_x(), base.center_y());
    let card_rect = base.scaled_about(px, py, scale);
    ui::draw_shadowed_card(
        &card_rect,
        theme::CARD_RADIUS * scale,
        ui::faded(theme::CARD_BG, alpha),
        card.shadow(t, alpha),
    );

    // The model keeps its size and stays centered in the grown canvas
    let canvas = slot.canvas.offset_y(slide).scaled_about(px, py, scale);
    let mount_rect = canvas.centered(slot.canvas.w, slot.canvas.h);
    card.mount.set(mount_rect);
    let input = ui::orbit_input(frame.ui, &mount_rect);
    card.viewport.frame(frame.resize, Some(&input));

    if card.loading.is_loading() {
        draw_rectangle(canvas.x, canvas.y, canvas.w, canvas.h, ui::faded(theme::LOADING_OVERLAY, alpha));
        ui::draw_spinner(
            vec2(canvas.center_x(), canvas.center_y()),
            SPINNER_RADIUS * scale,
            SPINNER_THICKNESS,
            ui::faded(role.accent(), alpha),
            frame.now as f32,
        );
    }

    let body = slot.body.offset_y(slide).scaled_about(px, py, scale);
    let text_color = ui::faded(theme::TEXT_DARK, alpha);
    let heading_size = theme::FONT_SIZE_HEADING * scale;
    let body_size = theme::FONT_SIZE_BODY * scale;

    let mut y = body.y + HEADING_LINE * scale * 0.75;
    macroquad::text::draw_text(role.title(), body.x, y, heading_size, text_color);
    y += HEADING_LINE * scale * 0.25 + HEADING_GAP * scale;

    for line in ui::wrap_text(role.description(), theme::FONT_SIZE_BODY, slot.body.w) {
        y += BODY_LINE * scale;
        macroquad::text::draw_text(&line, body.x, y - BODY_LINE * scale * 0.3, body_size, text_color);
    }

    let button_h = BUTTON_HEIGHT * scale;
    let button_rect = Rect::new(body.x, body.bottom() - button_h, body.w, button_h);
    let (fill, hover) = role.button_colors();
    let clicked = ui::button(
        frame.ui,
        button_rect,
        role.button_label(),
        ButtonStyle::Pill {
            fill: ui::faded(fill, alpha),
            hover: ui::faded(hover, alpha),
        },
        body_size,
    );
    if clicked {
        log::info!("{} section is not available yet", role.title());
    }
}
