//! Sign-up and login placeholders

use super::{FrameContext, PageAction};
use crate::router::Route;
use crate::ui::{self, theme, ButtonStyle, Rect};

const CARD_WIDTH: f32 = 400.0;
const CARD_HEIGHT: f32 = 280.0;
const CARD_PAD: f32 = 32.0;
const BUTTON_HEIGHT: f32 = 42.0;

pub const UNAVAILABLE_NOTE: &str = "Accounts are not available yet. Check back soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    SignUp,
    Login,
}

impl AuthKind {
    pub fn heading(self) -> &'static str {
        match self {
            AuthKind::SignUp => "Sign Up",
            AuthKind::Login => "Login",
        }
    }

    /// The other auth page and the label linking to it
    pub fn alternate(self) -> (Route, &'static str) {
        match self {
            AuthKind::SignUp => (Route::Login, "Already have an account? Log in"),
            AuthKind::Login => (Route::SignUp, "Need an account? Sign up"),
        }
    }
}

/// Buttons of an auth card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthLayout {
    pub card: Rect,
    pub home: Rect,
    pub alternate: Rect,
}

impl AuthLayout {
    pub fn for_window(window: (f32, f32)) -> Self {
        let w = CARD_WIDTH.min(window.0 - CARD_PAD);
        let card = Rect::screen(window.0, window.1).centered(w.max(0.0), CARD_HEIGHT);
        let inner = card.pad(CARD_PAD);
        let alternate = Rect::new(inner.x, inner.bottom() - BUTTON_HEIGHT, inner.w, BUTTON_HEIGHT);
        let home = alternate.offset_y(-(BUTTON_HEIGHT + 12.0));
        Self { card, home, alternate }
    }
}

pub struct AuthPage {
    kind: AuthKind,
}

impl AuthPage {
    pub fn new(kind: AuthKind) -> Self {
        Self { kind }
    }

    #[cfg(test)]
    pub fn kind(&self) -> AuthKind {
        self.kind
    }

    pub fn draw(&mut self, frame: &mut FrameContext<'_>) -> PageAction {
        let layout = AuthLayout::for_window(frame.window);
        ui::draw_page_background(&Rect::screen(frame.window.0, frame.window.1), 1.0);
        ui::draw_shadowed_card(&layout.card, theme::CARD_RADIUS, theme::CARD_BG, theme::SHADOW_REST);

        let inner = layout.card.pad(CARD_PAD);
        ui::draw_text_centered(
            self.kind.heading(),
            inner.center_x(),
            inner.y + theme::FONT_SIZE_PAGE_TITLE * 0.85,
            theme::FONT_SIZE_PAGE_TITLE,
            theme::TEXT_DARK,
        );
        let mut y = inner.y + theme::FONT_SIZE_PAGE_TITLE + 24.0;
        for line in ui::wrap_text(UNAVAILABLE_NOTE, theme::FONT_SIZE_BODY, inner.w) {
            ui::draw_text_centered(&line, inner.center_x(), y, theme::FONT_SIZE_BODY, theme::TEXT_DARK);
            y += 24.0;
        }

        let home = ui::button(
            frame.ui,
            layout.home,
            "Back to Home",
            ButtonStyle::Contained {
                fill: theme::PRIMARY,
                hover: theme::PRIMARY_DARK,
            },
            theme::FONT_SIZE_BODY,
        );
        let (alt_route, alt_label) = self.kind.alternate();
        let alternate = ui::button(
            frame.ui,
            layout.alternate,
            alt_label,
            ButtonStyle::Outlined { color: theme::PRIMARY },
            theme::FONT_SIZE_BODY,
        );

        if home {
            PageAction::Navigate(Route::Landing)
        } else if alternate {
            PageAction::Navigate(alt_route)
        } else {
            PageAction::None
        }
    }
}
