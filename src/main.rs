//! EduTech Academy: landing and role-selection front-end
//!
//! A macroquad shell around four routed pages:
//! - `/` landing hero with a rotating school building
//! - `/option` student/teacher/administrator cards, each with a 3D model
//! - `/sign` and `/login` account placeholders

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod asset;
mod backend;
mod config;
mod pages;
mod render;
mod router;
mod scene;
mod tween;
mod ui;
mod viewport;

#[cfg(test)]
mod testing;

use app::AppState;
use asset::ModelSource;
use config::AppConfig;
use macroquad::prelude::*;
use render::MacroquadDevice;
use router::Route;
use ui::{MouseState, UiContext};

fn window_conf() -> Conf {
    Conf {
        window_title: "EduTech Academy".to_owned(),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        sample_count: 4,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("EduTech Academy v{}", VERSION);

    let config = AppConfig::load().await;
    let backend = backend::init_from_config(config.backend.as_ref());

    // Native reads models on a worker thread; the browser fetches them from
    // the main loop through the pump
    #[cfg(not(target_arch = "wasm32"))]
    let source: Box<dyn ModelSource> = Box::new(asset::ThreadedSource::new());
    #[cfg(target_arch = "wasm32")]
    let (source, pump): (Box<dyn ModelSource>, asset::FetchPump) = {
        let queued = asset::QueuedSource::new();
        let pump = queued.pump();
        (Box::new(queued), pump)
    };

    let mut window = (screen_width(), screen_height());
    let mut app = AppState::new(
        config,
        backend,
        source,
        Box::new(MacroquadDevice),
        window,
        get_time(),
    );
    let mut ui_ctx = UiContext::new();

    loop {
        #[cfg(target_arch = "wasm32")]
        pump.pump().await;

        let now = get_time();

        let size = (screen_width(), screen_height());
        if size != window {
            window = size;
            app.window_resized(size.0, size.1);
        }

        let (mx, my) = mouse_position();
        ui_ctx.begin_frame(MouseState {
            x: mx,
            y: my,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            scroll: mouse_wheel().1,
        });

        if is_key_pressed(KeyCode::Escape) {
            app.navigate(Route::Landing.path(), now);
        }
        if is_key_pressed(KeyCode::Backspace) {
            app.back(now);
        }

        clear_background(WHITE);
        app.draw(&mut ui_ctx, now);

        next_frame().await;
    }
}
