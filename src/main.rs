//! Paddle Duel entry point
//!
//! Browser: binds the session to the canvas, key events, score label, restart
//! button and `setInterval`. Native: runs a headless seeded match.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use paddle_duel::renderer::{Frame, RenderError, RenderState};
    use paddle_duel::session::{ScoreDisplay, SessionError, TickSource, TimerId};
    use paddle_duel::{GameConfig, Session};

    /// Tick source backed by `setInterval`
    struct IntervalTicker {
        /// Shared tick callback, bound once after the game is created
        callback: Option<js_sys::Function>,
    }

    impl TickSource for IntervalTicker {
        fn start(&mut self, interval_ms: u32) -> Result<TimerId, SessionError> {
            let window = web_sys::window()
                .ok_or_else(|| SessionError::TimerUnavailable("no window".to_string()))?;
            let callback = self.callback.as_ref().ok_or_else(|| {
                SessionError::TimerUnavailable("tick callback not bound".to_string())
            })?;
            window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    callback,
                    interval_ms as i32,
                )
                .map(TimerId)
                .map_err(|e| SessionError::TimerUnavailable(format!("{:?}", e)))
        }

        fn stop(&mut self, id: TimerId) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(id.0);
            }
        }
    }

    /// Score label in the page
    struct DomScoreDisplay {
        element: Option<Element>,
    }

    impl ScoreDisplay for DomScoreDisplay {
        fn show(&mut self, text: &str) {
            if let Some(el) = &self.element {
                el.set_text_content(Some(text));
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        ticker: IntervalTicker,
        display: DomScoreDisplay,
        frame: Frame,
        render_state: Option<RenderState>,
    }

    impl Game {
        fn new(session: Session, score_el: Option<Element>) -> Self {
            let config = session.config();
            let frame = Frame::new(config.arena_width, config.arena_height);
            Self {
                session,
                ticker: IntervalTicker { callback: None },
                display: DomScoreDisplay { element: score_el },
                frame,
                render_state: None,
            }
        }

        fn start(&mut self) {
            let Game {
                session,
                ticker,
                display,
                ..
            } = self;
            if let Err(e) = session.start(ticker, display) {
                log::error!("Could not start session: {}", e);
            }
            self.redraw();
        }

        fn restart(&mut self) {
            let Game {
                session,
                ticker,
                display,
                ..
            } = self;
            if let Err(e) = session.restart(ticker, display) {
                log::error!("Could not restart session: {}", e);
            }
            self.redraw();
        }

        fn on_tick(&mut self) {
            self.frame.clear();
            self.session.on_tick(&mut self.frame, &mut self.display);
            self.present();
        }

        /// Draw the current state without ticking
        fn redraw(&mut self) {
            self.frame.clear();
            self.session.render(&mut self.frame);
            self.present();
        }

        fn present(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Paddle Duel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-board")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(load_config(&canvas), seed).unwrap_or_else(|e| {
            log::warn!("Invalid config, using defaults: {}", e);
            Session::new(GameConfig::default(), seed).expect("default config is valid")
        });
        let arena = (session.config().arena_width, session.config().arena_height);
        canvas.set_width(arena.0 as u32);
        canvas.set_height(arena.1 as u32);

        let score_el = document.get_element_by_id("score-info");
        if score_el.is_none() {
            log::warn!("No #score-info element, score will not be shown");
        }
        let game = Rc::new(RefCell::new(Game::new(session, score_el)));

        match init_renderer(canvas, arena).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        // Listeners are registered exactly once; restart never re-adds them
        bind_tick(&game);
        setup_keyboard(game.clone());
        setup_restart_button(game.clone());

        game.borrow_mut().start();

        log::info!("Paddle Duel running!");
    }

    /// Optional JSON overrides in the canvas `data-config` attribute
    fn load_config(canvas: &HtmlCanvasElement) -> GameConfig {
        match canvas.get_attribute("data-config") {
            Some(json) => GameConfig::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring data-config: {}", e);
                GameConfig::default()
            }),
            None => GameConfig::default(),
        }
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        arena: (f32, f32),
    ) -> Result<RenderState, RenderError> {
        let (width, height) = (canvas.width(), canvas.height());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, arena).await
    }

    fn bind_tick(game: &Rc<RefCell<Game>>) {
        let tick_game = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            tick_game.borrow_mut().on_tick();
        });
        // Lives for the rest of the page, like the other listeners
        let callback: js_sys::Function = closure.into_js_value().unchecked_into();
        game.borrow_mut().ticker.callback = Some(callback);
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let handled = game.borrow_mut().session.on_key(&event.key());
            if handled {
                // Keep arrow keys from scrolling the page
                event.prevent_default();
            }
        });
        let _ = window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #restart-btn element, restart disabled");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use paddle_duel::renderer::Frame;
    use paddle_duel::session::{ManualTicker, RecordingDisplay};
    use paddle_duel::sim::GameEvent;
    use paddle_duel::{GameConfig, Session};

    env_logger::init();
    log::info!("Paddle Duel (native) starting...");
    log::info!("Native mode runs a headless match - run with `trunk serve` to play");

    let config = GameConfig::load_or_default();
    let seed = env_or("PADDLE_DUEL_SEED", 0x5eed_u64);
    let ticks = env_or("PADDLE_DUEL_TICKS", 3000_u64);

    let mut frame = Frame::new(config.arena_width, config.arena_height);
    let mut session = match Session::new(config, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };
    let mut ticker = ManualTicker::default();
    let mut display = RecordingDisplay::default();

    if let Err(e) = session.start(&mut ticker, &mut display) {
        log::error!("{}", e);
        std::process::exit(1);
    }

    let mut paddle_hits = 0u32;
    for _ in 0..ticks {
        frame.clear();
        for event in session.on_tick(&mut frame, &mut display) {
            if let GameEvent::PaddleHit { .. } = event {
                paddle_hits += 1;
            }
        }
    }

    let simulated = session.config().tick_interval().mul_f64(ticks as f64);
    println!(
        "Final score {} after {} ticks ({:.1}s simulated, {} paddle hits)",
        session.score(),
        ticks,
        simulated.as_secs_f64(),
        paddle_hits
    );
    match serde_json::to_string_pretty(session.state()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize final state: {}", e),
    }
}

/// Parse an environment variable, falling back to `default`
#[cfg(not(target_arch = "wasm32"))]
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} '{}', using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
