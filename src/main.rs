//! Brickout entry point
//!
//! Handles platform-specific initialization and drives the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent, MouseEvent};

    use brickout::Game;
    use brickout::platform::{Control, LocalStorage, MemoryStorage, Storage};
    use brickout::renderer::{CanvasRenderer, set_hidden};

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        renderer: CanvasRenderer,
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn open_storage() -> Box<dyn Storage> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{e}; high scores will not persist");
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Brickout starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let renderer = CanvasRenderer::new(&document).inspect_err(|e| {
            log::error!("Cannot start: {:?}", e);
        })?;

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, now_ms(), open_storage());
        prefill_name(&document, &game.settings().last_player_name);

        let app = Rc::new(RefCell::new(App { game, renderer }));

        setup_keyboard(&window, app.clone())?;
        setup_blur(&window, app.clone())?;
        setup_save_button(&document, app.clone())?;
        setup_restart_button(&document, app.clone())?;

        request_animation_frame(app);
        log::info!("Brickout running!");
        Ok(())
    }

    fn prefill_name(document: &Document, name: &str) {
        if let Some(input) = document
            .get_element_by_id("player-name")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(name);
        }
    }

    fn is_typing(event: &KeyboardEvent) -> bool {
        event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .is_some()
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let typing = is_typing(&event);
                let mut a = app.borrow_mut();
                if Control::routed(&key, typing).is_some() {
                    a.game.key_down(&key);
                    event.prevent_default();
                    return;
                }
                // Every key goes to the name field while typing
                if typing {
                    return;
                }
                match key.as_str() {
                    "i" | "I" => {
                        a.game.toggle_autopilot();
                    }
                    "f" | "F" => {
                        a.game.toggle_fps();
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Releases always land so a held key cannot stick
                if app.borrow_mut().game.key_up(&event.key()) && !is_typing(&event) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Key-ups are lost while the window is unfocused
    fn setup_blur(window: &web_sys::Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().game.release_all();
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_save_button(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("save-btn") else {
            log::warn!("No #save-btn, scores cannot be saved");
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let name = document
                .get_element_by_id("player-name")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();

            let mut a = app.borrow_mut();
            let App { game, renderer } = &mut *a;
            if game.save_score(&name, renderer).is_ok() {
                set_hidden(&document, "name-entry", true);
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_restart_button(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("restart-btn") else {
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let seed = js_sys::Date::now() as u64;
            let mut a = app.borrow_mut();
            a.game.restart(seed, now_ms());
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_hidden(&document, "name-entry", true);
                set_hidden(&document, "high-scores", true);
                prefill_name(&document, &a.game.settings().last_player_name);
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Host driver: one loop iteration per animation frame
    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let App { game, renderer } = &mut *a;
            game.frame(time, renderer);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use std::io::Write;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use brickout::Game;
    use brickout::platform::FileStorage;
    use brickout::renderer::TextRenderer;
    use brickout::sim::StepStatus;

    /// Longest demo run before giving up on the autopilot losing
    const MAX_RUN: Duration = Duration::from_secs(120);
    /// Print every Nth simulation tick
    const PRINT_EVERY: u64 = 6;
    /// Host callback spacing (faster than the tick rate, like a display refresh)
    const CALLBACK_SPACING: Duration = Duration::from_millis(4);
    const DEFAULT_PLAYER: &str = "AUTO";

    pub fn run() {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        let started = Instant::now();
        let elapsed_ms = || started.elapsed().as_secs_f64() * 1000.0;

        let mut game = Game::new(seed, elapsed_ms(), Box::new(FileStorage::from_env()));
        if !game.settings().autopilot {
            game.toggle_autopilot();
        }

        let mut screen = TextRenderer::new();
        let stdout = std::io::stdout();
        let mut last_printed = u64::MAX;

        loop {
            let report = game.frame(elapsed_ms(), &mut screen);

            let ticks = game.state().time_ticks;
            let over = report.status == StepStatus::GameOver;
            if (ticks % PRINT_EVERY == 0 && ticks != last_printed) || over {
                last_printed = ticks;
                let mut out = stdout.lock();
                let _ = write!(out, "\x1b[H\x1b[2J{}", screen.last_frame);
                let _ = out.flush();
            }

            if over {
                break;
            }
            if started.elapsed() > MAX_RUN {
                log::info!("Demo stopped after {ticks} ticks without losing the ball");
                return;
            }
            std::thread::sleep(CALLBACK_SPACING);
        }

        let name = match game.settings().last_player_name.as_str() {
            "" => DEFAULT_PLAYER.to_string(),
            name => name.to_string(),
        };
        if let Err(e) = game.save_score(&name, &mut screen) {
            log::error!("Could not save score: {e}");
        }
        if let Some(board) = &screen.leaderboard {
            println!("\n{board}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brickout (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` to play");

    native_demo::run();
}
