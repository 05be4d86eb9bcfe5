pub mod runner;

pub use hop_engine;
pub use runner::GameRunner;

// Used by `export_game!` expansions.
pub use console_error_panic_hook;
pub use console_log;
pub use log;
pub use wasm_bindgen;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// The game type needs a `new()` constructor and must implement
/// `hop_engine::Game`. The calling crate only needs `wasm-bindgen` itself,
/// for the code the `#[wasm_bindgen]` attribute generates.
///
/// ```ignore
/// mod game;
/// use game::MyGame;
///
/// hop_web::export_game!(MyGame, "my-game");
/// ```
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        $crate::log::warn!("{}: game_init() has not been called", $game_name);
                        None
                    }
                }
            })
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn game_init() {
            $crate::console_error_panic_hook::set_once();
            let _ = $crate::console_log::init_with_level($crate::log::Level::Info);

            let runner = $crate::GameRunner::new(<$game_type>::new());
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            $crate::log::info!("{}: initialized", $game_name);
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::hop_engine::InputEvent::KeyDown { key_code }));
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::hop_engine::InputEvent::KeyUp { key_code }));
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input($crate::hop_engine::InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len()).unwrap_or(0)
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width()).unwrap_or(0.0)
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height()).unwrap_or(0.0)
        }

        // ---- Capacity accessors ----

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances()).unwrap_or(0)
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds()).unwrap_or(0)
        }

        #[$crate::wasm_bindgen::prelude::wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }
    };
}
