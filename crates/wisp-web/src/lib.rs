pub mod dom;
pub mod error;
pub mod listen;
pub mod observe;
pub mod runner;
pub mod widgets;

pub use dom::DomHost;
pub use error::WebError;
pub use runner::{Bindings, PageRunner};
pub use widgets::CoresWidget;

/// Generate all `#[wasm_bindgen]` exports for a page.
///
/// This macro eliminates the per-page boilerplate by generating:
/// - `thread_local!` storage for the PageRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (page_init, page_start, page_tick, accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use wisp_engine::*;
/// use wisp_web::PageRunner;
///
/// mod page;
/// use page::MyPage;
///
/// wisp_web::export_page!(MyPage, "my-page");
/// ```
///
/// # Arguments
///
/// - `$page_type`: The page struct type that implements `wisp_engine::Page`
/// - `$page_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_page {
    ($page_type:ty, $page_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::PageRunner<$page_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::PageRunner<$page_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Page not initialized. Call page_init() first.");
                f(runner)
            })
        }

        fn store_runner() -> bool {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let page = <$page_type>::new();
            match $crate::PageRunner::new(page) {
                Ok(runner) => {
                    RUNNER.with(|cell| {
                        *cell.borrow_mut() = Some(runner);
                    });
                    true
                }
                Err(err) => {
                    log::error!("{}: no dom host: {}", $page_name, err);
                    false
                }
            }
        }

        /// Mount the page's built-in manifest and start the frame loop.
        #[wasm_bindgen]
        pub fn page_init() {
            if !store_runner() {
                return;
            }
            match with_runner(|r| r.init()) {
                Ok(()) => log::info!("{}: initialized", $page_name),
                Err(err) => {
                    log::error!("{}: mount failed: {}", $page_name, err);
                    return;
                }
            }
            page_start();
        }

        /// Mount a JSON manifest instead of the page's built-in one.
        #[wasm_bindgen]
        pub fn page_init_with_manifest(json: &str) {
            if !store_runner() {
                return;
            }
            match with_runner(|r| r.init_with_manifest(json)) {
                Ok(()) => log::info!("{}: initialized", $page_name),
                Err(err) => {
                    log::error!("{}: mount failed: {}", $page_name, err);
                    return;
                }
            }
            page_start();
        }

        /// Advance one frame by hand. The frame loop normally does this.
        #[wasm_bindgen]
        pub fn page_tick(dt_ms: f64) {
            with_runner(|r| r.tick(dt_ms));
        }

        /// Start the requestAnimationFrame loop. `page_init` already calls
        /// this; it exists for hosts that mount without initializing.
        #[wasm_bindgen]
        pub fn page_start() {
            let started = $crate::runner::spawn_frame_loop(|dt_ms| {
                with_runner(|r| r.tick(dt_ms));
            });
            if let Err(err) = started {
                log::error!("{}: frame loop failed: {}", $page_name, err);
            }
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_target_count() -> u32 {
            with_runner(|r| r.target_count())
        }

        #[wasm_bindgen]
        pub fn get_reduced_motion() -> bool {
            with_runner(|r| r.reduced_motion())
        }
    };
}
