// observe.rs
//
// IntersectionObserver plumbing. One observer per watch group; crossings
// are forwarded to the engine as inputs, never acted on here.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use wisp_engine::{Engine, PageInput, TargetId, WatchConfig};

use crate::error::WebError;

/// Build the observer for one group. `ids` maps observed elements to their
/// target ids by identity; entries for unknown elements are ignored.
pub fn group_observer(
    engine: Rc<RefCell<Engine>>,
    ids: js_sys::Map,
    config: &WatchConfig,
) -> Result<IntersectionObserver, WebError> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let element = entry.target();
                let Some(id) = ids.get(element.as_ref()).as_f64() else {
                    continue;
                };
                engine.borrow_mut().push(PageInput::Crossing {
                    target: TargetId(id as u32),
                    ratio: entry.intersection_ratio() as f32,
                    entered: entry.is_intersecting(),
                });
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(f64::from(config.threshold)));
    options.set_root_margin(&config.root_margin.to_string());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

    // The observer owns its callback for the page's lifetime.
    callback.forget();
    Ok(observer)
}
