// dom.rs
//
// Thin wrapper over window/document, plus the single function that turns
// an engine op into DOM writes.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use wisp_engine::StyleOp;

use crate::error::WebError;

#[derive(Clone)]
pub struct DomHost {
    window: Window,
    document: Document,
}

impl DomHost {
    pub fn new() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::DomUnavailable)?;
        let document = window.document().ok_or(WebError::DomUnavailable)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// First match for a selector, or an error naming it.
    pub fn query(&self, selector: &str) -> Result<Element, WebError> {
        self.try_query(selector)?
            .ok_or_else(|| WebError::ElementNotFound(selector.to_string()))
    }

    /// First match for a selector; `None` when nothing matches.
    pub fn try_query(&self, selector: &str) -> Result<Option<Element>, WebError> {
        Ok(self.document.query_selector(selector)?)
    }

    /// Every match for a selector, in document order.
    pub fn query_all(&self, selector: &str) -> Result<Vec<Element>, WebError> {
        let list = self.document.query_selector_all(selector)?;
        let mut elements = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(node) = list.item(i) {
                if let Ok(element) = node.dyn_into::<Element>() {
                    elements.push(element);
                }
            }
        }
        Ok(elements)
    }

    pub fn body(&self) -> Result<Element, WebError> {
        self.document
            .body()
            .map(Element::from)
            .ok_or(WebError::DomUnavailable)
    }

    pub fn create_element(&self, tag: &str) -> Result<Element, WebError> {
        Ok(self.document.create_element(tag)?)
    }

    /// The user's reduced-motion preference. Read once at startup.
    pub fn reduced_motion(&self) -> bool {
        match self.window.match_media("(prefers-reduced-motion: reduce)") {
            Ok(Some(query)) => query.matches(),
            _ => false,
        }
    }

    pub fn scroll_offset(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    /// Scrollable height: full document height minus the viewport.
    pub fn scroll_max(&self) -> f64 {
        let Some(root) = self.document.document_element() else {
            return 0.0;
        };
        let full = f64::from(root.scroll_height());
        let viewport = f64::from(root.client_height());
        (full - viewport).max(0.0)
    }

    /// True once the window load event has already fired.
    pub fn load_complete(&self) -> bool {
        self.document.ready_state() == "complete"
    }

    /// Append a `<style>` with the given CSS to the document head.
    pub fn inject_style(&self, css: &str) -> Result<(), WebError> {
        let style = self.document.create_element("style")?;
        style.set_text_content(Some(css));
        let head = self.document.head().ok_or(WebError::DomUnavailable)?;
        head.append_child(&style)?;
        Ok(())
    }
}

/// Apply one engine op to its element. `Release` and `Remove` are lifecycle
/// ops the runner resolves itself; they are no-ops here.
pub fn apply_style(element: &Element, op: &StyleOp) {
    match op {
        StyleOp::Class { name, on, .. } => {
            let list = element.class_list();
            let result = if *on { list.add_1(name) } else { list.remove_1(name) };
            if let Err(err) = result {
                log::warn!("class {:?} toggle failed: {:?}", name, err);
            }
        }
        StyleOp::Text { value, .. } => element.set_text_content(Some(value)),
        StyleOp::Opacity { value, .. } => set_style(element, "opacity", &value.to_string()),
        StyleOp::Transform { value, .. } => set_style(element, "transform", &value.to_string()),
        StyleOp::Width { value, .. } => set_style(element, "width", &value.to_string()),
        StyleOp::Transition { spec, .. } => match spec {
            Some(spec) => set_style(element, "transition", &spec.to_string()),
            None => set_style(element, "transition", "none"),
        },
        StyleOp::Animation { spec, .. } => match spec {
            Some(spec) => set_style(element, "animation", &spec.to_string()),
            None => set_style(element, "animation", "none"),
        },
        StyleOp::Position { at, .. } => {
            set_style(element, "left", &format!("{}px", at.x));
            set_style(element, "top", &format!("{}px", at.y));
        }
        StyleOp::Release { .. } | StyleOp::Remove { .. } => {}
    }
}

fn set_style(element: &Element, property: &str, value: &str) {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    if let Err(err) = html.style().set_property(property, value) {
        log::warn!("style {} write failed: {:?}", property, err);
    }
}
