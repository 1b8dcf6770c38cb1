use std::fmt;

use wasm_bindgen::JsValue;

/// Errors surfaced while mounting or driving a page.
#[derive(Debug, Clone)]
pub enum WebError {
    /// No window or document; not running in a browser.
    DomUnavailable,
    /// A selector the manifest requires matched nothing.
    ElementNotFound(String),
    /// The manifest JSON did not parse.
    Manifest(String),
    /// A DOM call failed.
    Js(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::DomUnavailable => write!(f, "window or document unavailable"),
            WebError::ElementNotFound(selector) => {
                write!(f, "no element matches {:?}", selector)
            }
            WebError::Manifest(message) => write!(f, "manifest rejected: {}", message),
            WebError::Js(message) => write!(f, "dom call failed: {}", message),
        }
    }
}

impl std::error::Error for WebError {}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(format!("{:?}", value))
    }
}
