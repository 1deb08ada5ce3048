//! Mount-time error taxonomy.

use thiserror::Error;

/// A hook could not be attached to its host element.
///
/// Missing child nodes are a programming error in the server-rendered
/// markup, so mounting fails fast instead of degrading silently.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("missing required child element: {0}")]
    MissingChild(&'static str),
    #[error("child element {selector} is not a {expected}")]
    WrongElementType {
        selector: &'static str,
        expected: &'static str,
    },
    #[error("browser API failure: {0}")]
    Dom(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for HookError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        HookError::Dom(format!("{value:?}"))
    }
}
