//! Error type shared by the host-side core and the WebGL layer.

use thiserror::Error;

/// Everything that can stop the demo from starting or a frame from drawing.
#[derive(Debug, Error)]
pub enum DemoError {
    /// A required DOM node (window, document, canvas, ...) is absent.
    #[error("missing DOM element: {0}")]
    MissingElement(&'static str),

    #[error("WebGL2 context unavailable")]
    ContextUnavailable,

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("shader program failed to link: {0}")]
    ProgramLink(String),

    /// The shader sources disagree with the geometry attributes or the
    /// uniform set.
    #[error("shader contract violated: {0}")]
    ContractViolation(String),

    /// The linked program dropped an attribute the geometry supplies.
    #[error("attribute `{0}` is not active in the linked program")]
    InactiveAttribute(&'static str),

    #[error("failed to allocate {0}")]
    ResourceAllocation(&'static str),

    /// An exception thrown by a browser API.
    #[error("browser error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, DemoError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DemoError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        DemoError::Js(msg)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<DemoError> for wasm_bindgen::JsValue {
    fn from(err: DemoError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
