use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    #[error("no browser window or document available")]
    NoDocument,

    #[error("missing element `{0}`")]
    MissingElement(String),

    #[error("attribute `{attribute}` has unusable value {value:?}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },

    #[error("local storage is unavailable")]
    StorageUnavailable,

    #[error("browser call failed: {0}")]
    Js(String),

    #[error("invalid effects config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("nothing to animate")]
    Empty,
}

impl FxError {
    /// Absent markup is expected on most pages and is not worth a warning.
    pub fn is_missing_markup(&self) -> bool {
        matches!(
            self,
            Self::MissingElement(_) | Self::InvalidAttribute { .. } | Self::Empty
        )
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&value)
                    .ok()
                    .and_then(|text| text.as_string())
            })
            .unwrap_or_else(|| "unknown JS exception".to_string());
        Self::Js(message)
    }
}

pub type Result<T, E = FxError> = std::result::Result<T, E>;
