use thiserror::Error;

#[derive(Debug, Error)]
pub enum EffectsError {
    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("{0} is not available")]
    CapabilityUnavailable(&'static str),

    #[error("script error: {0}")]
    Js(String),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart container #{0} not found")]
    MissingContainer(String),

    #[error("chart #{id} failed to initialize: {message}")]
    Init { id: String, message: String },

    #[error("chart #{id} rejected its option: {message}")]
    SetOption { id: String, message: String },

    #[error("chart #{id} failed to resize: {message}")]
    Resize { id: String, message: String },
}
