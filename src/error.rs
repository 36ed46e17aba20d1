use thiserror::Error;

/// Problems with motion or relay configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown ease `{0}`")]
    UnknownEase(String),
    #[error("unknown animation preset `{0}`")]
    UnknownPreset(String),
    #[error("invalid trigger position `{0}`")]
    InvalidTriggerPosition(String),
    #[error("invalid toggle actions `{0}`: expected four of play/pause/resume/reverse/restart/reset/complete/none")]
    InvalidToggleActions(String),
    #[error("path `{0}` does not share the command layout of the first keyframe")]
    PathMismatch(String),
}

/// Failures while building the page in the browser.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global `window`")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("element `{0}` not found")]
    MissingElement(String),
    #[error("WebGL2 not supported")]
    NoWebGl2,
    #[error("shader: {0}")]
    Shader(String),
    #[error("dom: {0}")]
    Dom(String),
}
