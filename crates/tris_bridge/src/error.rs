//! # Bridge Error Types
//!
//! All errors that can leave the coordination layer.

use thiserror::Error;

/// Errors that can occur in the bridge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The native engine could not be constructed. Fatal, never retried.
    #[error("engine creation failed: {0}")]
    EngineCreation(String),

    /// A surface notification carried an empty size.
    #[error("invalid viewport geometry: {width}x{height}")]
    InvalidGeometry {
        /// Reported width.
        width: u32,
        /// Reported height.
        height: u32,
    },

    /// The score store could not be read or written.
    #[error("score store error: {0}")]
    Store(String),

    /// The presentation layer rejected an update.
    #[error("presenter error: {0}")]
    Presenter(String),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The render thread could not be spawned or panicked.
    #[error("render thread error: {0}")]
    RenderThread(String),
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
