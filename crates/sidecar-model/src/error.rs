//! Error types for the contract model

/// Errors converting between JSON and the typed tree
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Document does not have the container shape of the contract
    #[error("payload does not match contract shape: {0}")]
    Shape(#[source] serde_json::Error),

    /// Status literal outside the contract enumeration
    #[error("unknown item status: '{0}'")]
    UnknownStatus(String),

    /// No template registered under this id
    #[error("unknown template: '{0}'")]
    UnknownTemplate(String),
}
