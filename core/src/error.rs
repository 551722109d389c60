//! Error types for the admin client.
//!
//! # Design
//! `ApiError` keeps the variants apart for logging, but callers treat every
//! variant the same way: the page controllers replace it with a fixed
//! user-facing message. `ValidationError` is raised before any request is
//! built, and its `Display` text is exactly what the page shows.

use thiserror::Error;

/// Failure of a single call against the remote service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// A form draft that cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, complete todos los campos.")]
    MissingFields,

    #[error("El ID del usuario debe ser un número válido.")]
    InvalidUserId,

    #[error("Por favor, completa el reCAPTCHA.")]
    MissingVerification,
}
