use thiserror::Error;

/// Top-level error type for the `skillbridge-api` crate.
///
/// Only decoding can fail here; the crate performs no transport.
/// `skillbridge-core` maps these into domain-level variants.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON did not match the expected wire shape, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The raw JSON body that failed to decode.
    pub fn body(&self) -> &str {
        match self {
            Self::Deserialization { body, .. } => body,
        }
    }
}
