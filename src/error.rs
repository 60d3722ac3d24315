//! use certbundle::error::CertBundleError;

use thiserror::Error;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, CertBundleError>;

/// Represents errors that can occur in the certbundle library.
///
/// Every operation either returns a complete artifact or fails with one of
/// these variants; no operation leaves partial output behind.
#[derive(Debug, Error, Clone)]
pub enum CertBundleError {
    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// Error during data decoding.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// Error due to invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A native key could not be exported in the requested mode, or the
    /// exported parameter set is inconsistent.
    #[error("Key extraction error: {0}")]
    KeyExtractionError(String),

    /// A PKCS#12 blob was malformed or held no certificate entries.
    #[error("PKCS#12 container error: {0}")]
    ContainerLoadError(String),

    /// PEM text did not contain a usable key pair.
    #[error("PEM parse error: {0}")]
    PemParseError(String),

    /// The underlying signature computation failed.
    #[error("Signing error: {0}")]
    SigningError(String),

    /// A freshly sealed PKCS#12 container could not be reloaded with its
    /// generated passphrase.
    #[error("Re-import error: {0}")]
    ReimportError(String),
}

impl From<der::Error> for CertBundleError {
    /// Converts a `der::Error` into a `CertBundleError`.
    fn from(err: der::Error) -> Self {
        CertBundleError::DecodingError(err.to_string())
    }
}

impl From<rsa::pkcs1::Error> for CertBundleError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        CertBundleError::DecodingError(err.to_string())
    }
}

impl From<pkcs8::Error> for CertBundleError {
    fn from(err: pkcs8::Error) -> Self {
        CertBundleError::DecodingError(err.to_string())
    }
}
