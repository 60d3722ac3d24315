pub mod name;

use der::{Decode, Encode};
use rsa::RsaPrivateKey;
use x509_cert::certificate::CertificateInner;

use crate::error::{CertBundleError, Result};
use crate::key::{ExportMode, ExportedKey, NativeKey};
use crate::pem_utils;
use crate::pkcs12::Pkcs12Container;

/// An X.509 certificate, optionally carrying the accompanying chain and an
/// associated RSA private key.
///
/// The certificate itself is caller-supplied and never mutated; operations
/// only read the subject and key material and produce derived artifacts.
#[derive(Clone)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: CertificateInner,
    chain: Vec<CertificateInner>,
    key: Option<RsaPrivateKey>,
}

impl core::fmt::Debug for Certificate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Private-key material is intentionally skipped
        f.debug_struct("Certificate")
            .field("inner", &self.inner)
            .field("chain", &self.chain)
            .field("has_private_key", &self.key.is_some())
            .finish()
    }
}

impl Certificate {
    pub(crate) fn from_parts(
        inner: CertificateInner,
        chain: Vec<CertificateInner>,
        key: Option<RsaPrivateKey>,
    ) -> Self {
        Self { inner, chain, key }
    }

    /// Decodes a certificate from DER bytes.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = CertificateInner::from_der(der)?;
        Ok(Self::from_parts(inner, Vec::new(), None))
    }

    /// Decodes a certificate from PEM text.
    pub fn from_pem(pem_str: &str) -> Result<Self> {
        let der = pem_utils::pem_to_der(pem_str)?;
        Self::from_der(&der)
    }

    /// Loads a certificate (and its private key, when present) from a
    /// PKCS#12 blob.
    pub fn from_pkcs12(blob: &[u8], passphrase: &str) -> Result<Self> {
        Pkcs12Container::from_der(blob, passphrase)?.into_certificate()
    }

    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| CertBundleError::EncodingError(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> Result<String> {
        Ok(pem_utils::der_to_pem(&self.to_der()?, "CERTIFICATE"))
    }

    /// Attaches a private key, for callers that hold the key material
    /// separately from the certificate.
    pub fn with_private_key(mut self, key: RsaPrivateKey) -> Self {
        self.key = Some(key);
        self
    }

    /// The subject distinguished name as an RFC 4514 string.
    pub fn subject(&self) -> String {
        self.inner.tbs_certificate.subject.to_string()
    }

    /// Certificates accompanying the leaf, in the order they were imported.
    pub fn chain(&self) -> &[CertificateInner] {
        &self.chain
    }

    pub fn has_private_key(&self) -> bool {
        self.key.is_some()
    }

    pub fn private_key(&self) -> Option<&RsaPrivateKey> {
        self.key.as_ref()
    }

    /// Exports the certificate's RSA parameters in the requested mode.
    ///
    /// Public export reads the SubjectPublicKeyInfo; private export
    /// requires an associated private key and fails with
    /// [`CertBundleError::KeyExtractionError`] otherwise.
    pub fn export_key(&self, mode: ExportMode) -> Result<ExportedKey> {
        match mode {
            ExportMode::Public => {
                NativeKey::from_spki(&self.inner.tbs_certificate.subject_public_key_info)?
                    .export(ExportMode::Public)
            }
            ExportMode::Private => match &self.key {
                Some(key) => {
                    NativeKey::Private(Box::new(key.clone())).export(ExportMode::Private)
                }
                None => Err(CertBundleError::KeyExtractionError(
                    "certificate has no associated private key".to_string(),
                )),
            },
        }
    }
}
