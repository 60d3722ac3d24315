use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use der::{Decode, Encode};
use p12::PFX;
use rand_core::RngCore;
use rsa::RsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use x509_cert::certificate::CertificateInner;

use crate::cert::Certificate;
use crate::error::{CertBundleError, Result};
use crate::key::RsaPrivateParams;
use crate::rng::OperationRng;

/// Transient in-memory PKCS#12 key store.
///
/// Holds one certificate-chain entry (the leaf plus any accompanying
/// certificates) and at most one private-key entry, keyed by a
/// subject-derived alias. A container lives for the duration of a single
/// operation: it is populated, sealed to bytes, and discarded. Containers
/// are not safe for concurrent reuse.
#[derive(Debug)]
pub struct Pkcs12Container {
    alias: String,
    leaf: CertificateInner,
    extra_certs: Vec<CertificateInner>,
    /// PKCS#8 `PrivateKeyInfo` DER for the key entry.
    key_der: Option<Vec<u8>>,
}

impl Pkcs12Container {
    /// Creates a fresh container seeded with the certificate's chain entry,
    /// aliased by its subject name.
    pub fn from_certificate(cert: &Certificate) -> Result<Self> {
        Ok(Self {
            alias: cert.subject(),
            leaf: cert.inner.clone(),
            extra_certs: cert.chain().to_vec(),
            key_der: None,
        })
    }

    /// Parses an existing PKCS#12 blob, decrypting with the passphrase.
    ///
    /// A blob that fails to parse, fails to decrypt, or contains no
    /// certificate entries is a [`CertBundleError::ContainerLoadError`].
    pub fn from_der(blob: &[u8], passphrase: &str) -> Result<Self> {
        let pfx = PFX::parse(blob).map_err(|e| {
            CertBundleError::ContainerLoadError(format!("failed to parse PKCS#12: {e:?}"))
        })?;

        let certs = pfx.cert_x509_bags(passphrase).map_err(|e| {
            CertBundleError::ContainerLoadError(format!(
                "failed to extract certificates from PKCS#12: {e:?}"
            ))
        })?;
        if certs.is_empty() {
            return Err(CertBundleError::ContainerLoadError(
                "no certificate entries in PKCS#12".to_string(),
            ));
        }

        let keys = pfx.key_bags(passphrase).map_err(|e| {
            CertBundleError::ContainerLoadError(format!(
                "failed to extract keys from PKCS#12: {e:?}"
            ))
        })?;

        let leaf = CertificateInner::from_der(&certs[0]).map_err(|e| {
            CertBundleError::ContainerLoadError(format!("malformed certificate entry: {e}"))
        })?;
        let extra_certs: Vec<CertificateInner> = certs
            .iter()
            .skip(1)
            .filter_map(|der| CertificateInner::from_der(der).ok())
            .collect();

        let alias = leaf.tbs_certificate.subject.to_string();

        Ok(Self {
            alias,
            leaf,
            extra_certs,
            key_der: keys.into_iter().next(),
        })
    }

    /// The subject-derived alias the entries are keyed by.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Number of certificates in the chain entry.
    pub fn cert_count(&self) -> usize {
        1 + self.extra_certs.len()
    }

    /// Whether the container holds a private-key entry.
    pub fn has_key(&self) -> bool {
        self.key_der.is_some()
    }

    /// The private-key entry as PKCS#8 DER, when present.
    pub fn key_der(&self) -> Option<&[u8]> {
        self.key_der.as_deref()
    }

    /// Inserts the private-key entry, associated with the chain entry under
    /// the container alias. Rejects parameter sets that do not reconstruct
    /// into a valid key.
    pub fn attach_key(&mut self, params: &RsaPrivateParams) -> Result<()> {
        let key = params.to_private_key()?;
        let document = key
            .to_pkcs8_der()
            .map_err(|e| CertBundleError::EncodingError(e.to_string()))?;
        self.key_der = Some(document.as_bytes().to_vec());
        Ok(())
    }

    /// Serializes the container to bytes encrypted under the passphrase.
    ///
    /// The container must hold a private-key entry; sealing embeds the leaf
    /// certificate and, when present, the first accompanying certificate.
    pub fn seal(&self, passphrase: &str) -> Result<Vec<u8>> {
        let key_der = self.key_der.as_deref().ok_or_else(|| {
            CertBundleError::EncodingError(
                "container has no private-key entry to seal".to_string(),
            )
        })?;

        let cert_der = self
            .leaf
            .to_der()
            .map_err(|e| CertBundleError::EncodingError(e.to_string()))?;
        let ca_der = match self.extra_certs.first() {
            Some(ca) => Some(
                ca.to_der()
                    .map_err(|e| CertBundleError::EncodingError(e.to_string()))?,
            ),
            None => None,
        };

        let pfx = PFX::new(&cert_der, key_der, ca_der.as_deref(), passphrase, &self.alias)
            .ok_or_else(|| {
                CertBundleError::ContainerLoadError(
                    "failed to assemble PKCS#12 container".to_string(),
                )
            })?;
        Ok(pfx.to_der())
    }

    /// Reconstructs a single certificate object from the container's chain
    /// entry and private-key entry.
    pub fn into_certificate(self) -> Result<Certificate> {
        let key = match self.key_der.as_deref() {
            Some(der) => Some(RsaPrivateKey::from_pkcs8_der(der).map_err(|e| {
                CertBundleError::KeyExtractionError(format!(
                    "private key entry is not RSA: {e}"
                ))
            })?),
            None => None,
        };
        Ok(Certificate::from_parts(self.leaf, self.extra_certs, key))
    }
}

/// Generates the passphrase a combined container is encrypted under.
///
/// A 128-bit random token, base64-encoded. Unpredictability is the only
/// requirement; the token never leaves the operation that generated it.
pub fn generate_passphrase(rng: &mut OperationRng) -> String {
    let mut token = [0u8; 16];
    rng.fill_bytes(&mut token);
    URL_SAFE_NO_PAD.encode(token)
}
