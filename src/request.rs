use bon::Builder;
use der::Encode;
use der::asn1::BitString;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use sha1::Sha1;
use sha2::Sha256;
use x509_cert::request::{CertReq, CertReqInfo, Version};
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

use crate::cert::{Certificate, name};
use crate::error::{CertBundleError, Result};
use crate::key::{ExportMode, NativeKey, RsaPrivateParams};
use crate::pkcs12::Pkcs12Container;
use crate::rng::OperationRng;

/// Signature algorithms a request can be signed with.
///
/// SHA-1 is cryptographically weak and retained only as a compatibility
/// policy for callers that request hash sizes below 256 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// SHA-1 with RSA encryption.
    Sha1WithRsa,
    /// SHA-256 with RSA encryption.
    Sha256WithRsa,
}

impl SignatureAlgorithm {
    /// Selects the algorithm for a requested hash strength: sizes strictly
    /// below 256 bits select SHA-1, everything else SHA-256.
    pub fn for_hash_size(hash_size_bits: u32) -> Self {
        if hash_size_bits < 256 {
            SignatureAlgorithm::Sha1WithRsa
        } else {
            SignatureAlgorithm::Sha256WithRsa
        }
    }
}

impl From<SignatureAlgorithm> for AlgorithmIdentifierOwned {
    /// Converts a `SignatureAlgorithm` into an `AlgorithmIdentifierOwned`.
    fn from(value: SignatureAlgorithm) -> Self {
        match value {
            SignatureAlgorithm::Sha1WithRsa => AlgorithmIdentifierOwned {
                oid: const_oid::db::rfc5912::SHA_1_WITH_RSA_ENCRYPTION,
                parameters: None,
            },
            SignatureAlgorithm::Sha256WithRsa => AlgorithmIdentifierOwned {
                oid: const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION,
                parameters: None,
            },
        }
    }
}

/// Where the request's signing key comes from.
///
/// Resolved exactly once at the start of request building; each variant is
/// independently reachable.
#[derive(Debug, Clone, Copy, Default)]
pub enum SigningKeySource<'a> {
    /// ASCII PEM text containing an RSA key pair.
    PemKeyPair(&'a [u8]),
    /// The private key embedded in the subject certificate itself.
    #[default]
    EmbeddedKey,
    /// A PKCS#12 key container sealed under an empty passphrase.
    KeyContainer(&'a [u8]),
}

impl<'a> SigningKeySource<'a> {
    /// Maps the caller-facing flag pair onto a source variant: PEM when
    /// `is_pem_key` is set, otherwise the container path when key bytes
    /// were actually supplied and the embedded key when they were not.
    pub fn select(key_bytes: &'a [u8], is_pem_key: bool) -> Self {
        if is_pem_key {
            SigningKeySource::PemKeyPair(key_bytes)
        } else if key_bytes.is_empty() {
            SigningKeySource::EmbeddedKey
        } else {
            SigningKeySource::KeyContainer(key_bytes)
        }
    }

    /// Resolves the source to a full private parameter set.
    fn resolve(&self, certificate: &Certificate) -> Result<RsaPrivateParams> {
        match self {
            SigningKeySource::PemKeyPair(bytes) => NativeKey::from_pem_key_pair(bytes)?
                .export(ExportMode::Private)?
                .into_private(),
            SigningKeySource::EmbeddedKey => certificate
                .export_key(ExportMode::Private)?
                .into_private(),
            SigningKeySource::KeyContainer(bytes) => {
                let container = Pkcs12Container::from_der(bytes, "")?;
                let key_der = container.key_der().ok_or_else(|| {
                    CertBundleError::KeyExtractionError(
                        "key container has no private-key entry".to_string(),
                    )
                })?;
                NativeKey::from_pkcs8_der(key_der)?
                    .export(ExportMode::Private)?
                    .into_private()
            }
        }
    }
}

/// Parameters for building a certification request.
///
/// The subject name and public key come from `certificate`; the signature
/// is produced by the resolved signing key.
#[derive(Builder)]
pub struct CsrParams<'a> {
    pub certificate: &'a Certificate,
    #[builder(default)]
    pub signing_key: SigningKeySource<'a>,
    #[builder(default = 256)]
    pub hash_size_bits: u32,
}

/// Builds and signs a PKCS#10 certification request, returning its DER
/// encoding.
///
/// The subject name is taken from the certificate's subject distinguished
/// name with the `S=` attribute key rewritten to `ST=`; the public key is
/// re-derived from the certificate's public-only parameter export; the
/// signature algorithm follows [`SignatureAlgorithm::for_hash_size`].
///
/// # Errors
/// * [`CertBundleError::PemParseError`]: the PEM source did not contain a
///   usable key pair.
/// * [`CertBundleError::KeyExtractionError`]: no private key was available
///   on the resolved source path.
/// * [`CertBundleError::SigningError`]: the signature computation failed.
pub fn create_request(params: &CsrParams<'_>) -> Result<Vec<u8>> {
    let mut rng = OperationRng::new();

    let signer = params.signing_key.resolve(params.certificate)?;

    let subject_public = params
        .certificate
        .export_key(ExportMode::Public)?
        .public_params()
        .to_public_key()?;
    let public_key = SubjectPublicKeyInfoOwned::from_key(subject_public)
        .map_err(|e| CertBundleError::EncodingError(e.to_string()))?;

    let subject = name::parse_subject(&params.certificate.subject())?;
    let algorithm = SignatureAlgorithm::for_hash_size(params.hash_size_bits);

    let info = CertReqInfo {
        version: Version::V1,
        subject,
        public_key,
        attributes: Default::default(),
    };
    let info_der = info
        .to_der()
        .map_err(|e| CertBundleError::EncodingError(e.to_string()))?;

    let signing_key = signer.to_private_key()?;
    let signature = match algorithm {
        SignatureAlgorithm::Sha1WithRsa => SigningKey::<Sha1>::new(signing_key)
            .try_sign_with_rng(&mut rng, &info_der)
            .map_err(|e| CertBundleError::SigningError(e.to_string()))?
            .to_vec(),
        SignatureAlgorithm::Sha256WithRsa => SigningKey::<Sha256>::new(signing_key)
            .try_sign_with_rng(&mut rng, &info_der)
            .map_err(|e| CertBundleError::SigningError(e.to_string()))?
            .to_vec(),
    };

    let request = CertReq {
        info,
        algorithm: algorithm.into(),
        signature: BitString::from_bytes(&signature)?,
    };
    request
        .to_der()
        .map_err(|e| CertBundleError::EncodingError(e.to_string()))
}

/// Flag-based entry point matching the host-facing operation signature:
/// `is_pem_key` selects PEM parsing, otherwise non-empty `signing_key_bytes`
/// are treated as a key container and empty bytes fall back to the
/// certificate's embedded key.
pub fn create_request_with_key_bytes(
    certificate: &Certificate,
    signing_key_bytes: &[u8],
    is_pem_key: bool,
    hash_size_bits: u32,
) -> Result<Vec<u8>> {
    let params = CsrParams::builder()
        .certificate(certificate)
        .signing_key(SigningKeySource::select(signing_key_bytes, is_pem_key))
        .hash_size_bits(hash_size_bits)
        .build();
    create_request(&params)
}
