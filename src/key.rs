use der::Encode;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};

use crate::error::{CertBundleError, Result};
use crate::pem_utils;

/// Which parameter set a native key is asked to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportMode {
    /// Modulus and public exponent only.
    Public,
    /// Full private parameter set including the CRT co-factors.
    Private,
}

/// Public half of an RSA parameter set.
///
/// Components are arbitrary-precision unsigned integers. Byte-level
/// constructors interpret their input as big-endian magnitudes, so the
/// resulting values are non-negative regardless of the high bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPublicParams {
    pub modulus: BigUint,
    pub exponent: BigUint,
}

impl RsaPublicParams {
    /// Builds public parameters from big-endian magnitude bytes.
    pub fn from_be_bytes(modulus: &[u8], exponent: &[u8]) -> Self {
        Self {
            modulus: BigUint::from_bytes_be(modulus),
            exponent: BigUint::from_bytes_be(exponent),
        }
    }

    /// Reconstructs an `rsa` public key from the parameter set.
    pub fn to_public_key(&self) -> Result<RsaPublicKey> {
        RsaPublicKey::new(self.modulus.clone(), self.exponent.clone())
            .map_err(|e| CertBundleError::KeyExtractionError(e.to_string()))
    }
}

/// Full RSA private parameter set: public half, private exponent, the two
/// prime factors and the three CRT co-factors.
#[derive(Clone)]
pub struct RsaPrivateParams {
    pub public: RsaPublicParams,
    pub d: BigUint,
    pub p: BigUint,
    pub q: BigUint,
    pub dp: BigUint,
    pub dq: BigUint,
    pub inverse_q: BigUint,
}

impl core::fmt::Debug for RsaPrivateParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Non-public components are intentionally skipped
        f.debug_struct("RsaPrivateParams")
            .field("public", &self.public)
            .finish()
    }
}

impl RsaPrivateParams {
    /// Builds a private parameter set from big-endian magnitude bytes.
    #[allow(clippy::too_many_arguments)]
    pub fn from_be_bytes(
        modulus: &[u8],
        exponent: &[u8],
        d: &[u8],
        p: &[u8],
        q: &[u8],
        dp: &[u8],
        dq: &[u8],
        inverse_q: &[u8],
    ) -> Self {
        Self {
            public: RsaPublicParams::from_be_bytes(modulus, exponent),
            d: BigUint::from_bytes_be(d),
            p: BigUint::from_bytes_be(p),
            q: BigUint::from_bytes_be(q),
            dp: BigUint::from_bytes_be(dp),
            dq: BigUint::from_bytes_be(dq),
            inverse_q: BigUint::from_bytes_be(inverse_q),
        }
    }

    /// Reconstructs an `rsa` private key from the parameter set.
    ///
    /// The key is rebuilt from modulus, exponents and primes, re-validated,
    /// and the supplied CRT co-factors are cross-checked against the values
    /// derived from d, p and q. Any inconsistency is a
    /// [`CertBundleError::KeyExtractionError`]; an inconsistent set never
    /// produces a signer.
    pub fn to_private_key(&self) -> Result<RsaPrivateKey> {
        let key = RsaPrivateKey::from_components(
            self.public.modulus.clone(),
            self.public.exponent.clone(),
            self.d.clone(),
            vec![self.p.clone(), self.q.clone()],
        )
        .map_err(|e| CertBundleError::KeyExtractionError(e.to_string()))?;

        key.validate()
            .map_err(|e| CertBundleError::KeyExtractionError(e.to_string()))?;

        let (dp, dq, inverse_q) = crt_cofactors(&self.d, &self.p, &self.q);
        if dp != self.dp || dq != self.dq || inverse_q != self.inverse_q {
            return Err(CertBundleError::KeyExtractionError(
                "CRT co-factors are inconsistent with modulus and exponents".to_string(),
            ));
        }

        Ok(key)
    }
}

/// A tagged parameter export, mirroring the export mode that produced it.
///
/// Private exports always carry the complete co-factor set; there is no
/// partially populated variant.
#[derive(Clone, Debug)]
pub enum ExportedKey {
    Public(RsaPublicParams),
    Private(RsaPrivateParams),
}

impl ExportedKey {
    /// The public half, available for either variant.
    pub fn public_params(&self) -> &RsaPublicParams {
        match self {
            ExportedKey::Public(params) => params,
            ExportedKey::Private(params) => &params.public,
        }
    }

    /// Unwraps the private parameter set.
    pub fn into_private(self) -> Result<RsaPrivateParams> {
        match self {
            ExportedKey::Private(params) => Ok(params),
            ExportedKey::Public(_) => Err(CertBundleError::KeyExtractionError(
                "export holds public parameters only".to_string(),
            )),
        }
    }
}

/// A native RSA key handle, public-only or with private material.
///
/// Export is capability-gated: asking a public-only handle for private
/// parameters fails instead of handing back a half-filled structure.
pub enum NativeKey {
    Public(RsaPublicKey),
    Private(Box<RsaPrivateKey>),
}

impl NativeKey {
    /// Builds a handle from a certificate's SubjectPublicKeyInfo.
    pub fn from_spki(spki: &x509_cert::spki::SubjectPublicKeyInfoOwned) -> Result<Self> {
        let spki_der = spki
            .to_der()
            .map_err(|e| CertBundleError::EncodingError(e.to_string()))?;
        let public = RsaPublicKey::from_public_key_der(&spki_der).map_err(|e| {
            CertBundleError::KeyExtractionError(format!("public key is not RSA: {e}"))
        })?;
        Ok(NativeKey::Public(public))
    }

    /// Builds a handle from a PKCS#8 `PrivateKeyInfo` document.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let key = RsaPrivateKey::from_pkcs8_der(der).map_err(|e| {
            CertBundleError::KeyExtractionError(format!("private key is not RSA: {e}"))
        })?;
        Ok(NativeKey::Private(Box::new(key)))
    }

    /// Builds a handle from ASCII PEM text containing an RSA key pair.
    ///
    /// Accepts the PKCS#1 `RSA PRIVATE KEY` and PKCS#8 `PRIVATE KEY`
    /// labels; anything else is a [`CertBundleError::PemParseError`].
    pub fn from_pem_key_pair(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| CertBundleError::PemParseError(format!("key text is not ASCII: {e}")))?;
        let (label, der) = pem_utils::pem_to_der_with_label(text)?;
        let key = match label.as_str() {
            "RSA PRIVATE KEY" => RsaPrivateKey::from_pkcs1_der(&der)
                .map_err(|e| CertBundleError::PemParseError(e.to_string()))?,
            "PRIVATE KEY" => RsaPrivateKey::from_pkcs8_der(&der)
                .map_err(|e| CertBundleError::PemParseError(e.to_string()))?,
            other => {
                return Err(CertBundleError::PemParseError(format!(
                    "unsupported PEM label: {other}"
                )));
            }
        };
        Ok(NativeKey::Private(Box::new(key)))
    }

    /// Exports the parameter set requested by `mode`.
    ///
    /// Public export succeeds for either handle. Private export requires a
    /// handle carrying private material, exactly two prime factors, and a
    /// parameter set that passes key validation.
    pub fn export(&self, mode: ExportMode) -> Result<ExportedKey> {
        match mode {
            ExportMode::Public => {
                let (n, e) = match self {
                    NativeKey::Public(key) => (key.n(), key.e()),
                    NativeKey::Private(key) => (key.n(), key.e()),
                };
                Ok(ExportedKey::Public(RsaPublicParams {
                    modulus: n.clone(),
                    exponent: e.clone(),
                }))
            }
            ExportMode::Private => {
                let key = match self {
                    NativeKey::Private(key) => key,
                    NativeKey::Public(_) => {
                        return Err(CertBundleError::KeyExtractionError(
                            "private parameters are not exportable from a public-only key"
                                .to_string(),
                        ));
                    }
                };
                key.validate()
                    .map_err(|e| CertBundleError::KeyExtractionError(e.to_string()))?;
                let primes = key.primes();
                if primes.len() != 2 {
                    return Err(CertBundleError::KeyExtractionError(format!(
                        "expected a two-prime RSA key, found {} primes",
                        primes.len()
                    )));
                }
                let p = primes[0].clone();
                let q = primes[1].clone();
                let (dp, dq, inverse_q) = crt_cofactors(key.d(), &p, &q);
                Ok(ExportedKey::Private(RsaPrivateParams {
                    public: RsaPublicParams {
                        modulus: key.n().clone(),
                        exponent: key.e().clone(),
                    },
                    d: key.d().clone(),
                    p,
                    q,
                    dp,
                    dq,
                    inverse_q,
                }))
            }
        }
    }
}

/// Derives the CRT co-factors from d and the prime factors.
///
/// `inverse_q` is computed as `q^(p-2) mod p`; p is prime, so this is the
/// modular inverse of q.
fn crt_cofactors(d: &BigUint, p: &BigUint, q: &BigUint) -> (BigUint, BigUint, BigUint) {
    let one = BigUint::from(1u32);
    let two = BigUint::from(2u32);
    let dp = d % (p - &one);
    let dq = d % (q - &one);
    let inverse_q = q.modpow(&(p - &two), p);
    (dp, dq, inverse_q)
}
