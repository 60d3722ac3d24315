//! # certbundle - Certificate/Key Bundling and CSR Construction
//!
//! certbundle is a small certificate-authority helper built entirely with
//! rustcrypto libraries, with no dependencies on ring or openssl. It covers
//! two operations a CA workflow needs around existing certificates:
//!
//! - **Combine**: merge a public-key certificate with an RSA private key
//!   sourced from a *different* certificate into a single importable
//!   bundle, via a transient PKCS#12 container sealed under a freshly
//!   generated passphrase.
//! - **CreateRequest**: produce a signed PKCS#10 certification request from
//!   an existing certificate's subject and public key, signed by a key
//!   supplied as PEM text, embedded in the certificate, or held in a
//!   PKCS#12 key container.
//!
//! Certificate issuance, chain validation, and revocation are out of scope;
//! the crate only reads caller-supplied certificates and produces derived
//! artifacts.
//!
//! ## Supported Key Material
//!
//! - **RSA** keys, as full private parameter sets (modulus, exponents,
//!   prime factors and CRT co-factors) or public-only parameter sets
//! - **PEM** key pairs under the PKCS#1 (`RSA PRIVATE KEY`) and PKCS#8
//!   (`PRIVATE KEY`) labels
//! - **PKCS#12** containers for both input key material and combined output
//!
//! ## Quick Start
//!
//! ### Combining a certificate with an external private key
//!
//! ```rust,no_run
//! use certbundle::cert::Certificate;
//! use certbundle::combine::combine;
//!
//! # fn main() -> Result<(), certbundle::error::CertBundleError> {
//! // The certificate whose public half we want to keep.
//! let public_cert =
//!     Certificate::from_pem(&std::fs::read_to_string("server.pem").unwrap())?;
//!
//! // A different certificate carrying the private key to adopt.
//! let key_der = std::fs::read("old_server_key.der").unwrap();
//! let key = rsa::pkcs8::DecodePrivateKey::from_pkcs8_der(&key_der).unwrap();
//! let key_cert =
//!     Certificate::from_pem(&std::fs::read_to_string("old_server.pem").unwrap())?
//!         .with_private_key(key);
//!
//! let bundled = combine(&public_cert, &key_cert)?;
//! assert!(bundled.has_private_key());
//! # Ok(())
//! # }
//! ```
//!
//! ### Building a certification request
//!
//! ```rust,no_run
//! use certbundle::cert::Certificate;
//! use certbundle::request::{CsrParams, SigningKeySource, create_request};
//!
//! # fn main() -> Result<(), certbundle::error::CertBundleError> {
//! let cert =
//!     Certificate::from_pem(&std::fs::read_to_string("subject.pem").unwrap())?;
//! let key_pem = std::fs::read("signing_key.pem").unwrap();
//!
//! let params = CsrParams::builder()
//!     .certificate(&cert)
//!     .signing_key(SigningKeySource::PemKeyPair(&key_pem))
//!     .hash_size_bits(256)
//!     .build();
//!
//! let csr_der = create_request(&params)?;
//! std::fs::write("request.der", csr_der).unwrap();
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation either returns a complete artifact or fails with a
//! [`error::CertBundleError`]; nothing is retried or partially written:
//!
//! ```rust
//! use certbundle::{cert::Certificate, error::CertBundleError};
//!
//! match Certificate::from_pem("invalid pem data") {
//!     Ok(_) => println!("Certificate imported"),
//!     Err(CertBundleError::PemParseError(msg)) => println!("Bad PEM: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`key`]: RSA parameter extraction and reconstruction
//! - [`rng`]: per-operation random source adapter
//! - [`cert`]: certificate model and subject-name handling
//! - [`pkcs12`]: transient PKCS#12 container
//! - [`combine`]: the certificate/key combine operation
//! - [`request`]: PKCS#10 request building and signing
//! - [`error`]: error types and handling

pub mod cert;
pub mod combine;
pub mod error;
pub mod key;
pub mod pem_utils;
pub mod pkcs12;
pub mod request;
pub mod rng;
