use crate::cert::Certificate;
use crate::error::{CertBundleError, Result};
use crate::key::ExportMode;
use crate::pkcs12::{self, Pkcs12Container};
use crate::rng::OperationRng;

/// Merges a public certificate with a private key sourced from a different
/// certificate into a single key-and-certificate bundle.
///
/// The private parameters are extracted in full from `private_key_cert`, a
/// fresh PKCS#12 container is seeded with `public_cert`'s chain entry, the
/// key is inserted under the subject alias, and the container is sealed
/// under a freshly generated passphrase and immediately re-imported. The
/// result carries `public_cert`'s certificate and chain together with
/// `private_key_cert`'s key.
///
/// # Errors
/// * [`CertBundleError::KeyExtractionError`]: `private_key_cert` has no
///   exportable RSA private key, or its parameters are inconsistent.
/// * [`CertBundleError::ContainerLoadError`]: the container could not be
///   assembled from the certificate entry.
/// * [`CertBundleError::ReimportError`]: the sealed bytes could not be
///   reloaded with the generated passphrase.
///
/// No partial result is returned on any failure path.
pub fn combine(public_cert: &Certificate, private_key_cert: &Certificate) -> Result<Certificate> {
    let mut rng = OperationRng::new();

    let key_params = private_key_cert
        .export_key(ExportMode::Private)?
        .into_private()?;

    let mut container = Pkcs12Container::from_certificate(public_cert)?;
    container.attach_key(&key_params)?;

    let passphrase = pkcs12::generate_passphrase(&mut rng);
    let sealed = container.seal(&passphrase)?;

    Certificate::from_pkcs12(&sealed, &passphrase)
        .map_err(|e| CertBundleError::ReimportError(e.to_string()))
}
