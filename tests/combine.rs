mod util;

use certbundle::combine::combine;
use certbundle::error::CertBundleError;
use certbundle::key::ExportMode;
use certbundle::pkcs12::Pkcs12Container;
use rsa::pkcs1v15::{SigningKey, VerifyingKey};
use rsa::signature::{Signer, Verifier};
use sha2::Sha256;

/// The combined bundle keeps the public certificate's bytes and adopts the
/// other certificate's private key.
#[test]
fn combine_adopts_external_key() {
    let public_cert = util::subject_cert();
    let key_cert = util::signer_cert_with_key();

    let combined = combine(&public_cert, &key_cert).unwrap();

    assert_eq!(
        combined.to_der().unwrap(),
        public_cert.to_der().unwrap(),
        "public certificate bytes must survive the round trip"
    );
    assert!(combined.has_private_key());

    // The adopted key must produce signatures verifiable under the
    // signer key's public half.
    let message = b"combined key material";
    let signing_key = SigningKey::<Sha256>::new(combined.private_key().unwrap().clone());
    let signature = signing_key.sign(message);

    let verifying_key = VerifyingKey::<Sha256>::new(util::signer_public_key());
    verifying_key.verify(message, &signature).unwrap();
}

/// A private-key certificate without key material aborts the combine with a
/// key extraction failure and no partial result.
#[test]
fn combine_requires_private_key() {
    let public_cert = util::subject_cert();
    let keyless = util::signer_cert();

    let err = combine(&public_cert, &keyless).unwrap_err();
    assert!(matches!(err, CertBundleError::KeyExtractionError(_)));
}

/// A sealed container reloads under its passphrase with exactly one
/// certificate entry and one private-key entry.
#[test]
fn sealed_container_round_trip() {
    let public_cert = util::subject_cert();
    let key_params = util::signer_cert_with_key()
        .export_key(ExportMode::Private)
        .unwrap()
        .into_private()
        .unwrap();

    let mut container = Pkcs12Container::from_certificate(&public_cert).unwrap();
    container.attach_key(&key_params).unwrap();
    let blob = container.seal("round trip passphrase").unwrap();

    let reloaded = Pkcs12Container::from_der(&blob, "round trip passphrase").unwrap();
    assert_eq!(reloaded.cert_count(), 1);
    assert!(reloaded.has_key());
    assert_eq!(reloaded.alias(), public_cert.subject());
}

/// A container with no key entry cannot be sealed.
#[test]
fn seal_requires_key_entry() {
    let container = Pkcs12Container::from_certificate(&util::subject_cert()).unwrap();
    assert!(container.seal("whatever").is_err());
}

/// Garbage bytes are a container load failure, not a panic.
#[test]
fn malformed_blob_is_container_load_error() {
    let err = Pkcs12Container::from_der(b"not a pkcs12 blob", "").unwrap_err();
    assert!(matches!(err, CertBundleError::ContainerLoadError(_)));
}
