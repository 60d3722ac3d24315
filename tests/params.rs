mod util;

use certbundle::error::CertBundleError;
use certbundle::key::{ExportMode, NativeKey, RsaPublicParams};
use rsa::RsaPublicKey;
use rsa::traits::PublicKeyParts;

/// Public-only and full private exports of the same key must agree on
/// modulus and public exponent.
#[test]
fn public_and_private_exports_agree() {
    let native = NativeKey::Private(Box::new(util::signer_key()));

    let public = native.export(ExportMode::Public).unwrap();
    let private = native
        .export(ExportMode::Private)
        .unwrap()
        .into_private()
        .unwrap();

    assert_eq!(public.public_params().modulus, private.public.modulus);
    assert_eq!(public.public_params().exponent, private.public.exponent);
}

/// A public-only handle must refuse a private export instead of returning a
/// partially populated parameter set.
#[test]
fn private_export_requires_private_material() {
    let native = NativeKey::Public(RsaPublicKey::from(&util::signer_key()));

    let err = native.export(ExportMode::Private).unwrap_err();
    assert!(matches!(err, CertBundleError::KeyExtractionError(_)));
}

/// Exported private parameter sets reconstruct into working keys.
#[test]
fn private_params_reconstruct() {
    let native = NativeKey::Private(Box::new(util::signer_key()));
    let params = native
        .export(ExportMode::Private)
        .unwrap()
        .into_private()
        .unwrap();

    let rebuilt = params.to_private_key().unwrap();
    assert_eq!(rebuilt.n(), &params.public.modulus);
}

/// Tampered CRT co-factors must surface as an extraction failure, never as
/// a silently invalid signer.
#[test]
fn inconsistent_cofactors_rejected() {
    let native = NativeKey::Private(Box::new(util::signer_key()));
    let mut params = native
        .export(ExportMode::Private)
        .unwrap()
        .into_private()
        .unwrap();

    params.dp += 1u32;

    let err = params.to_private_key().unwrap_err();
    assert!(matches!(err, CertBundleError::KeyExtractionError(_)));
}

/// Big-endian magnitude bytes round-trip into the same parameter values,
/// regardless of a set high bit.
#[test]
fn be_bytes_are_unsigned_magnitudes() {
    let key = util::signer_key();
    let expected = NativeKey::Private(Box::new(key.clone()))
        .export(ExportMode::Public)
        .unwrap();

    let n_bytes = expected.public_params().modulus.to_bytes_be();
    // 2048-bit modulus: high bit set, must still parse as non-negative.
    assert!(n_bytes[0] & 0x80 != 0);
    let e_bytes = expected.public_params().exponent.to_bytes_be();

    let params = RsaPublicParams::from_be_bytes(&n_bytes, &e_bytes);
    assert_eq!(&params, expected.public_params());
}

/// PEM and DER certificate encodings round-trip.
#[test]
fn certificate_pem_round_trip() {
    let cert = util::subject_cert();
    let pem = cert.to_pem().unwrap();
    let reparsed = certbundle::cert::Certificate::from_pem(&pem).unwrap();
    assert_eq!(reparsed.to_der().unwrap(), cert.to_der().unwrap());
}

/// A certificate without an associated private key cannot serve as a
/// private-key source.
#[test]
fn certificate_without_key_fails_private_export() {
    let cert = util::subject_cert();
    assert!(!cert.has_private_key());

    let err = cert.export_key(ExportMode::Private).unwrap_err();
    assert!(matches!(err, CertBundleError::KeyExtractionError(_)));
}
