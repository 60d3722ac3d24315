use certbundle::cert::Certificate;
use rsa::pkcs8::DecodePrivateKey;
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Subject certificate: CN=subject.example.test with a full DN including
/// ST=Washington.
pub const SUBJECT_CERT_PEM: &str = include_str!("data/subject_cert.pem");
pub const SUBJECT_KEY_PEM: &str = include_str!("data/subject_key.pem");

/// Signer certificate: a distinct key pair used as the external key source.
pub const SIGNER_CERT_PEM: &str = include_str!("data/signer_cert.pem");
pub const SIGNER_KEY_PEM: &str = include_str!("data/signer_key.pem");
pub const SIGNER_KEY_PKCS1_PEM: &str = include_str!("data/signer_key_pkcs1.pem");

pub fn subject_cert() -> Certificate {
    Certificate::from_pem(SUBJECT_CERT_PEM).expect("subject certificate fixture")
}

pub fn subject_key() -> RsaPrivateKey {
    RsaPrivateKey::from_pkcs8_pem(SUBJECT_KEY_PEM).expect("subject key fixture")
}

pub fn signer_cert() -> Certificate {
    Certificate::from_pem(SIGNER_CERT_PEM).expect("signer certificate fixture")
}

pub fn signer_key() -> RsaPrivateKey {
    RsaPrivateKey::from_pkcs8_pem(SIGNER_KEY_PEM).expect("signer key fixture")
}

pub fn signer_public_key() -> RsaPublicKey {
    RsaPublicKey::from(&signer_key())
}

pub fn signer_cert_with_key() -> Certificate {
    signer_cert().with_private_key(signer_key())
}
