use crate::error::{CertBundleError, Result};

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(&pem, pem::EncodeConfig::new())
}

/// Convert a PEM‑encoded string to DER‑encoded bytes.
pub fn pem_to_der(pem_str: &str) -> Result<Vec<u8>> {
    let pem = pem::parse(pem_str).map_err(|e| CertBundleError::PemParseError(e.to_string()))?;
    Ok(pem.contents().to_vec())
}

/// Convert a PEM‑encoded string to DER‑encoded bytes, keeping the label so
/// callers can dispatch on the document type.
pub fn pem_to_der_with_label(pem_str: &str) -> Result<(String, Vec<u8>)> {
    let pem = pem::parse(pem_str).map_err(|e| CertBundleError::PemParseError(e.to_string()))?;
    Ok((pem.tag().to_string(), pem.contents().to_vec()))
}
