use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use x509_cert::name::Name;

use crate::error::Result;

fn state_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^S\s*=\s*").unwrap())
}

/// Normalizes a distinguished-name string for request building.
///
/// The attribute key `S=` is rewritten to `ST=` (state/province RDN); no
/// other attribute key is touched. Whitespace around components is trimmed
/// so both `CN=a,S=b` and `CN=a, S=b` parse identically.
pub fn normalize_subject(dn: &str) -> String {
    split_components(dn)
        .iter()
        .map(|component| {
            let component = component.trim();
            state_attr_re().replace(component, "ST=").into_owned()
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses a distinguished-name string into an X.509 name, applying
/// [`normalize_subject`] first.
pub fn parse_subject(dn: &str) -> Result<Name> {
    Ok(Name::from_str(&normalize_subject(dn))?)
}

/// Splits on RDN separators, honoring RFC 4514 backslash escapes.
fn split_components(dn: &str) -> Vec<String> {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for ch in dn.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => {
                current.push(ch);
                escaped = true;
            }
            ',' => {
                components.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    components.push(current);
    components
}
