//! Peer classification
//!
//! Spreadsheet peers are free text. A peer is treated as a CIDR block when it
//! looks like `a.b.c.d/n`, as a DNS name when it has a dot and no colon, and
//! as a label list otherwise. This is a shape heuristic, not validation:
//! octets and prefix lengths are not range checked, IPv6 blocks contain `:`
//! and therefore fall through to labels, and a bare IPv4 address is taken as
//! a DNS name.

use sheetpol_common::{parse_labels, Labels};

/// Classified peer of a rule
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Peer {
    /// CIDR block, as written
    Cidr(String),
    /// DNS name, lower-cased
    Fqdn(String),
    /// Endpoint labels
    Labels(Labels),
}

/// Classify peer text. The first matching shape wins.
pub fn classify(text: &str) -> Peer {
    let text = text.trim();
    if is_ipv4_cidr(text) {
        Peer::Cidr(text.to_string())
    } else if text.contains('.') && !text.contains(':') {
        Peer::Fqdn(text.to_lowercase())
    } else {
        Peer::Labels(parse_labels(text))
    }
}

/// Shape check for `digits.digits.digits.digits/digits`
fn is_ipv4_cidr(text: &str) -> bool {
    let Some((addr, prefix)) = text.split_once('/') else {
        return false;
    };
    let octets: Vec<&str> = addr.split('.').collect();
    octets.len() == 4 && octets.iter().all(|o| is_digits(o)) && is_digits(prefix)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
