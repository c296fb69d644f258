//! Qualified Names
//!
//! Splitting and joining `prefix:local` names.

use memchr::memchr;

/// Split a qualified name into prefix and local name at the colon
pub fn split(qname: &str) -> (Option<&str>, &str) {
    match memchr(b':', qname.as_bytes()) {
        Some(pos) => (Some(&qname[..pos]), &qname[pos + 1..]),
        None => (None, qname),
    }
}

/// Join a prefix and local name; an empty or absent prefix yields the bare local name
pub fn join(prefix: Option<&str>, local_name: &str) -> String {
    match prefix {
        Some(p) if !p.is_empty() => {
            let mut qname = String::with_capacity(p.len() + 1 + local_name.len());
            qname.push_str(p);
            qname.push(':');
            qname.push_str(local_name);
            qname
        }
        _ => local_name.to_string(),
    }
}
