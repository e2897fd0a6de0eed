//! The lexical micro-grammar embedded in scalars.
//!
//! Three shapes matter: a whole-scalar reference (`$a.b`), reference
//! occurrences inside plain/double-quoted text (interpolation holes), and the
//! parameter-list key of an anonymous function literal (`$(x, y)`).
//!
//! An identifier is `[A-Za-z_][A-Za-z0-9_]*`. A `$` not followed by an
//! identifier head is literal text. Scanning works on bytes: every grammar
//! character is ASCII, and ASCII bytes never occur inside a multi-byte UTF-8
//! sequence.

use ps_types::{Hole, PsRef};

fn is_ident_head(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_ident(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(&b) if is_ident_head(b) => bytes[1..].iter().all(|&b| is_ident_byte(b)),
        _ => false,
    }
}

/// Scan one reference starting at `start`, which must point at a `$`.
/// Returns the reference and the byte offset just past its last segment.
fn scan_reference(text: &str, start: usize) -> Option<(PsRef, usize)> {
    let bytes = text.as_bytes();
    let mut i = start + 1;
    let mut path = Vec::new();
    loop {
        if i >= bytes.len() || !is_ident_head(bytes[i]) {
            break;
        }
        let seg_start = i;
        i += 1;
        while i < bytes.len() && is_ident_byte(bytes[i]) {
            i += 1;
        }
        path.push(text[seg_start..i].to_string());
        // A dot continues the path only if an identifier follows it.
        if i + 1 < bytes.len() && bytes[i] == b'.' && is_ident_head(bytes[i + 1]) {
            i += 1;
        } else {
            break;
        }
    }
    if path.is_empty() {
        None
    } else {
        Some((PsRef::new(path), i))
    }
}

/// A scalar that is, in its entirety, a reference.
pub(crate) fn parse_reference(text: &str) -> Option<PsRef> {
    if !text.starts_with('$') {
        return None;
    }
    match scan_reference(text, 0) {
        Some((r, end)) if end == text.len() => Some(r),
        _ => None,
    }
}

/// A scalar that is a parameter list: `$(a, b)` with at least one name.
pub(crate) fn parse_params(text: &str) -> Option<Vec<String>> {
    let inner = text.strip_prefix("$(")?.strip_suffix(')')?;
    let mut names = Vec::new();
    for part in inner.split(',') {
        let name = part.trim();
        if !is_ident(name) {
            return None;
        }
        names.push(name.to_string());
    }
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Every reference occurrence inside a scalar, with its byte range.
pub(crate) fn find_holes(text: &str) -> Vec<Hole> {
    let bytes = text.as_bytes();
    let mut holes = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            if let Some((reference, end)) = scan_reference(text, i) {
                holes.push(Hole {
                    range: (i, end),
                    reference,
                });
                i = end;
                continue;
            }
        }
        i += 1;
    }
    holes
}
