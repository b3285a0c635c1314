//! Project-specific utilities live here.

/// Byte offsets of the hyphens in hyphenated UUID text.
const UUID_HYPHENS: [usize; 4] = [8, 13, 18, 23];
const UUID_LEN: usize = 36;

/// True when `value` is a UUID in canonical 8-4-4-4-12 hex form.
///
/// Hex digits may be upper or lower case. Braced, URN and simple (unhyphenated)
/// forms are rejected, unlike `uuid::Uuid::parse_str`.
pub fn is_canonical_uuid(value: &str) -> bool {
    value.len() == UUID_LEN
        && value.bytes().enumerate().all(|(i, b)| {
            if UUID_HYPHENS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_hexdigit()
            }
        })
}
