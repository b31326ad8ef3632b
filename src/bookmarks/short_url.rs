//! Short identifiers derived from bookmark ids.
//!
//! The id is written in base62 (`0-9a-zA-Z`), so every id maps to exactly one
//! short url and the mapping never changes for the life of the record.

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn encode(id: i64) -> String {
    let mut n = id.max(0) as u64;
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(ALPHABET[(n % 62) as usize]);
        n /= 62;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

/// Inverse of [`encode`]; `None` on foreign characters or overflow.
pub fn decode(short: &str) -> Option<i64> {
    if short.is_empty() {
        return None;
    }
    short.bytes().try_fold(0i64, |acc, b| {
        let digit = ALPHABET.iter().position(|&c| c == b)? as i64;
        acc.checked_mul(62)?.checked_add(digit)
    })
}
