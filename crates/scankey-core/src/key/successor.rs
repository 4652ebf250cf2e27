//! Module: key::successor
//! Responsibility: lexicographic successor of a fixed-length byte string.
//! Does not own: deciding when a bound needs its successor.
//! Boundary: consumed by key building and scan bound helpers.

///
/// next_key
///
/// Increment `key` in place as a big-endian byte counter.
/// Trailing `0xFF` bytes roll over to `0x00` and carry into the previous byte.
/// Returns `false` when every byte is already `0xFF` (or `key` is empty);
/// the buffer is left unchanged in that case.
///

#[must_use]
pub fn next_key(key: &mut [u8]) -> bool {
    let Some(carry_stop) = key.iter().rposition(|byte| *byte != u8::MAX) else {
        return false;
    };

    key[carry_stop] += 1;
    for byte in &mut key[carry_stop + 1..] {
        *byte = 0;
    }

    true
}

/// Owned successor of `key`, or `None` when no successor of the same length exists.
#[must_use]
pub fn successor(key: &[u8]) -> Option<Vec<u8>> {
    let mut next = key.to_vec();

    next_key(&mut next).then_some(next)
}
