use std::str;

/// Descriptors are short; anything past this only slows the fuzzer down.
pub const MAX_INPUT_SIZE: usize = 16 * 1024;

/// UTF-8 view of `data` capped at `MAX_INPUT_SIZE`, trimming at most 3 bytes
/// when the cap splits a codepoint.
#[inline]
pub fn truncate_utf8(data: &[u8]) -> Option<&str> {
    let cap = data.len().min(MAX_INPUT_SIZE);
    (0..=3usize.min(cap)).find_map(|trim| str::from_utf8(&data[..cap - trim]).ok())
}
