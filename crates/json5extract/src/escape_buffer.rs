//! Buffer for the hexadecimal digits of `\xXX` and `\uXXXX` escapes.
//!
//! [`HexEscapeBuffer`] accumulates exactly `N` ASCII hexadecimal digits and
//! yields the decoded code unit once the last one arrives. Feeding anything
//! that is not a hex digit is an error carrying the offending character.

#[derive(Debug)]
pub(crate) struct HexEscapeBuffer<const N: usize> {
    value: u32,
    len: usize,
}

impl<const N: usize> HexEscapeBuffer<N> {
    pub(crate) fn new() -> Self {
        Self { value: 0, len: 0 }
    }

    /// Feeds one digit.
    ///
    /// - `Ok(None)` while fewer than `N` digits have been seen.
    /// - `Ok(Some(unit))` on the `N`th digit; the buffer resets.
    /// - `Err(c)` if `c` is not an ASCII hex digit.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<u32>, char> {
        let digit = c.to_digit(16).ok_or(c)?;
        self.value = (self.value << 4) | digit;
        self.len += 1;

        if self.len == N {
            let value = self.value;
            self.value = 0;
            self.len = 0;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }
}

/// Decodes exactly `N` hex digits from `chars`, or `None` if they are missing
/// or malformed.
pub(crate) fn decode_hex<const N: usize>(chars: &mut impl Iterator<Item = char>) -> Option<u32> {
    let mut buf = HexEscapeBuffer::<N>::new();
    for c in chars.take(N) {
        if let Some(value) = buf.feed(c).ok()? {
            return Some(value);
        }
    }
    None
}
