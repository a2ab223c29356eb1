//! Latin-1 (ISO-8859-1) text codec for SGML statements.
//!
//! Every byte maps to exactly one `char` in `U+0000..=U+00FF`, so decoding
//! cannot fail and encoding text that came from [`decode`] gives back the
//! original bytes.

use std::borrow::Cow;

use encoding_rs::mem::{decode_latin1, encode_latin1_lossy};

pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    decode_latin1(bytes)
}

/// Characters above `U+00FF` cannot be represented and are replaced; text
/// produced by [`decode`] never contains them.
pub fn encode(text: &str) -> Cow<'_, [u8]> {
    encode_latin1_lossy(text)
}
