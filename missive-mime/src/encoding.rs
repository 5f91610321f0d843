//! Header folding into RFC 2047 encoded words, and base64 body encoding.

use base64::{Engine, engine::general_purpose::STANDARD};

/// Maximum base64 payload per encoded word in the `Subject` header.
pub const SUBJECT_WORD_LEN: usize = 60;

/// Maximum base64 payload per encoded word in `name=` / `filename=` parameters.
pub const FILENAME_WORD_LEN: usize = 78;

/// Line width of base64 encoded bodies, not counting the newline.
pub const BODY_LINE_LEN: usize = 76;

const WORD_PREFIX: &str = "=?UTF-8?B?";

/// Encodes `text` as a sequence of `=?UTF-8?B?...?=` encoded words whose
/// base64 payload is at most `max_len` bytes.
///
/// The whole text is base64 encoded once and the result is cut into
/// consecutive chunks, so only the concatenation of all payloads is valid
/// base64. When more than one word is produced the first one is closed with
/// `==?=` instead of `?=`. Empty input yields no words.
#[must_use]
pub fn fold_encoded_words(text: &str, max_len: usize) -> Vec<String> {
    let encoded = STANDARD.encode(text.as_bytes());

    // base64 output is ASCII, so byte chunks are always valid str slices
    let chunks = encoded
        .as_bytes()
        .chunks(max_len.max(1))
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect::<Vec<_>>();

    let folded = chunks.len() > 1;
    chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let close = if index == 0 && folded { "==?=" } else { "?=" };
            format!("{WORD_PREFIX}{chunk}{close}")
        })
        .collect()
}

/// Encodes `data` as standard base64 broken into [`BODY_LINE_LEN`] wide lines,
/// each terminated by `\n` (the last one included). Empty input yields an
/// empty string.
#[must_use]
pub fn encode_body(data: &[u8]) -> String {
    let encoded = STANDARD.encode(data);
    let mut body = String::with_capacity(encoded.len() + encoded.len() / BODY_LINE_LEN + 1);

    for line in encoded.as_bytes().chunks(BODY_LINE_LEN) {
        body.extend(line.iter().map(|&b| char::from(b)));
        body.push('\n');
    }

    body
}
