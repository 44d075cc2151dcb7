//! Character encoding detection and transcoding.
//!
//! Registration pages are served as UTF-8 today, but older snapshots declared
//! `windows-1252`. The charset is sniffed from `<meta>` declarations in the
//! document head; whole documents are transcoded in one go, streams are
//! decoded incrementally with [`StreamDecoder`].

use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Number of leading bytes examined for a charset declaration.
pub const SNIFF_LEN: usize = 1024;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect character encoding from the head of an HTML document.
///
/// Checks `<meta charset>` first, then `http-equiv="Content-Type"`, and falls
/// back to UTF-8. Only the first [`SNIFF_LEN`] bytes are examined.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    declared_encoding(html, true).unwrap_or(UTF_8)
}

/// Charset declared in `head`, if any.
///
/// With `complete == false` the head may end mid-tag, so a label running up
/// to the last byte could still be cut short and is not trusted.
fn declared_encoding(head: &[u8], complete: bool) -> Option<&'static Encoding> {
    let head = &head[..head.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);

    [&*CHARSET_META_RE, &*CONTENT_TYPE_CHARSET_RE]
        .into_iter()
        .filter_map(|re| re.captures(&head_str).and_then(|c| c.get(1)))
        .filter(|m| complete || m.end() < head_str.len())
        .find_map(|m| Encoding::for_label(m.as_str().as_bytes()))
        .map(Encoding::output_encoding)
}

/// Transcode a complete HTML document to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than failing.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}

/// Incremental decoder for HTML arriving in arbitrary-sized chunks.
///
/// ASCII decodes the same in every charset a page can declare, so a leading
/// ASCII run is passed through while the head is still being sniffed. The
/// decoder is chosen at the first of: a complete charset declaration, the
/// first non-ASCII byte, [`SNIFF_LEN`] buffered bytes, or end of input. No
/// input is held back beyond an incomplete multi-byte sequence.
pub struct StreamDecoder {
    sniff: Vec<u8>,
    passed: usize,
    decoder: Option<Decoder>,
}

impl StreamDecoder {
    /// Create a decoder that has not yet seen any input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sniff: Vec::with_capacity(SNIFF_LEN),
            passed: 0,
            decoder: None,
        }
    }

    /// Encoding in use, once detected.
    #[must_use]
    pub fn encoding(&self) -> Option<&'static Encoding> {
        self.decoder.as_ref().map(Decoder::encoding)
    }

    /// Decode the next chunk of input.
    ///
    /// Bytes without a charset declaration in front of them decode as UTF-8.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        if let Some(decoder) = self.decoder.as_mut() {
            return decode_into_string(decoder, bytes, false);
        }

        self.sniff.extend_from_slice(bytes);
        if self.sniff.len() >= SNIFF_LEN {
            return self.start(detect_encoding(&self.sniff), false);
        }
        if let Some(encoding) = declared_encoding(&self.sniff, false) {
            return self.start(encoding, false);
        }

        let mut out = self.pass_ascii();
        if self.passed < self.sniff.len() {
            out.push_str(&self.start(UTF_8, false));
        }
        out
    }

    /// Flush any buffered input at end of stream.
    pub fn finish(&mut self) -> String {
        match self.decoder.as_mut() {
            Some(decoder) => decode_into_string(decoder, &[], true),
            None => self.start(detect_encoding(&self.sniff), true),
        }
    }

    fn pass_ascii(&mut self) -> String {
        let pending = &self.sniff[self.passed..];
        // ESC starts ISO-2022-JP shift sequences, so it ends the run too.
        let run = pending
            .iter()
            .position(|&b| !b.is_ascii() || b == 0x1B)
            .unwrap_or(pending.len());
        let text: String = pending[..run].iter().map(|&b| char::from(b)).collect();
        self.passed += run;
        text
    }

    fn start(&mut self, encoding: &'static Encoding, last: bool) -> String {
        tracing::trace!(encoding = encoding.name(), passed = self.passed, "detected stream encoding");

        let buffered = std::mem::take(&mut self.sniff);
        let decoder = self.decoder.insert(encoding.new_decoder());
        decode_into_string(decoder, &buffered[self.passed..], last)
    }
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_into_string(decoder: &mut Decoder, mut src: &[u8], last: bool) -> String {
    let capacity = decoder
        .max_utf8_buffer_length(src.len())
        .unwrap_or(src.len().saturating_mul(3))
        .max(16);
    let mut out = String::with_capacity(capacity);

    loop {
        let (result, read, _had_errors) = decoder.decode_to_string(src, &mut out, last);
        src = &src[read..];
        match result {
            CoderResult::InputEmpty => return out,
            CoderResult::OutputFull => out.reserve(src.len().saturating_mul(3).max(16)),
        }
    }
}
