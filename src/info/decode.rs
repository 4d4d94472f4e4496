//! Raw Info file loading: gzip and character set handling.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use bstr::ByteSlice;
use encoding_rs::{Encoding, UTF_8};
use flate2::read::GzDecoder;
use memchr::memmem;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read an Info file, inflating it when it is gzip compressed.
pub(crate) fn read_info_file(path: &Path) -> io::Result<Vec<u8>> {
    let raw = fs::read(path)?;
    if !raw.starts_with(&GZIP_MAGIC) {
        return Ok(raw);
    }
    let mut inflated = Vec::with_capacity(raw.len() * 4);
    GzDecoder::new(raw.as_slice()).read_to_end(&mut inflated)?;
    Ok(inflated)
}

/// Character set declared in the trailing `Local Variables:` block.
///
/// makeinfo writes `coding: utf-8` (or a legacy charset such as
/// `iso-8859-1`) there. Anything missing or unknown falls back to UTF-8.
pub(crate) fn detect_encoding(data: &[u8]) -> &'static Encoding {
    let Some(start) = memmem::rfind(data, b"Local Variables:") else {
        return UTF_8;
    };
    data[start..]
        .lines()
        .filter_map(|line| line.trim_ascii().strip_prefix(b"coding:"))
        .map(|label| label.trim_ascii())
        .find_map(Encoding::for_label)
        .unwrap_or(UTF_8)
}

/// Decode one line of node text.
pub(crate) fn decode<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Cow<'a, str> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::trace!(encoding = encoding.name(), "replaced undecodable bytes");
    }
    text
}
